//! Utility functions for the dashboard UI

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::messages::MessageType;
use crate::data::StatusColor;
use crate::geometry::Rgb;

/// Dashboard palette
pub mod colors {
    use ratatui::style::Color;

    pub const BLUE: Color = Color::Rgb(0x3B, 0x82, 0xF6);
    pub const CHART_BLUE: Color = Color::Rgb(0x25, 0x63, 0xEB);
    pub const EMERALD: Color = Color::Rgb(0x10, 0xB9, 0x81);
    pub const AMBER: Color = Color::Rgb(0xF5, 0x9E, 0x0B);
    pub const RED: Color = Color::Rgb(0xEF, 0x44, 0x44);
    pub const MUTED: Color = Color::Rgb(0x6B, 0x72, 0x80);
    pub const PLACEHOLDER: Color = Color::Rgb(0xD1, 0xD5, 0xDB);
    pub const SKELETON: Color = Color::Rgb(0x37, 0x41, 0x51);
    pub const BORDER: Color = Color::Rgb(0x4B, 0x55, 0x63);
}

pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

pub fn status_color(color: StatusColor) -> Color {
    match color {
        StatusColor::Amber => colors::AMBER,
        StatusColor::Blue => colors::CHART_BLUE,
        StatusColor::Green => colors::EMERALD,
    }
}

/// Get style for message type
pub fn get_message_style(message_type: MessageType) -> Style {
    match message_type {
        MessageType::Info => Style::default().fg(Color::Cyan),
        MessageType::Success => Style::default().fg(Color::Green),
        MessageType::Warning => Style::default().fg(Color::Yellow),
    }
}

/// Truncate to at most `max_width` terminal columns, marking the cut with "…"
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Placeholder bar drawn while a panel is loading
pub fn skeleton(width: usize) -> Line<'static> {
    Line::from(Span::styled(
        "▆".repeat(width),
        Style::default().fg(colors::SKELETON),
    ))
}

/// Skeleton rows filling a `width` by `height` area
pub fn skeleton_lines(width: u16, height: u16) -> Vec<Line<'static>> {
    (0..height).map(|_| skeleton(usize::from(width))).collect()
}

/// Centered empty state shown by the list panels
pub fn no_data() -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        NO_DATA,
        Style::default().fg(colors::MUTED),
    )))
    .alignment(Alignment::Center)
}

/// One row in the vertical middle of `area`
pub fn centered_row(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    }
}

pub const NO_DATA: &str = "Chưa có dữ liệu";

/// KPI change rendered the way the cards show it, e.g. `8.2%` or `5%`
pub fn format_change(change: f64) -> String {
    format!("{}%", change)
}

/// Thousands separated with dots, e.g. `3.200`
pub fn format_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Quần tây", 20), "Quần tây");
        assert_eq!(truncate_str("Áo sơ mi dài tay", 8), "Áo sơ m…");
        assert_eq!(truncate_str("abc", 0), "");
        assert_eq!(truncate_str("abcd", 1), "…");
    }

    #[test]
    fn test_truncate_respects_display_width() {
        let cut = truncate_str("Shop thuê tại Greenmart Mall", 12);
        assert!(cut.width() <= 12);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_skeleton_lines() {
        let lines = skeleton_lines(4, 3);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].width(), 4);
        assert!(skeleton_lines(4, 0).is_empty());
    }

    #[test]
    fn test_centered_row() {
        let row = centered_row(Rect::new(2, 4, 30, 10));
        assert_eq!(row, Rect::new(2, 9, 30, 1));
        assert_eq!(centered_row(Rect::new(0, 0, 5, 0)).height, 0);
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(8.2), "8.2%");
        assert_eq!(format_change(5.0), "5%");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(3200), "3.200");
        assert_eq!(format_thousands(1234567), "1.234.567");
    }

    #[test]
    fn test_rgb_conversion() {
        assert_eq!(rgb(Rgb::new(1, 2, 3)), Color::Rgb(1, 2, 3));
        assert_eq!(status_color(StatusColor::Green), colors::EMERALD);
    }
}
