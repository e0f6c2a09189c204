//! Production status donut with radial percentage labels
//!
//! The donut is painted on a braille canvas centered on the origin. Chart
//! geometry uses screen coordinates (y grows downwards), so every point is
//! flipped before it reaches the canvas.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Context, Line as CanvasLine, Points},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::dashboard::app::App;
use crate::dashboard::utils::{colors, rgb, skeleton_lines};
use crate::geometry::{
    compute_label, polar, DonutSweep, RadialLabelRequest, Sector, ViewportMetrics,
};
use crate::period::{PeriodKey, PeriodRecord, StatusDisplay};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;
const CENTER_CAPTION: &str = "Lệnh sản xuất";

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Tình Hình Sản Xuất · {} ", app.period().label()))
        .border_style(Style::default().fg(colors::BORDER));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .split(inner);

    f.render_widget(Paragraph::new(period_tabs(app.period())), chunks[0]);

    match app.status_display() {
        StatusDisplay::Loading => {
            let area = Rect {
                height: chunks[1].height + chunks[2].height,
                ..chunks[1]
            };
            f.render_widget(Paragraph::new(skeleton_lines(area.width, area.height)), area);
        }
        StatusDisplay::Empty => {
            render_donut(f, &app.metrics, None, chunks[1]);
            render_counters(f, None, chunks[2]);
        }
        StatusDisplay::Ready(record) => {
            render_donut(f, &app.metrics, Some(&record), chunks[1]);
            render_counters(f, Some(&record), chunks[2]);
        }
    }
}

fn period_tabs(current: PeriodKey) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, period) in PeriodKey::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(colors::BORDER)));
        }
        let style = if *period == current {
            Style::default()
                .fg(colors::CHART_BLUE)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(colors::MUTED)
        };
        spans.push(Span::styled(format!("{} {}", i + 1, period.label()), style));
    }
    Line::from(spans)
}

/// Canvas bounds that keep a circle of radius `half_extent` round and fully
/// visible in an area `columns` by `rows` cells
pub fn canvas_bounds(columns: u16, rows: u16, half_extent: f64) -> ([f64; 2], [f64; 2]) {
    if columns == 0 || rows == 0 {
        return ([-half_extent, half_extent], [-half_extent, half_extent]);
    }
    let width = f64::from(columns);
    let height = f64::from(rows) * CELL_ASPECT;
    // Chart units per column width
    let scale = (2.0 * half_extent / width).max(2.0 * half_extent / height);
    let x = width * scale / 2.0;
    let y = height * scale / 2.0;
    ([-x, x], [-y, y])
}

/// Canvas points filling `sector` between the two radii, spaced `step` apart
pub fn ring_points(sector: &Sector, inner: f64, outer: f64, step: f64) -> Vec<(f64, f64)> {
    let span = sector.end_angle - sector.start_angle;
    if span == 0.0 || step <= 0.0 {
        return Vec::new();
    }

    let mut coords = Vec::new();
    let mut radius = inner;
    while radius <= outer {
        let arc = span.abs().to_radians() * radius;
        let samples = (arc / step).ceil().max(1.0) as usize;
        for i in 0..=samples {
            let angle = sector.start_angle + span * i as f64 / samples as f64;
            let p = polar(0.0, 0.0, radius, angle);
            coords.push((p.x, -p.y));
        }
        radius += step;
    }
    coords
}

fn half_extent(metrics: &ViewportMetrics) -> f64 {
    if metrics.labels_visible {
        metrics.outer_radius * metrics.label_scale + metrics.label_width / 2.0
    } else {
        metrics.outer_radius
    }
}

fn render_donut(f: &mut Frame, metrics: &ViewportMetrics, record: Option<&PeriodRecord>, area: Rect) {
    let (x_bounds, y_bounds) = canvas_bounds(area.width, area.height, half_extent(metrics));
    let units_per_column = if area.width > 0 {
        (x_bounds[1] - x_bounds[0]) / f64::from(area.width)
    } else {
        1.0
    };
    let units_per_row = units_per_column * CELL_ASPECT;
    // Braille packs two dots per column
    let step = units_per_column / 2.0;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            match record {
                Some(record) => paint_segments(ctx, metrics, record, step),
                None => {
                    let ring = DonutSweep {
                        padding_angle: 0.0,
                        ..DonutSweep::default()
                    }
                    .layout(&[1.0]);
                    for sector in &ring {
                        ctx.draw(&Points {
                            coords: &ring_points(sector, metrics.inner_radius, metrics.outer_radius, step),
                            color: colors::PLACEHOLDER,
                        });
                    }
                }
            }

            ctx.layer();
            let total = record.map(|r| r.total).unwrap_or(0);
            let total_color = if record.is_some() { Color::White } else { colors::PLACEHOLDER };
            print_centered(
                ctx,
                0.0,
                units_per_row,
                units_per_column,
                Span::styled(
                    total.to_string(),
                    Style::default().fg(total_color).add_modifier(Modifier::BOLD),
                ),
            );
            print_centered(
                ctx,
                0.0,
                -units_per_row,
                units_per_column,
                Span::styled(CENTER_CAPTION, Style::default().fg(colors::MUTED)),
            );
        });

    f.render_widget(canvas, area);
}

fn paint_segments(ctx: &mut Context, metrics: &ViewportMetrics, record: &PeriodRecord, step: f64) {
    let segments = record.segments();
    let weights = segments.map(|s| s.weight);
    let sectors = DonutSweep::default().layout(&weights);

    for (segment, sector) in segments.iter().zip(&sectors) {
        ctx.draw(&Points {
            coords: &ring_points(sector, metrics.inner_radius, metrics.outer_radius, step),
            color: rgb(segment.color),
        });
    }

    ctx.layer();
    for (segment, sector) in segments.iter().zip(&sectors) {
        let label = compute_label(&RadialLabelRequest {
            center_x: 0.0,
            center_y: 0.0,
            mid_angle_degrees: sector.mid_angle,
            inner_radius: metrics.inner_radius,
            outer_radius: metrics.outer_radius,
            fraction_of_whole: sector.fraction,
            slice_color: segment.color,
            viewport_width_px: metrics.viewport_width_px,
        });
        let Some(label) = label else {
            continue;
        };

        let color = rgb(label.color);
        ctx.draw(&CanvasLine {
            x1: label.connector_start.x,
            y1: -label.connector_start.y,
            x2: label.connector_end.x,
            y2: -label.connector_end.y,
            color,
        });
        print_centered(
            ctx,
            label.anchor.x,
            -label.anchor.y,
            step * 2.0,
            Span::styled(
                format!(" {} ", label.text),
                Style::default()
                    .fg(Color::White)
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            ),
        );
    }
}

fn print_centered(ctx: &mut Context, x: f64, y: f64, units_per_column: f64, span: Span<'static>) {
    let half = span.content.width() as f64 * units_per_column / 2.0;
    ctx.print(x - half, y, span);
}

fn render_counters(f: &mut Frame, record: Option<&PeriodRecord>, area: Rect) {
    let boxes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let counters = [
        ("Chưa hoàn thành", record.map(|r| r.planned), colors::AMBER),
        ("Đang sản xuất", record.map(|r| r.in_progress), colors::CHART_BLUE),
        ("Hoàn thành", record.map(|r| r.completed), colors::EMERALD),
    ];

    for ((label, count, color), counter_area) in counters.into_iter().zip(boxes.iter()) {
        let value_color = if count.is_some() { color } else { colors::PLACEHOLDER };
        let lines = vec![
            Line::from(Span::styled(
                count.unwrap_or(0).to_string(),
                Style::default().fg(value_color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(colors::MUTED))),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors::BORDER)),
            );
        f.render_widget(paragraph, *counter_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{viewport_metrics, Point};

    #[test]
    fn test_canvas_bounds_keep_circles_round() {
        let (x, y) = canvas_bounds(80, 20, 100.0);
        assert_eq!(y, [-100.0, 100.0]);
        assert_eq!(x, [-200.0, 200.0]);
        // One row spans twice the units of one column
        let per_column = (x[1] - x[0]) / 80.0;
        let per_row = (y[1] - y[0]) / 20.0;
        assert_eq!(per_row, per_column * CELL_ASPECT);
    }

    #[test]
    fn test_canvas_bounds_tall_area() {
        let (x, y) = canvas_bounds(10, 40, 50.0);
        assert_eq!(x, [-50.0, 50.0]);
        assert!(y[1] >= 50.0);
    }

    #[test]
    fn test_canvas_bounds_empty_area() {
        assert_eq!(canvas_bounds(0, 10, 70.0), ([-70.0, 70.0], [-70.0, 70.0]));
    }

    #[test]
    fn test_ring_points_stay_inside_the_ring() {
        let sectors = DonutSweep::default().layout(&[30.0, 40.0, 30.0]);
        let points = ring_points(&sectors[0], 60.0, 100.0, 2.0);
        assert!(!points.is_empty());
        let origin = Point::default();
        for (x, y) in points {
            let d = Point { x, y }.distance(origin);
            assert!(d >= 60.0 - 1e-9 && d <= 100.0 + 1e-9);
        }
    }

    #[test]
    fn test_ring_points_first_sector_starts_at_top() {
        let sectors = DonutSweep::default().layout(&[30.0, 40.0, 30.0]);
        let points = ring_points(&sectors[0], 60.0, 100.0, 5.0);
        let (x, y) = points[0];
        assert!(x.abs() < 1e-9);
        // Twelve o'clock is positive y on the canvas
        assert!((y - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_width_sector_has_no_points() {
        let sectors = DonutSweep::default().layout(&[0.0, 1.0]);
        assert!(ring_points(&sectors[0], 60.0, 100.0, 1.0).is_empty());
    }

    #[test]
    fn test_half_extent_covers_labels() {
        let wide = viewport_metrics(1280);
        assert_eq!(half_extent(&wide), 100.0 * 1.4 + 25.0);
        let narrow = viewport_metrics(320);
        assert_eq!(half_extent(&narrow), 70.0);
    }
}
