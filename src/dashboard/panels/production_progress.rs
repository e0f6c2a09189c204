//! Production progress per product group

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph},
    Frame,
};

use crate::dashboard::app::App;
use crate::dashboard::utils::{centered_row, colors, no_data, skeleton, truncate_str};
use crate::data::ProgressItem;
use unicode_width::UnicodeWidthStr;

const SKELETON_ROWS: usize = 7;
/// Label line plus gauge line
const ROW_HEIGHT: u16 = 2;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Tiến Độ Sản Xuất Theo Nhóm ")
        .border_style(Style::default().fg(colors::BORDER));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = |count: usize| {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                (0..count)
                    .map(|_| Constraint::Length(ROW_HEIGHT))
                    .chain(std::iter::once(Constraint::Min(0)))
                    .collect::<Vec<_>>(),
            )
            .split(inner)
    };

    if app.is_loading() {
        let width = usize::from(inner.width);
        for row in rows(SKELETON_ROWS).iter().take(SKELETON_ROWS) {
            let lines = vec![skeleton(width.min(20)), skeleton(width)];
            f.render_widget(Paragraph::new(lines), *row);
        }
        return;
    }

    let items = match app.dataset().map(|d| d.production_progress.as_slice()) {
        Some(items) if !items.is_empty() => items,
        _ => {
            f.render_widget(no_data(), centered_row(inner));
            return;
        }
    };

    for (item, row) in items.iter().zip(rows(items.len()).iter()) {
        render_item(f, item, *row);
    }
}

/// Right hand side of the label line, e.g. `123 cái (50%)`
pub fn amount_text(item: &ProgressItem) -> String {
    format!("{} cái ({}%)", item.value, item.percentage)
}

fn render_item(f: &mut Frame, item: &ProgressItem, area: Rect) {
    let amount = amount_text(item);
    let amount_width = amount.width() as u16;

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);
    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(amount_width)])
        .split(parts[0]);

    let label = truncate_str(&item.label, usize::from(header[0].width.saturating_sub(1)));
    f.render_widget(
        Paragraph::new(Span::styled(label, Style::default().add_modifier(Modifier::BOLD))),
        header[0],
    );
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(format!("{} cái ", item.value)),
            Span::styled(
                format!("({}%)", item.percentage),
                Style::default().fg(colors::MUTED),
            ),
        ]))
        .alignment(Alignment::Right),
        header[1],
    );

    let ratio = f64::from(item.percentage.min(100)) / 100.0;
    let gauge = LineGauge::default()
        .ratio(ratio)
        .label("")
        .line_set(symbols::line::THICK)
        .gauge_style(Style::default().fg(colors::EMERALD).bg(colors::SKELETON));
    f.render_widget(gauge, parts[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DashboardDataset;

    #[test]
    fn test_amount_text() {
        let data = DashboardDataset::fixture();
        assert_eq!(amount_text(&data.production_progress[0]), "123 cái (50%)");
        assert_eq!(amount_text(&data.production_progress[5]), "765 cái (15%)");
    }
}
