//! Order status counters

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::dashboard::app::App;
use crate::dashboard::utils::{colors, skeleton_lines, status_color};

const EMPTY_LABELS: [&str; 3] = ["Chưa hoàn thành", "Đang sản xuất", "Hoàn thành"];

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::BORDER));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.is_loading() {
        f.render_widget(Paragraph::new(skeleton_lines(inner.width, inner.height)), inner);
        return;
    }

    let counters: Vec<(u32, &str, _)> = match app.dataset() {
        Some(data) if !data.status_summary.is_empty() => data
            .status_summary
            .iter()
            .map(|item| (item.count, item.label.as_str(), status_color(item.color)))
            .collect(),
        _ => EMPTY_LABELS
            .iter()
            .map(|label| (0, *label, colors::PLACEHOLDER))
            .collect(),
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Ratio(1, counters.len() as u32);
            counters.len()
        ])
        .split(inner);

    for ((count, label, color), column) in counters.into_iter().zip(columns.iter()) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                count.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label.to_string(), Style::default().fg(colors::MUTED))),
        ];
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), *column);
    }
}
