//! Materials to purchase

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::dashboard::app::App;
use crate::dashboard::utils::{centered_row, colors, format_thousands, no_data, skeleton};
use crate::data::MaterialItem;

const SKELETON_ROWS: u16 = 5;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Nguyên Vật Liệu Cần Mua ")
        .border_style(Style::default().fg(colors::BORDER));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.is_loading() {
        let lines = (0..SKELETON_ROWS.min(inner.height / 2))
            .flat_map(|_| [skeleton(usize::from(inner.width.min(30))), Line::from("")])
            .collect::<Vec<_>>();
        f.render_widget(Paragraph::new(lines), inner);
        return;
    }

    match app.dataset().map(|d| d.materials_needed.as_slice()) {
        Some(items) if !items.is_empty() => f.render_widget(material_table(items), inner),
        _ => f.render_widget(no_data(), centered_row(inner)),
    }
}

fn material_table(items: &[MaterialItem]) -> Table<'static> {
    let header = Row::new(vec![
        Cell::from("STT"),
        Cell::from("Nguyên vật liệu"),
        Cell::from("Đơn vị tính"),
        Cell::from(Line::from("Số lượng").alignment(Alignment::Right)),
    ])
    .style(Style::default().fg(colors::MUTED))
    .bottom_margin(1);

    let rows = items.iter().map(|item| {
        Row::new(vec![
            Cell::from(item.rank.to_string()),
            Cell::from(Text::from(vec![
                Line::styled(item.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Line::styled(item.kind.clone(), Style::default().fg(colors::MUTED)),
            ])),
            Cell::from(item.unit.clone()),
            Cell::from(Line::from(format_thousands(item.quantity)).alignment(Alignment::Right)),
        ])
        .height(2)
    });

    Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(45),
            Constraint::Percentage(25),
            Constraint::Min(8),
        ],
    )
    .header(header)
}
