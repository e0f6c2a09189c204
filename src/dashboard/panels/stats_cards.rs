//! Top produced products KPI cards

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::dashboard::app::App;
use crate::dashboard::utils::{colors, format_change, skeleton, truncate_str};
use crate::data::{ProductStat, Trend};

const CARD_COUNT: usize = 5;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .title(" Top Sản Phẩm Sản Xuất Nhiều Nhất ")
        .border_style(Style::default().fg(colors::BORDER));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, CARD_COUNT as u32); CARD_COUNT])
        .split(inner);

    let products = app.dataset().map(|d| d.top_products.as_slice());
    for (i, card_area) in cards.iter().enumerate() {
        let lines = match products {
            _ if app.is_loading() => loading_lines(card_area.width),
            Some(products) => match products.get(i) {
                Some(stat) => stat_lines(stat, card_area.width),
                None => empty_lines(),
            },
            None => empty_lines(),
        };

        let card = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::BORDER)),
        );
        f.render_widget(card, *card_area);
    }
}

fn loading_lines(width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.saturating_sub(2));
    vec![
        skeleton(width.min(6)),
        skeleton(width.min(12)),
        skeleton(width.min(10)),
    ]
}

fn empty_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "0",
            Style::default()
                .fg(colors::PLACEHOLDER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Chưa có một hàng",
            Style::default().fg(colors::MUTED),
        )),
    ]
}

fn stat_lines(stat: &ProductStat, width: u16) -> Vec<Line<'static>> {
    let mut head = vec![Span::styled(
        stat.value.to_string(),
        Style::default()
            .fg(colors::CHART_BLUE)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(change) = stat.change.filter(|c| *c != 0.0) {
        let (arrow, color) = match stat.trend {
            Some(Trend::Down) => ("▼", colors::RED),
            _ => ("▲", colors::EMERALD),
        };
        head.push(Span::raw("  "));
        head.push(Span::styled(
            format!("{} {}", arrow, format_change(change)),
            Style::default().fg(color),
        ));
    }

    vec![
        Line::from(head),
        Line::from(""),
        Line::from(truncate_str(&stat.label, usize::from(width.saturating_sub(2)))),
    ]
}
