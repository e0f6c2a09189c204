//! Production plan bar chart: planned vs actual per category

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::dashboard::app::App;
use crate::dashboard::utils::{colors, skeleton_lines, truncate_str};
use crate::data::ProductionPlanEntry;

const BAR_WIDTH: u16 = 3;
const GROUP_GAP: u16 = 2;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Kế Hoạch Sản Xuất ")
        .border_style(Style::default().fg(colors::BORDER));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.is_loading() {
        f.render_widget(Paragraph::new(skeleton_lines(inner.width, inner.height)), inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let plan = app
        .dataset()
        .map(|d| d.production_plan.as_slice())
        .filter(|plan| !plan.is_empty());

    let unit = if plan.is_some() { "Cái" } else { "Đơn vị" };
    f.render_widget(Paragraph::new(legend(unit)), chunks[0]);

    match plan {
        Some(plan) => render_bars(f, plan, chunks[1]),
        None => render_empty_axis(f, chunks[1]),
    }
}

fn legend(unit: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}   ", unit), Style::default().fg(colors::MUTED)),
        Span::styled("● ", Style::default().fg(colors::BLUE)),
        Span::raw("Kế hoạch  "),
        Span::styled("● ", Style::default().fg(colors::EMERALD)),
        Span::raw("Thực hiện"),
    ])
}

fn render_bars(f: &mut Frame, plan: &[ProductionPlanEntry], area: Rect) {
    let label_width = usize::from(BAR_WIDTH * 2 + GROUP_GAP);
    let max = plan
        .iter()
        .map(|entry| entry.planned.max(entry.actual))
        .max()
        .unwrap_or(0)
        .max(100);

    let mut chart = BarChart::default()
        .bar_width(BAR_WIDTH)
        .bar_gap(0)
        .group_gap(GROUP_GAP)
        .max(u64::from(max));

    for entry in plan {
        let bars = [
            Bar::default()
                .value(u64::from(entry.planned))
                .style(Style::default().fg(colors::BLUE)),
            Bar::default()
                .value(u64::from(entry.actual))
                .style(Style::default().fg(colors::EMERALD)),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(truncate_str(&entry.category, label_width)))
                .bars(&bars),
        );
    }

    f.render_widget(chart, area);
}

fn render_empty_axis(f: &mut Frame, area: Rect) {
    let ticks = ["100", "80", "60", "40", "20", "0"];
    let rows = usize::from(area.height);
    let mut lines = vec![Line::from(""); rows];
    for (i, tick) in ticks.iter().enumerate() {
        let row = if ticks.len() > 1 {
            i * rows.saturating_sub(1) / (ticks.len() - 1)
        } else {
            0
        };
        if let Some(line) = lines.get_mut(row) {
            *line = Line::from(Span::styled(*tick, Style::default().fg(colors::MUTED)));
        }
    }
    f.render_widget(Paragraph::new(lines), area);
}
