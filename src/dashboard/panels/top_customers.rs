//! Top customers by produced volume

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::dashboard::app::App;
use crate::dashboard::utils::{
    centered_row, colors, format_thousands, no_data, skeleton_lines, truncate_str,
};
use crate::data::CustomerVolume;

const NAME_WIDTH: usize = 24;
const AXIS_MAX: u32 = 3500;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Top 5 Khách Hàng Có Sản Lượng Nhiều Nhất ")
        .border_style(Style::default().fg(colors::BORDER));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.is_loading() {
        f.render_widget(Paragraph::new(skeleton_lines(inner.width, inner.height)), inner);
        return;
    }

    let customers = match app.dataset().map(|d| d.top_customers.as_slice()) {
        Some(customers) if !customers.is_empty() => customers,
        _ => {
            f.render_widget(no_data(), centered_row(inner));
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    f.render_widget(
        Paragraph::new(Line::styled("Khách hàng", Style::default().fg(colors::MUTED))),
        chunks[0],
    );
    if chunks[1].is_empty() {
        return;
    }
    // Labels get at most half the width, the bars need the rest
    let name_width = NAME_WIDTH.min(usize::from(chunks[1].width / 2));
    f.render_widget(customer_chart(customers, name_width), chunks[1]);
}

fn customer_chart(customers: &[CustomerVolume], name_width: usize) -> BarChart<'static> {
    let bars = customers
        .iter()
        .map(|customer| {
            Bar::default()
                .value(u64::from(customer.value))
                .label(Line::from(truncate_str(&customer.name, name_width)))
                .text_value(format_thousands(customer.value))
                .style(Style::default().fg(colors::BLUE))
        })
        .collect::<Vec<_>>();

    let max = customers.iter().map(|c| c.value).max().unwrap_or(0).max(AXIS_MAX);

    BarChart::default()
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .max(u64::from(max))
        .data(BarGroup::default().bars(&bars))
}
