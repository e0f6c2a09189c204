//! Main UI rendering logic

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{App, AppMode};
use super::panels::{
    materials_needed, production_chart, production_progress, production_status, stats_cards,
    status_summary, top_customers,
};
use super::utils::get_message_style;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Column counts of the two chart rows for a given viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    /// Production plan and top customers, side by side from 1280 px
    pub chart_columns: u16,
    /// Status, progress and materials, side by side from 1024 px
    pub bottom_columns: u16,
}

pub fn page_layout(viewport_width_px: u32) -> PageLayout {
    PageLayout {
        chart_columns: if viewport_width_px >= 1280 { 2 } else { 1 },
        bottom_columns: if viewport_width_px >= 1024 { 3 } else { 1 },
    }
}

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();

    if app.fullscreen {
        render_content(f, app, size);
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Dashboard
                Constraint::Length(5), // Messages
                Constraint::Length(3), // Footer
            ])
            .split(size);

        render_header(f, app, chunks[0]);
        render_content(f, app, chunks[1]);
        render_messages(f, app, chunks[2]);
        render_footer(f, app, chunks[3]);
    }

    if app.is_loading() && app.mode == AppMode::Normal {
        render_loading_overlay(f, app, size);
    }
}

fn render_content(f: &mut Frame, app: &App, area: Rect) {
    match app.mode {
        AppMode::Help => render_help(f, area),
        AppMode::Normal => render_dashboard(f, app, area),
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let mode = if app.has_data {
        "Có dữ liệu"
    } else {
        "Không có dữ liệu"
    };
    let updated = app
        .last_updated
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Bảng Điều Khiển Sản Xuất ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("│ {} ", mode), Style::default().fg(Color::White)),
        Span::styled(
            format!("│ Cập nhật: {} ", updated),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("│ {}px", app.viewport_width_px),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let layout = page_layout(app.viewport_width_px);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Top products
            Constraint::Length(5), // Status summary
            Constraint::Percentage(40),
            Constraint::Min(0),
        ])
        .split(area);

    stats_cards::render(f, app, rows[0]);
    status_summary::render(f, app, rows[1]);

    let charts = split_columns(rows[2], layout.chart_columns, 2);
    production_chart::render(f, app, charts[0]);
    top_customers::render(f, app, charts[1]);

    let bottom = split_columns(rows[3], layout.bottom_columns, 3);
    production_status::render(f, app, bottom[0]);
    production_progress::render(f, app, bottom[1]);
    materials_needed::render(f, app, bottom[2]);
}

/// Split `area` into `count` panels laid out `columns` per row
fn split_columns(area: Rect, columns: u16, count: u16) -> Vec<Rect> {
    let columns = columns.clamp(1, count);
    let rows = (count + columns - 1) / columns;

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, u32::from(rows)); usize::from(rows)])
        .split(area);

    row_areas
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![
                    Constraint::Ratio(1, u32::from(columns));
                    usize::from(columns)
                ])
                .split(*row)
                .to_vec()
        })
        .take(usize::from(count))
        .collect()
}

fn render_help(f: &mut Frame, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled(
            "Phím tắt",
            bold.fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(Span::styled("Dữ liệu:", bold)),
        Line::from("  t             Chuyển trạng thái có / không có dữ liệu"),
        Line::from("  r             Tải lại dữ liệu"),
        Line::from(""),
        Line::from(Span::styled("Kỳ báo cáo:", bold)),
        Line::from("  p / Tab       Kỳ tiếp theo"),
        Line::from("  P / Shift+Tab Kỳ trước"),
        Line::from("  1-4           Hôm nay / Tháng này / Quý này / Năm nay"),
        Line::from(""),
        Line::from(Span::styled("Chung:", bold)),
        Line::from("  f             Bật / tắt toàn màn hình"),
        Line::from("  ?             Hiển thị trợ giúp"),
        Line::from("  q / Esc       Thoát"),
        Line::from(""),
        Line::from(Span::styled(
            "Nhấn phím bất kỳ để quay lại...",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Trợ giúp ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(paragraph, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let visible = usize::from(area.height.saturating_sub(2)).max(1);
    let mut lines: Vec<Line> = app
        .messages
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|msg| {
            let style = get_message_style(msg.message_type);
            Line::from(vec![
                Span::styled(
                    msg.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{} ", msg.icon()), style),
                Span::styled(msg.text.as_str(), style),
            ])
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Sẵn sàng",
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Thông báo ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.mode {
        AppMode::Normal => {
            let toggle = if app.has_data {
                "Hiển thị trạng thái không có dữ liệu"
            } else {
                "Hiển thị trạng thái có dữ liệu"
            };
            format!(
                "[t] {}  [r] Tải lại  [p/Tab] Kỳ tiếp  [P] Kỳ trước  [1-4] Chọn kỳ  [f] Toàn màn hình  [?] Trợ giúp  [q] Thoát",
                toggle
            )
        }
        AppMode::Help => "Nhấn phím bất kỳ để quay lại".to_string(),
    };

    let footer = Paragraph::new(shortcuts)
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    f.render_widget(footer, area);
}

/// Spinner glyph for the current tick
pub fn spinner_frame(ticks: u64) -> &'static str {
    SPINNER_FRAMES[(ticks % SPINNER_FRAMES.len() as u64) as usize]
}

fn render_loading_overlay(f: &mut Frame, app: &App, area: Rect) {
    let popup_width = 36.min(area.width);
    let popup_height = 3.min(area.height);
    let popup_area = Rect {
        x: area.x + area.width.saturating_sub(popup_width) / 2,
        y: area.y + area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    let text = Line::from(vec![
        Span::styled(
            format!("{} ", spinner_frame(app.ticks)),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Đang tải dữ liệu...", Style::default().fg(Color::White)),
    ]);

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Center);

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::period::PeriodKey;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    const COLUMNS: u16 = 200;
    const ROWS: u16 = 60;

    fn buffer_text(buffer: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(COLUMNS, ROWS)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    async fn settled_app(has_data: bool) -> App {
        let config = Config {
            has_data,
            ..Config::default()
        };
        let mut app = App::new(config, COLUMNS);
        let settled = app.provider.settled().await;
        app.apply_settlement(settled);
        app
    }

    #[test]
    fn test_page_layout_breakpoints() {
        assert_eq!(
            page_layout(1920),
            PageLayout {
                chart_columns: 2,
                bottom_columns: 3
            }
        );
        assert_eq!(page_layout(1279).chart_columns, 1);
        assert_eq!(page_layout(1100).bottom_columns, 3);
        assert_eq!(page_layout(1023).bottom_columns, 1);
    }

    #[test]
    fn test_split_columns() {
        let area = Rect::new(0, 0, 90, 30);
        let three = split_columns(area, 3, 3);
        assert_eq!(three.len(), 3);
        assert!(three.iter().all(|r| r.y == 0 && r.height == 30));

        let stacked = split_columns(area, 1, 3);
        assert_eq!(stacked.len(), 3);
        assert!(stacked.iter().all(|r| r.width == 90));
        assert!(stacked[1].y > stacked[0].y);
    }

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner_frame(0), spinner_frame(10));
        assert_ne!(spinner_frame(0), spinner_frame(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_renders_loading_state() {
        let app = App::new(Config::default(), COLUMNS);
        let text = render(&app);
        assert!(text.contains("Đang tải dữ liệu..."));
        assert!(text.contains("--:--:--"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_renders_dataset() {
        let app = settled_app(true).await;
        let text = render(&app);
        assert!(text.contains("Tình Hình Sản Xuất · Hôm nay"));
        assert!(text.contains("Lệnh sản xuất"));
        assert!(text.contains("Chỉ cotton"));
        assert!(text.contains("123 cái (50%)"));
        assert!(text.contains("Đã tải dữ liệu"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_renders_empty_state() {
        let app = settled_app(false).await;
        let text = render(&app);
        assert!(text.contains("Chưa có dữ liệu"));
        assert!(text.contains("Chưa có một hàng"));
        assert!(text.contains("Đơn vị"));
        assert!(text.contains("Hiển thị trạng thái có dữ liệu"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_period_in_status_title() {
        let mut app = settled_app(true).await;
        app.select_period(PeriodKey::ThisYear);
        let text = render(&app);
        assert!(text.contains("Tình Hình Sản Xuất · Năm nay"));
        assert!(text.contains("1200"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fullscreen_hides_chrome() {
        let mut app = settled_app(true).await;
        assert!(render(&app).contains("Thông báo"));
        app.toggle_fullscreen();
        let text = render(&app);
        assert!(!text.contains("Thông báo"));
        assert!(!text.contains("Bảng Điều Khiển Sản Xuất"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_help_screen() {
        let mut app = settled_app(true).await;
        app.mode = AppMode::Help;
        let text = render(&app);
        assert!(text.contains("Phím tắt"));
        assert!(text.contains("Nhấn phím bất kỳ để quay lại"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_narrow_terminal_does_not_panic() {
        let app = settled_app(true).await;
        let mut terminal = Terminal::new(TestBackend::new(30, 12)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
    }
}
