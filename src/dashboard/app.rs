//! Application state and logic for the dashboard UI

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

use crate::config::Config;
use crate::data::DashboardDataset;
use crate::geometry::{viewport_metrics, ViewportMetrics};
use crate::period::{PeriodKey, PeriodSelector, StatusDisplay};
use crate::provider::{DataState, MockDataProvider};

use super::messages::{Message, MessageType};

const MAX_MESSAGES: usize = 20;
const SUPERSEDED: &str = "Đã hủy lần tải trước";

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Help,
}

/// Main application state
///
/// Owns every piece of mutable UI state. Panels only ever get `&App`.
pub struct App {
    pub config: Config,
    pub provider: MockDataProvider,
    /// Latest emission of the provider
    pub data: DataState,
    /// Requested data mode, flipped by the data toggle
    pub has_data: bool,
    pub periods: PeriodSelector,
    pub viewport_width_px: u32,
    pub metrics: ViewportMetrics,
    pub fullscreen: bool,
    pub mode: AppMode,
    pub messages: Vec<Message>,
    /// Time of the latest settlement
    pub last_updated: Option<DateTime<Local>>,
    /// Idle ticks, drives the loading spinner
    pub ticks: u64,
}

impl App {
    /// Create the app and start the first fetch
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(config: Config, columns: u16) -> Self {
        let mut provider = MockDataProvider::new(config.latency());
        let has_data = config.has_data;
        let data = provider.request(has_data).unwrap_or_else(|| provider.state());
        let viewport_width_px = config.viewport_width_px(columns);

        App {
            periods: PeriodSelector::new(config.period),
            metrics: viewport_metrics(viewport_width_px),
            viewport_width_px,
            config,
            provider,
            data,
            has_data,
            fullscreen: false,
            mode: AppMode::Normal,
            messages: vec![Message::new(MessageType::Info, "Đang tải dữ liệu...")],
            last_updated: None,
            ticks: 0,
        }
    }

    pub fn dataset(&self) -> Option<&DashboardDataset> {
        self.data.dataset()
    }

    pub fn is_loading(&self) -> bool {
        self.data.is_loading
    }

    pub fn period(&self) -> PeriodKey {
        self.periods.current()
    }

    /// State of the production status panel
    pub fn status_display(&self) -> StatusDisplay {
        self.periods.display(self.dataset(), self.is_loading())
    }

    /// Record a settlement from the provider
    pub fn apply_settlement(&mut self, state: DataState) {
        self.last_updated = Some(Local::now());
        let text = if state.data.is_some() {
            "Đã tải dữ liệu"
        } else {
            "Không có dữ liệu"
        };
        self.data = state;
        self.push_message(MessageType::Success, text);
    }

    pub fn push_message(&mut self, message_type: MessageType, text: impl Into<String>) {
        self.messages.push(Message::new(message_type, text));
        if self.messages.len() > MAX_MESSAGES {
            let excess = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(..excess);
        }
    }

    /// Flip between the dataset and the empty state
    pub fn toggle_data(&mut self) {
        self.has_data = !self.has_data;
        info!(has_data = self.has_data, "Data mode toggled");
        let superseding = self.provider.is_pending();
        if let Some(loading) = self.provider.request(self.has_data) {
            self.data = loading;
            if superseding {
                self.push_message(MessageType::Warning, SUPERSEDED);
            }
        }
        let text = if self.has_data {
            "Hiển thị trạng thái có dữ liệu"
        } else {
            "Hiển thị trạng thái không có dữ liệu"
        };
        self.push_message(MessageType::Info, text);
    }

    pub fn reload(&mut self) {
        if self.provider.is_pending() {
            self.push_message(MessageType::Warning, SUPERSEDED);
        }
        self.data = self.provider.reload();
        self.push_message(MessageType::Info, "Đang tải lại dữ liệu...");
    }

    pub fn select_period(&mut self, period: PeriodKey) {
        let live = self.dataset().map(|d| d.production_status);
        let record = self.periods.select(period, live.as_ref());
        info!(period = ?period, total = record.total, "Period selected");
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        info!(fullscreen = self.fullscreen, "Fullscreen toggled");
    }

    /// Recompute viewport dependent geometry for a terminal `columns` wide
    pub fn handle_resize(&mut self, columns: u16) {
        self.viewport_width_px = self.config.viewport_width_px(columns);
        self.metrics = viewport_metrics(self.viewport_width_px);
        tracing::debug!(columns, width_px = self.viewport_width_px, "Viewport resized");
    }

    pub fn on_tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    /// Handle keyboard events, returning `false` when the app should exit
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            return false;
        }
        match self.mode {
            AppMode::Normal => self.handle_normal_mode(event),
            AppMode::Help => {
                self.mode = AppMode::Normal;
                true
            }
        }
    }

    fn handle_normal_mode(&mut self, event: KeyEvent) -> bool {
        match event.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return false;
            }
            KeyCode::Char('?') => {
                self.mode = AppMode::Help;
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.toggle_data();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.reload();
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.toggle_fullscreen();
            }
            KeyCode::Char('p') | KeyCode::Tab => {
                let next = self.period().next();
                self.select_period(next);
            }
            KeyCode::Char('P') | KeyCode::BackTab => {
                let previous = self.period().previous();
                self.select_period(previous);
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.select_period(PeriodKey::from_index(index));
            }
            _ => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_config() -> Config {
        Config {
            latency_ms: 500,
            ..Config::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_app_is_loading() {
        let app = App::new(test_config(), 160);
        assert!(app.is_loading());
        assert!(app.dataset().is_none());
        assert_eq!(app.viewport_width_px, 1280);
        assert_eq!(app.metrics.label_scale, 1.4);
        assert_eq!(app.status_display(), StatusDisplay::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settlement_feeds_status_panel() {
        let mut app = App::new(test_config(), 160);
        let settled = app.provider.settled().await;
        app.apply_settlement(settled);

        assert!(app.last_updated.is_some());
        match app.status_display() {
            StatusDisplay::Ready(record) => assert_eq!(record.total, 16),
            other => panic!("unexpected display {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_data_twice_settles_once() {
        let mut app = App::new(test_config(), 100);
        let settled = app.provider.settled().await;
        app.apply_settlement(settled);

        app.toggle_data();
        assert!(app.is_loading());
        assert!(app.dataset().is_some());
        tokio::time::advance(Duration::from_millis(100)).await;
        app.toggle_data();

        let settled = app.provider.settled().await;
        assert!(settled.data.is_some());
        app.apply_settlement(settled);
        assert!(!app.provider.is_pending());
        assert!(app
            .messages
            .iter()
            .any(|m| m.message_type == MessageType::Warning && m.text == SUPERSEDED));
    }

    #[tokio::test(start_paused = true)]
    async fn test_period_keys() {
        let mut app = App::new(test_config(), 100);
        assert!(app.handle_key(key(KeyCode::Char('p'))));
        assert_eq!(app.period(), PeriodKey::ThisMonth);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.period(), PeriodKey::Today);
        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.period(), PeriodKey::ThisQuarter);
        app.handle_key(key(KeyCode::Char('P')));
        assert_eq!(app.period(), PeriodKey::ThisMonth);
    }

    #[tokio::test(start_paused = true)]
    async fn test_period_change_while_loading() {
        let mut app = App::new(test_config(), 100);
        app.handle_key(key(KeyCode::Char('4')));
        assert_eq!(app.status_display(), StatusDisplay::Loading);

        let settled = app.provider.settled().await;
        app.apply_settlement(settled);
        match app.status_display() {
            StatusDisplay::Ready(record) => assert_eq!(record.total, 1200),
            other => panic!("unexpected display {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_help_and_quit() {
        let mut app = App::new(test_config(), 100);
        app.handle_key(key(KeyCode::Char('?')));
        assert_eq!(app.mode, AppMode::Help);
        // Any key leaves help without quitting
        assert!(app.handle_key(key(KeyCode::Char('q'))));
        assert_eq!(app.mode, AppMode::Normal);
        assert!(!app.handle_key(key(KeyCode::Char('q'))));
        assert!(!app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_and_fullscreen() {
        let mut app = App::new(test_config(), 100);
        app.handle_resize(40);
        assert_eq!(app.viewport_width_px, 320);
        assert!(!app.metrics.labels_visible);

        app.handle_key(key(KeyCode::Char('f')));
        assert!(app.fullscreen);
        app.handle_key(key(KeyCode::Char('f')));
        assert!(!app.fullscreen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_message_history_is_bounded() {
        let mut app = App::new(test_config(), 100);
        for i in 0..50 {
            app.push_message(MessageType::Info, format!("message {}", i));
        }
        assert_eq!(app.messages.len(), MAX_MESSAGES);
        assert_eq!(app.messages.last().unwrap().text, "message 49");
    }
}
