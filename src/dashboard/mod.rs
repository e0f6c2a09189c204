//! Terminal dashboard for the production planning overview
//!
//! Renders the mock dataset into a grid of panels and reacts to keyboard
//! input while fetches settle in the background.

pub mod app;
pub mod events;
pub mod messages;
pub mod panels;
pub mod ui;
pub mod utils;

pub use app::App;
pub use events::{AppEvent, EventHandler};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::info;

use crate::config::Config;
use crate::error::DashboardError;

/// Run the terminal dashboard until the user quits
pub async fn run_dashboard(config: Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode().map_err(|e| DashboardError::Terminal(format!("raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| DashboardError::Terminal(format!("alternate screen: {}", e)))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let columns = terminal.size()?.width;
    let tick_rate = config.tick_rate();
    let mut app = App::new(config, columns);
    info!(columns, width_px = app.viewport_width_px, "Dashboard started");

    let res = run_app(&mut terminal, &mut app, EventHandler::new(tick_rate)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Dashboard stopped");
    res
}

/// Main application loop
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut events: EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        tokio::select! {
            state = app.provider.settled() => app.apply_settlement(state),
            event = events.next() => match event {
                Some(AppEvent::Key(key)) => {
                    if !app.handle_key(key) {
                        break;
                    }
                }
                Some(AppEvent::Resize(columns, _)) => app.handle_resize(columns),
                Some(AppEvent::Tick) => app.on_tick(),
                None => break,
            },
        }
    }

    Ok(())
}
