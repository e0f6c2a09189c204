//! Terminal event forwarding for the dashboard loop
//!
//! A dedicated thread blocks on crossterm input and forwards key presses,
//! resizes and idle ticks into a channel the async loop can `select!` on.

use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    /// New terminal size in columns and rows
    Resize(u16, u16),
    Tick,
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Start forwarding events, emitting a tick after `tick_rate` of silence
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        thread::spawn(move || loop {
            let forwarded = match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        tx.send(AppEvent::Key(key))
                    }
                    Ok(Event::Resize(columns, rows)) => tx.send(AppEvent::Resize(columns, rows)),
                    Ok(_) => Ok(()),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read terminal event");
                        break;
                    }
                },
                Ok(false) => tx.send(AppEvent::Tick),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to poll terminal events");
                    break;
                }
            };
            // Receiver dropped, the dashboard is shutting down
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx }
    }

    /// Next event, or `None` once the input thread has stopped
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}
