//! Logging configuration using the tracing framework
//!
//! Logs can be controlled via the RUST_LOG environment variable. The terminal
//! dashboard owns stdout, so while it runs logs only go to a rolling file.

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "mrp_dashboard=info,warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize logging to stderr
///
/// Used by the headless `snapshot` command so that stdout stays clean JSON.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Controls log level (e.g., "debug", "info", "warn", "error")
///   - Default: "mrp_dashboard=info,warn"
///   - Examples:
///     - `RUST_LOG=mrp_dashboard::provider=debug` - provider timing only
///     - `RUST_LOG=trace` - everything
pub fn init() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .with_file(false),
        )
        .init();
}

/// Directory that holds the rolling log files
pub fn log_dir() -> std::io::Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "mrp", "mrp-dashboard") {
        let log_path = proj_dirs.data_dir().join("logs");
        std::fs::create_dir_all(&log_path)?;
        Ok(log_path)
    } else {
        std::env::current_dir()
    }
}

/// Initialize logging with file output only
///
/// Writes to a daily rolling file under [`log_dir`]. The returned guard must
/// be held until the application exits or buffered lines are lost.
pub fn init_with_file(log_file_name: &str) -> std::io::Result<WorkerGuard> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir()?, log_file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Ok(guard)
}

/// Initialize logging for tests
///
/// Only errors are shown by default.
pub fn init_test() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_test_writer())
        .try_init()
        .ok(); // Ignore errors if already initialized
}
