//! Error types for the dashboard shell
//!
//! The data provider, label geometry and period aggregator are total and have
//! no error channel. Everything that can fail lives around them: loading the
//! configuration file, driving the terminal, and exporting snapshots.

use thiserror::Error;

/// Main error type for the dashboard application
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the configuration directory")]
    DirectoryUnavailable,

    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration file: {0}")]
    SaveFailed(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Result type alias for the dashboard
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::Config(ConfigError::DirectoryUnavailable);
        assert!(err.to_string().contains("configuration directory"));

        let err = DashboardError::Terminal("raw mode".to_string());
        assert_eq!(err.to_string(), "Terminal error: raw mode");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DashboardError = io_err.into();
        assert!(matches!(err, DashboardError::Io(_)));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(matches!(err, DashboardError::Json(_)));
    }

    #[test]
    fn test_invalid_value_message() {
        let err = ConfigError::InvalidValue {
            field: "tick_rate_ms".to_string(),
            value: "0".to_string(),
        };
        assert!(err.to_string().contains("tick_rate_ms"));
        assert!(err.to_string().contains('0'));
    }
}
