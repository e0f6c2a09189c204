use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::period::PeriodKey;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Simulated fetch latency of the mock provider
    pub latency_ms: u64,
    /// Start in the "has data" state
    pub has_data: bool,
    /// Initial reporting period of the production status panel
    pub period: PeriodKey,
    /// Redraw interval of the terminal UI
    pub tick_rate_ms: u64,
    /// Pixels per terminal column used to map the terminal to breakpoints
    pub cell_width_px: u32,
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            latency_ms: 500,
            has_data: true,
            period: PeriodKey::Today,
            tick_rate_ms: 250,
            cell_width_px: 8,
            log_file: "mrp-dashboard.log".to_string(),
        }
    }
}

impl Config {
    pub fn get_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "mrp", "mrp-dashboard")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }

    /// Load from the platform config directory, or defaults when no file exists
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path().ok_or(ConfigError::DirectoryUnavailable)?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let config_data = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::LoadFailed(format!("{}: {}", config_path.display(), e)))?;

        let config: Config = serde_json::from_str(&config_data)
            .map_err(|e| ConfigError::LoadFailed(format!("{}: {}", config_path.display(), e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path().ok_or(ConfigError::DirectoryUnavailable)?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        }

        let config_data = serde_json::to_string_pretty(self)?;
        fs::write(config_path, config_data).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_ms == 0 {
            return Err(invalid("tick_rate_ms", self.tick_rate_ms).into());
        }
        if self.cell_width_px == 0 {
            return Err(invalid("cell_width_px", self.cell_width_px).into());
        }
        if self.log_file.trim().is_empty() {
            return Err(invalid("log_file", "\"\"").into());
        }
        Ok(())
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Viewport width in pixels for a terminal `columns` wide
    pub fn viewport_width_px(&self, columns: u16) -> u32 {
        u32::from(columns) * self.cell_width_px
    }
}

fn invalid(field: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}
