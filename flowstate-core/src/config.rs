//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/flowstate/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/flowstate/` (~/.config/flowstate/)
//! - Data: `$XDG_DATA_HOME/flowstate/` (~/.local/share/flowstate/)
//! - State/Logs: `$XDG_STATE_HOME/flowstate/` (~/.local/state/flowstate/)

use crate::analytics::SnapshotOptions;
use crate::analytics::streak::DEFAULT_GRACE_DAYS;
use crate::error::{Error, Result};
use chrono::Weekday;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Analytics configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// First day of a heatmap week
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

/// Analytics configuration
#[derive(Debug, Deserialize)]
pub struct AnalyticsConfig {
    /// Weekday every heatmap row starts on
    #[serde(default)]
    pub week_start: WeekStart,

    /// Days without a completed topic before the current streak breaks
    #[serde(default = "default_grace_days")]
    pub grace_days: i64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            week_start: WeekStart::default(),
            grace_days: default_grace_days(),
        }
    }
}

impl AnalyticsConfig {
    /// Options for [`compute_snapshot_with`](crate::analytics::compute_snapshot_with).
    pub fn snapshot_options(&self) -> SnapshotOptions {
        SnapshotOptions {
            week_start: self.week_start.weekday(),
            grace_days: self.grace_days,
        }
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.grace_days < 0 {
            return Err(Error::Config(
                "analytics.grace_days must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_grace_days() -> i64 {
    DEFAULT_GRACE_DAYS
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        config.analytics.validate()?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/flowstate/config.toml` (~/.config/flowstate/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("flowstate").join("config.toml")
    }

    /// Returns the data directory path (for SQLite database)
    ///
    /// `$XDG_DATA_HOME/flowstate/` (~/.local/share/flowstate/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("flowstate")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/flowstate/` (~/.local/state/flowstate/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("flowstate")
    }

    /// Returns the database file path
    ///
    /// `$XDG_DATA_HOME/flowstate/flowstate.db`
    pub fn database_path() -> PathBuf {
        Self::data_dir().join("flowstate.db")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/flowstate/flowstate.log`
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("flowstate.log")
    }
}
