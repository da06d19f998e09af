//! Configuration module for DataDash-RS
//!
//! This module handles application configuration including:
//! - Dashboard settings (`config.toml`): dataset source, archive location,
//!   chart and table options, logging
//! - UI session state (`ui_session.json`), see [`ui_session`]
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.hxyulin.datadash-rs/`
//! - **macOS**: `~/Library/Application Support/dev.hxyulin.datadash-rs/`
//! - **Windows**: `%APPDATA%\dev.hxyulin.datadash-rs\`
//!
//! Setting `DATADASH_DATA_DIR` overrides the location.
//!
//! # Files
//!
//! - `config.toml` - Dashboard settings, written with defaults on first run
//! - `ui_session.json` - Window size and last selections
//! - `uploads/` - Default archive directory
//! - `logs/` - Daily rolling log files

pub mod ui_session;

pub use ui_session::{UiSessionState, WindowState, UI_SESSION_FILE};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::data::source::DEFAULT_DATASET_URL;
use crate::error::{DashError, Result};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.hxyulin.datadash-rs";

/// Environment variable overriding the app data directory
pub const DATA_DIR_ENV: &str = "DATADASH_DATA_DIR";

/// Settings filename
pub const CONFIG_FILE: &str = "config.toml";

/// Default archive subdirectory
pub const UPLOADS_DIR: &str = "uploads";

/// Log subdirectory
pub const LOGS_DIR: &str = "logs";

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir()
        .ok_or_else(|| DashError::Config("Could not determine app data directory".to_string()))?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            DashError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the settings file
pub fn config_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== Dashboard Config ====================

/// Dashboard settings persisted as TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// URL or file path of the default dataset
    #[serde(default = "default_source")]
    pub default_source: String,

    /// Archive directory; `<app data dir>/uploads` when unset
    #[serde(default)]
    pub archive_dir: Option<PathBuf>,

    /// Timeout for fetching the default dataset
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    #[serde(default)]
    pub chart: ChartSettings,

    #[serde(default)]
    pub table: TableSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

fn default_source() -> String {
    DEFAULT_DATASET_URL.to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_source: default_source(),
            archive_dir: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
            chart: ChartSettings::default(),
            table: TableSettings::default(),
            ui: UiSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl DashboardConfig {
    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DashError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from the default location.
    ///
    /// A missing file is created with defaults. An unreadable or invalid
    /// file is logged and replaced by defaults in memory only, so the user's
    /// file is never overwritten.
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            tracing::warn!("Could not determine config path, using defaults");
            return Self::default();
        };

        if !path.exists() {
            let config = Self::default();
            match config.save(&path) {
                Ok(()) => tracing::info!("Wrote default settings to {:?}", path),
                Err(e) => tracing::warn!("Failed to write default settings: {}", e),
            }
            return config;
        }

        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load settings from {:?}, using defaults: {}", path, e);
            Self::default()
        })
    }

    /// Save settings as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| DashError::Config(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(path, content)
            .map_err(|e| DashError::Config(format!("Failed to write settings: {}", e)))
    }

    fn validate(&self) -> Result<()> {
        if self.default_source.trim().is_empty() {
            return Err(DashError::Config("default_source must not be empty".to_string()));
        }
        if self.table.page_size == 0 {
            return Err(DashError::Config("table.page_size must be at least 1".to_string()));
        }
        if self.chart.group_column.is_empty() {
            return Err(DashError::Config("chart.group_column must not be empty".to_string()));
        }
        Ok(())
    }

    /// Archive directory after applying the default
    pub fn resolved_archive_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.archive_dir {
            return Ok(dir.clone());
        }
        app_data_dir()
            .map(|p| p.join(UPLOADS_DIR))
            .ok_or_else(|| DashError::Config("Could not determine archive directory".to_string()))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Chart options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    /// Column the bars are grouped by
    #[serde(default = "default_group_column")]
    pub group_column: String,

    /// Columns offered for aggregation
    #[serde(default = "default_chart_columns")]
    pub columns: Vec<String>,

    /// Column selected at startup
    #[serde(default = "default_chart_column")]
    pub default_column: String,
}

fn default_group_column() -> String {
    "continent".to_string()
}

fn default_chart_columns() -> Vec<String> {
    vec!["pop".to_string(), "lifeExp".to_string(), "gdpPercap".to_string()]
}

fn default_chart_column() -> String {
    "lifeExp".to_string()
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            group_column: default_group_column(),
            columns: default_chart_columns(),
            default_column: default_chart_column(),
        }
    }
}

/// Data table options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSettings {
    /// Rows per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    12
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Look and feel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default = "default_true")]
    pub dark_mode: bool,
}

fn default_true() -> bool {
    true
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            dark_mode: default_true(),
        }
    }
}

/// Logging options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Also write daily log files under `<app data dir>/logs`
    #[serde(default = "default_true")]
    pub file_logging: bool,
}

fn default_log_filter() -> String {
    "info,datadash_rs=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            file_logging: default_true(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.default_source, DEFAULT_DATASET_URL);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
        assert_eq!(config.chart.group_column, "continent");
        assert_eq!(config.chart.columns, vec!["pop", "lifeExp", "gdpPercap"]);
        assert_eq!(config.chart.default_column, "lifeExp");
        assert_eq!(config.table.page_size, 12);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "default_source = \"data/local.csv\"\n\n[chart]\ngroup_column = \"region\"\n",
        )
        .unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.default_source, "data/local.csv");
        assert_eq!(config.chart.group_column, "region");
        assert_eq!(config.chart.default_column, "lifeExp");
        assert_eq!(config.table.page_size, 12);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let mut config = DashboardConfig::default();
        config.archive_dir = Some(dir.path().join("archive"));
        config.table.page_size = 25;

        config.save(&path).unwrap();
        assert_eq!(DashboardConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[table]\npage_size = 0\n").unwrap();
        assert!(matches!(
            DashboardConfig::load(&path).unwrap_err(),
            DashError::Config(_)
        ));

        std::fs::write(&path, "default_source = [1, 2]\n").unwrap();
        assert!(matches!(
            DashboardConfig::load(&path).unwrap_err(),
            DashError::Config(_)
        ));
    }

    #[test]
    #[serial]
    fn test_env_override_moves_everything() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(DATA_DIR_ENV, dir.path());

        assert_eq!(app_data_dir(), Some(dir.path().to_path_buf()));
        assert_eq!(config_path(), Some(dir.path().join(CONFIG_FILE)));
        assert_eq!(
            DashboardConfig::default().resolved_archive_dir().unwrap(),
            dir.path().join(UPLOADS_DIR)
        );

        let config = DashboardConfig::load_or_default();
        assert_eq!(config, DashboardConfig::default());
        assert!(dir.path().join(CONFIG_FILE).exists());

        std::env::remove_var(DATA_DIR_ENV);
    }
}
