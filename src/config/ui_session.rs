//! UI session state persistence
//!
//! Session state is what the user was looking at, restored automatically on
//! the next launch: window size, the aggregation column and status bar
//! visibility. Dashboard behaviour lives in `config.toml` instead.

use serde::{Deserialize, Serialize};

use crate::config::{app_data_dir, ensure_app_data_dir};
use crate::error::{DashError, Result};

/// UI session state filename
pub const UI_SESSION_FILE: &str = "ui_session.json";

/// UI session state persisted between app launches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSessionState {
    /// Version for migration
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub window: WindowState,

    #[serde(default = "default_true")]
    pub show_status_bar: bool,

    /// Last aggregation column, restored if the dataset still has it
    #[serde(default)]
    pub selected_column: Option<String>,
}

fn default_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for UiSessionState {
    fn default() -> Self {
        Self {
            version: 1,
            window: WindowState::default(),
            show_status_bar: true,
            selected_column: None,
        }
    }
}

impl UiSessionState {
    /// Load UI session state from default location
    pub fn load() -> Self {
        let path = app_data_dir().map(|p| p.join(UI_SESSION_FILE));

        if let Some(path) = path {
            if path.exists() {
                if let Ok(content) = std::fs::read_to_string(&path) {
                    match serde_json::from_str(&content) {
                        Ok(state) => {
                            tracing::info!("Loaded UI session state from {:?}", path);
                            return state;
                        }
                        Err(e) => {
                            tracing::warn!("Failed to parse UI session state: {}, using defaults", e);
                        }
                    }
                }
            }
        }
        Self::default()
    }

    /// Save UI session state to default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        let path = dir.join(UI_SESSION_FILE);

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .map_err(|e| DashError::Config(format!("Failed to write UI session: {}", e)))?;

        tracing::debug!("Saved UI session state to {:?}", path);
        Ok(())
    }
}

/// Window size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    #[serde(default = "default_window_size")]
    pub size: (u32, u32),
    #[serde(default)]
    pub maximized: bool,
}

fn default_window_size() -> (u32, u32) {
    (1280, 800)
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            size: default_window_size(),
            maximized: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DATA_DIR_ENV;
    use serial_test::serial;

    #[test]
    fn test_missing_fields_default() {
        let state: UiSessionState = serde_json::from_str("{\"selected_column\":\"pop\"}").unwrap();
        assert_eq!(state.version, 1);
        assert!(state.show_status_bar);
        assert_eq!(state.window.size, (1280, 800));
        assert_eq!(state.selected_column.as_deref(), Some("pop"));
    }

    #[test]
    #[serial]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(DATA_DIR_ENV, dir.path());

        let state = UiSessionState {
            window: WindowState {
                size: (1600, 900),
                maximized: true,
            },
            show_status_bar: false,
            selected_column: Some("gdpPercap".to_string()),
            ..Default::default()
        };
        state.save().unwrap();
        assert_eq!(UiSessionState::load(), state);

        std::fs::write(dir.path().join(UI_SESSION_FILE), "not json").unwrap();
        assert_eq!(UiSessionState::load(), UiSessionState::default());

        std::env::remove_var(DATA_DIR_ENV);
    }
}
