//! Layout and persistence tuning for the window manager

use crate::error::ConfigError;
use crate::state::window::{Position, Size, Viewport};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ManagerConfig {
    /// Initial viewport, replaced at runtime by `set_viewport`
    pub viewport: Viewport,
    /// Height reserved at the bottom of the viewport for the taskbar
    pub taskbar_height: f64,
    pub default_size: Size,
    pub min_size: Size,
    pub cascade: CascadeConfig,
    /// Key of the durable slot holding the persisted projection
    pub storage_key: String,
    pub save_debounce_ms: u64,
}

/// Placement of windows opened without an explicit position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CascadeConfig {
    pub origin: Position,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Fraction of the viewport past which cascading restarts at `origin`
    pub reset_ratio: f64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            taskbar_height: 48.0,
            default_size: Size::new(700.0, 500.0),
            min_size: Size::new(320.0, 200.0),
            cascade: CascadeConfig::default(),
            storage_key: "wim-windows".to_string(),
            save_debounce_ms: 1000,
        }
    }
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            origin: Position::new(50.0, 80.0),
            offset_x: 30.0,
            offset_y: 30.0,
            reset_ratio: 0.6,
        }
    }
}

impl ManagerConfig {
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        config_dir.join("wim-os/windows.toml")
    }

    /// Load from `path`, falling back to defaults when the file is missing or invalid
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "No window config, using defaults");
            return Self::default();
        }

        match std::fs::read_to_string(path)
            .map_err(ConfigError::from)
            .and_then(|text| Self::from_toml_str(&text))
        {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), "Ignoring window config: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = ManagerConfig::from_toml_str(
            r#"
            taskbar_height = 32.0

            [cascade]
            offset_x = 24.0
            "#,
        )
        .unwrap();

        assert_eq!(config.taskbar_height, 32.0);
        assert_eq!(config.cascade.offset_x, 24.0);
        assert_eq!(config.cascade.offset_y, 30.0);
        assert_eq!(config.cascade.origin, Position::new(50.0, 80.0));
        assert_eq!(config.storage_key, "wim-windows");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(ManagerConfig::from_toml_str("taskbar_height = \"tall\"").is_err());
    }

    #[test]
    fn load_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert_eq!(ManagerConfig::load(&missing), ManagerConfig::default());

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[[[").unwrap();
        assert_eq!(ManagerConfig::load(&broken), ManagerConfig::default());
    }

    #[test]
    fn load_reads_viewport() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("windows.toml");
        std::fs::write(&path, "[viewport]\nwidth = 1920.0\nheight = 1080.0\n").unwrap();

        let config = ManagerConfig::load(&path);
        assert_eq!(config.viewport, Viewport { width: 1920.0, height: 1080.0 });
    }
}
