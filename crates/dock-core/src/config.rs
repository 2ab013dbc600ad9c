// ABOUTME: Dock configuration handling.
// ABOUTME: Loads and saves window metrics and hover settings from TOML files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Point, Size};

/// Size limits and placement defaults for floating windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowMetrics {
    /// Smallest width a window may be resized to
    pub min_width: f64,
    /// Smallest height a window may be resized to
    pub min_height: f64,
    /// Where newly opened floating windows appear
    pub default_position: [f64; 2],
    /// Size of newly opened floating windows
    pub default_dimension: [f64; 2],
    /// Diagonal offset applied while a new window would cover an existing one
    pub cascade_gap: f64,
}

impl WindowMetrics {
    pub fn default_position(&self) -> Point {
        Point::from(self.default_position)
    }

    pub fn default_dimension(&self) -> Size {
        Size::from(self.default_dimension)
    }
}

impl Default for WindowMetrics {
    fn default() -> Self {
        Self {
            min_width: 200.0,
            min_height: 100.0,
            default_position: [100.0, 100.0],
            default_dimension: [300.0, 150.0],
            cascade_gap: 30.0,
        }
    }
}

/// Drop target detection while a window is dragged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverSettings {
    /// Width of the edge bands that trigger a split
    pub border: f64,
    /// Height of the tab bar band that always merges
    pub header_height: f64,
    /// Pointer must rest this long before the first drop target is shown
    pub drop_detection_delay_ms: u64,
    /// A single move longer than this drops the current hover target
    pub cancel_distance: f64,
}

impl HoverSettings {
    pub fn drop_detection_delay(&self) -> Duration {
        Duration::from_millis(self.drop_detection_delay_ms)
    }
}

impl Default for HoverSettings {
    fn default() -> Self {
        Self {
            border: 60.0,
            header_height: 30.0,
            drop_detection_delay_ms: 250,
            cancel_distance: 4.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    /// Floating window metrics
    pub window: WindowMetrics,

    /// Drag-and-drop hover detection
    pub hover: HoverSettings,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl DockConfig {
    /// ~/.config/dockgrid/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dockgrid").join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Config from the default path. A missing file gives the defaults, an
    /// unreadable one is reported and also gives the defaults.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => config,
            Err(ConfigError::ReadError(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(err) => {
                tracing::warn!("Ignoring config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: DockConfig = toml::from_str(
            r#"
            [window]
            min_width = 320.0

            [hover]
            drop_detection_delay_ms = 100
            "#,
        )
        .unwrap();

        assert_eq!(config.window.min_width, 320.0);
        assert_eq!(config.window.min_height, 100.0);
        assert_eq!(config.hover.drop_detection_delay(), Duration::from_millis(100));
        assert_eq!(config.hover.border, 60.0);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = DockConfig::default();
        config.window.cascade_gap = 12.0;

        let temp_path = std::env::temp_dir().join("dockgrid_test_config.toml");
        config.save(&temp_path).unwrap();
        let loaded = DockConfig::load(&temp_path).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_broken_config_is_a_parse_error() {
        let temp_path = std::env::temp_dir().join("dockgrid_test_broken_config.toml");
        std::fs::write(&temp_path, "[window\nmin_width = ").unwrap();
        assert!(matches!(
            DockConfig::load(&temp_path),
            Err(ConfigError::ParseError(_))
        ));
        let _ = std::fs::remove_file(&temp_path);

        let missing = std::env::temp_dir().join("dockgrid_test_missing_config.toml");
        assert!(matches!(
            DockConfig::load(&missing),
            Err(ConfigError::ReadError(err)) if err.kind() == std::io::ErrorKind::NotFound
        ));
    }

    #[test]
    fn test_default_path() {
        if let Some(p) = DockConfig::default_path() {
            assert!(p.ends_with("dockgrid/config.toml"));
        }
    }
}
