//! Application and layout configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tickboard_core::{DEFAULT_EVENT_HISTORY, DEFAULT_TICK_INTERVAL};
use tickboard_types::{PanelData, SourceData};

use super::defaults::default_layout;

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

/// Problems found while validating a layout, before anything is scheduled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unsupported config version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,

    #[error("duplicate source id `{0}`")]
    DuplicateSource(String),

    #[error("duplicate panel id `{0}`")]
    DuplicatePanel(String),

    #[error("panel `{panel}` refers to unknown source `{source_id}`")]
    UnknownSource { panel: String, source_id: String },

    #[error("panel `{panel}` has zero size ({width}x{height})")]
    ZeroSizePanel { panel: String, width: u16, height: u16 },
}

/// Fixed terminal dimensions, overriding the detected size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSize {
    pub width: u16,
    pub height: u16,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_tick_interval() -> u64 {
    DEFAULT_TICK_INTERVAL.as_millis() as u64
}

fn default_event_history() -> usize {
    DEFAULT_EVENT_HISTORY
}

/// Application-wide configuration: scheduler settings plus the layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Orchestrator tick in milliseconds
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Capacity of the event history ring buffer
    #[serde(default = "default_event_history")]
    pub event_history: usize,
    #[serde(default)]
    pub terminal: Option<TerminalSize>,
    #[serde(default)]
    pub sources: Vec<SourceData>,
    #[serde(default)]
    pub panels: Vec<PanelData>,
}

impl AppConfig {
    /// Load configuration from the user config directory, falling back to
    /// the built-in layout when no file exists yet
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            log::info!(
                "No config at {}, using built-in layout",
                config_path.display()
            );
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "tickboard", "tickboard")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("layout.json"))
    }

    /// Check the layout is schedulable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                expected: CONFIG_VERSION,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        let mut source_ids = HashSet::new();
        for source in &self.sources {
            if !source_ids.insert(source.id.as_str()) {
                return Err(ConfigError::DuplicateSource(source.id.clone()));
            }
        }

        let mut panel_ids = HashSet::new();
        for panel in &self.panels {
            if !panel_ids.insert(panel.id.as_str()) {
                return Err(ConfigError::DuplicatePanel(panel.id.clone()));
            }
            if !source_ids.contains(panel.source.as_str()) {
                return Err(ConfigError::UnknownSource {
                    panel: panel.id.clone(),
                    source_id: panel.source.clone(),
                });
            }
            if !panel.geometry.is_valid() {
                return Err(ConfigError::ZeroSizePanel {
                    panel: panel.id.clone(),
                    width: panel.geometry.width,
                    height: panel.geometry.height,
                });
            }
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        default_layout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickboard_types::display_configs::TextDisplayConfig;
    use tickboard_types::source_configs::TestSourceConfig;
    use tickboard_types::{DisplayerConfig, SourceConfig};

    fn minimal() -> AppConfig {
        AppConfig {
            version: CONFIG_VERSION,
            tick_interval_ms: 100,
            event_history: 16,
            terminal: None,
            sources: vec![SourceData::new(
                "wave",
                SourceConfig::Test(TestSourceConfig::default()),
            )],
            panels: vec![PanelData::new(
                "p1",
                "wave",
                "value",
                tickboard_types::PanelGeometry::new(0, 0, 10, 3),
                DisplayerConfig::Text(TextDisplayConfig::default()),
            )],
        }
    }

    #[test]
    fn test_default_layout_is_valid() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn test_validation_errors() {
        let mut config = minimal();
        config.panels[0].source = "missing".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownSource {
                panel: "p1".to_string(),
                source_id: "missing".to_string(),
            })
        );

        let mut config = minimal();
        config.sources.push(config.sources[0].clone());
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateSource("wave".to_string()))
        );

        let mut config = minimal();
        config.panels[0].geometry.height = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroSizePanel { .. })
        ));

        let mut config = minimal();
        config.tick_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickInterval));
    }

    #[test]
    fn test_parse_with_defaults() {
        let json = r#"{
            "sources": [{ "id": "t", "source_type": "static_text",
                          "lines": [{ "field_id": "title", "text": "hi" }] }],
            "panels": [{ "source": "t", "field": "title",
                         "x": 0, "y": 0, "width": 8, "height": 1,
                         "displayer": { "displayer_type": "text" } }]
        }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.event_history, DEFAULT_EVENT_HISTORY);
        assert!(config.panels[0].id.starts_with("panel-"));
        config.validate().unwrap();
    }

    #[test]
    fn test_save_and_load_roundtrip_on_disk() {
        let path = std::env::temp_dir().join(format!(
            "tickboard-config-{}.json",
            std::process::id()
        ));
        let config = minimal();
        config.save_to_path(&path).unwrap();
        let loaded = AppConfig::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.sources, config.sources);
        assert_eq!(loaded.panels.len(), 1);
        assert_eq!(loaded.panels[0].geometry, config.panels[0].geometry);
    }
}
