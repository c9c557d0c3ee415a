//! Panel configuration: geometry, source binding and displayer settings.
//!
//! `PanelData` is the single serializable description of a panel. The core
//! crate turns it into a live `Panel` once, at dashboard build time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::display_configs::DisplayerConfig;

/// Field name that binds a panel to the whole snapshot instead of one field.
pub const WHOLE_SNAPSHOT: &str = "*";

/// Position and size of a panel, in terminal cells (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PanelGeometry {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl PanelGeometry {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Positions are unsigned, so only the size can be degenerate.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl fmt::Display for PanelGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@{},{}", self.width, self.height, self.x, self.y)
    }
}

/// Which part of a snapshot a panel consumes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldSelector {
    /// A single named field
    Field(String),
    /// The whole snapshot, for panels that aggregate several values
    Whole,
}

impl FieldSelector {
    pub fn parse(s: &str) -> Self {
        if s == WHOLE_SNAPSHOT {
            FieldSelector::Whole
        } else {
            FieldSelector::Field(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldSelector::Field(name) => name,
            FieldSelector::Whole => WHOLE_SNAPSHOT,
        }
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldSelector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(FieldSelector::parse(&s))
    }
}

fn new_panel_id() -> String {
    format!("panel-{}", uuid::Uuid::new_v4().simple())
}

fn default_panel_cadence() -> u64 {
    500
}

/// Complete configuration of one panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelData {
    /// Unique ID for this panel instance
    #[serde(default = "new_panel_id")]
    pub id: String,
    /// ID of the data source this panel reads from
    pub source: String,
    /// Field to display, or `"*"` for the whole snapshot
    pub field: FieldSelector,
    /// Update cadence in milliseconds (0 = update once)
    #[serde(default = "default_panel_cadence")]
    pub cadence_ms: u64,
    #[serde(flatten)]
    pub geometry: PanelGeometry,
    pub displayer: DisplayerConfig,
}

impl PanelData {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        field: &str,
        geometry: PanelGeometry,
        displayer: DisplayerConfig,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            field: FieldSelector::parse(field),
            cadence_ms: default_panel_cadence(),
            geometry,
            displayer,
        }
    }

    pub fn with_cadence(mut self, cadence_ms: u64) -> Self {
        self.cadence_ms = cadence_ms;
        self
    }

    pub fn displayer_type(&self) -> &'static str {
        self.displayer.displayer_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_configs::TextDisplayConfig;

    #[test]
    fn test_whole_snapshot_selector() {
        assert_eq!(FieldSelector::parse("*"), FieldSelector::Whole);
        assert_eq!(
            FieldSelector::parse("usage"),
            FieldSelector::Field("usage".to_string())
        );
        assert_eq!(FieldSelector::Whole.to_string(), "*");
    }

    #[test]
    fn test_panel_data_serialization() {
        let data = PanelData::new(
            "cpu-text",
            "cpu",
            "usage",
            PanelGeometry::new(0, 0, 20, 3),
            DisplayerConfig::Text(TextDisplayConfig::default()),
        );

        let json = serde_json::to_string_pretty(&data).unwrap();
        assert!(json.contains("\"displayer_type\": \"text\""));
        assert!(json.contains("\"width\": 20"));

        let back: PanelData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "cpu-text");
        assert_eq!(back.field, FieldSelector::Field("usage".to_string()));
        assert_eq!(back.geometry, PanelGeometry::new(0, 0, 20, 3));
        assert_eq!(back.displayer_type(), "text");
    }

    #[test]
    fn test_panel_id_is_generated_when_missing() {
        let json = r#"{
            "source": "clock", "field": "time",
            "x": 1, "y": 2, "width": 10, "height": 3,
            "displayer": { "displayer_type": "text" }
        }"#;
        let data: PanelData = serde_json::from_str(json).unwrap();
        assert!(data.id.starts_with("panel-"));
        assert_eq!(data.cadence_ms, 500);
    }

    #[test]
    fn test_zero_size_geometry_is_invalid() {
        assert!(PanelGeometry::new(0, 0, 1, 1).is_valid());
        assert!(!PanelGeometry::new(5, 5, 0, 3).is_valid());
        assert!(!PanelGeometry::new(5, 5, 3, 0).is_valid());
    }
}
