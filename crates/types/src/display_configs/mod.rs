//! Display configuration types for all displayers.

pub mod bar;
pub mod graph;
pub mod table;
pub mod text;

use serde::{Deserialize, Serialize};

pub use bar::BarDisplayConfig;
pub use graph::GraphDisplayConfig;
pub use table::TableDisplayConfig;
pub use text::TextDisplayConfig;

/// Type-safe enum for all displayer configurations.
/// Uses serde tag for JSON serialization: {"displayer_type": "bar", ...}
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "displayer_type")]
pub enum DisplayerConfig {
    #[serde(rename = "text")]
    Text(TextDisplayConfig),

    #[serde(rename = "bar")]
    Bar(BarDisplayConfig),

    #[serde(rename = "graph")]
    Graph(GraphDisplayConfig),

    #[serde(rename = "table")]
    Table(TableDisplayConfig),
}

impl DisplayerConfig {
    /// Get the displayer type ID string
    pub fn displayer_type(&self) -> &'static str {
        match self {
            DisplayerConfig::Text(_) => "text",
            DisplayerConfig::Bar(_) => "bar",
            DisplayerConfig::Graph(_) => "graph",
            DisplayerConfig::Table(_) => "table",
        }
    }

    /// Bars and graphs plot a number; text and tables show anything.
    pub fn plots_numbers(&self) -> bool {
        matches!(self, DisplayerConfig::Bar(_) | DisplayerConfig::Graph(_))
    }

    /// Create a default DisplayerConfig for a given displayer type ID
    pub fn default_for_type(displayer_type: &str) -> Option<Self> {
        match displayer_type {
            "text" => Some(DisplayerConfig::Text(TextDisplayConfig::default())),
            "bar" => Some(DisplayerConfig::Bar(BarDisplayConfig::default())),
            "graph" => Some(DisplayerConfig::Graph(GraphDisplayConfig::default())),
            "table" => Some(DisplayerConfig::Table(TableDisplayConfig::default())),
            _ => None,
        }
    }
}
