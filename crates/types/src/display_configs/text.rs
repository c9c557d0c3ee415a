//! Text display configuration types

use serde::{Deserialize, Serialize};

use crate::color::Color;

fn default_precision() -> usize {
    1
}

/// Configuration for the text displayer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextDisplayConfig {
    /// Caption shown on the first line
    #[serde(default)]
    pub label: Option<String>,
    /// Decimal places for numeric values
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Suffix appended to numeric values (e.g., "%")
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub border: bool,
}

impl Default for TextDisplayConfig {
    fn default() -> Self {
        Self {
            label: None,
            precision: default_precision(),
            unit: None,
            color: Color::default(),
            border: false,
        }
    }
}
