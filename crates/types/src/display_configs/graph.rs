//! Graph display configuration types

use serde::{Deserialize, Serialize};

use crate::color::Color;

fn default_history() -> usize {
    60
}

/// Configuration for the sparkline graph displayer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphDisplayConfig {
    #[serde(default)]
    pub label: Option<String>,
    /// Number of past samples kept (oldest evicted first)
    #[serde(default = "default_history")]
    pub history: usize,
    /// Fixed lower bound; auto-scaled from history when absent
    #[serde(default)]
    pub min: Option<f64>,
    /// Fixed upper bound; auto-scaled from history when absent
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default = "default_color")]
    pub color: Color,
    #[serde(default)]
    pub border: bool,
}

fn default_color() -> Color {
    Color::GREEN
}

impl Default for GraphDisplayConfig {
    fn default() -> Self {
        Self {
            label: None,
            history: default_history(),
            min: None,
            max: None,
            color: default_color(),
            border: false,
        }
    }
}
