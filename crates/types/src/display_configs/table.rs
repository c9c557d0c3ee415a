//! Table display configuration types

use serde::{Deserialize, Serialize};

use crate::color::Color;

fn default_precision() -> usize {
    1
}

fn default_key_color() -> Color {
    Color::GREY
}

/// Configuration for the key/value table displayer, which consumes a whole
/// snapshot rather than a single field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableDisplayConfig {
    #[serde(default)]
    pub title: Option<String>,
    /// Only show these keys, in this order (all keys, sorted, when empty)
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default = "default_precision")]
    pub precision: usize,
    #[serde(default = "default_key_color")]
    pub key_color: Color,
    #[serde(default)]
    pub border: bool,
}

impl Default for TableDisplayConfig {
    fn default() -> Self {
        Self {
            title: None,
            keys: Vec::new(),
            precision: default_precision(),
            key_color: default_key_color(),
            border: false,
        }
    }
}
