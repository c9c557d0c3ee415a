//! Static text source configuration types.

use serde::{Deserialize, Serialize};

/// A single configurable text line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaticTextLine {
    /// Field ID used as key in the snapshot (e.g., "line1", "title")
    pub field_id: String,
    pub text: String,
}

impl Default for StaticTextLine {
    fn default() -> Self {
        Self {
            field_id: "line1".to_string(),
            text: "Static Text".to_string(),
        }
    }
}

/// Configuration for the static text source.
///
/// Static text never changes, so it defaults to a one-shot cadence of 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StaticTextSourceConfig {
    pub lines: Vec<StaticTextLine>,
    #[serde(default)]
    pub cadence_ms: u64,
}
