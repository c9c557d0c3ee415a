//! CPU source configuration types.

use serde::{Deserialize, Serialize};

fn default_cadence() -> u64 {
    1000
}

/// CPU source configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CpuSourceConfig {
    /// Poll cadence in milliseconds
    #[serde(default = "default_cadence")]
    pub cadence_ms: u64,
    /// Also publish `core_N` usage fields
    #[serde(default)]
    pub per_core: bool,
}

impl Default for CpuSourceConfig {
    fn default() -> Self {
        Self {
            cadence_ms: default_cadence(),
            per_core: false,
        }
    }
}
