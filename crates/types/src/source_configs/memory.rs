//! Memory source configuration types.

use serde::{Deserialize, Serialize};

/// Unit used for the absolute memory fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemoryUnit {
    Mib,
    #[default]
    Gib,
}

impl MemoryUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryUnit::Mib => "MiB",
            MemoryUnit::Gib => "GiB",
        }
    }

    /// Convert a byte count into this unit
    pub fn from_bytes(&self, bytes: u64) -> f64 {
        match self {
            MemoryUnit::Mib => bytes as f64 / (1024.0 * 1024.0),
            MemoryUnit::Gib => bytes as f64 / (1024.0 * 1024.0 * 1024.0),
        }
    }
}

fn default_cadence() -> u64 {
    2000
}

/// Memory source configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemorySourceConfig {
    #[serde(default = "default_cadence")]
    pub cadence_ms: u64,
    #[serde(default)]
    pub unit: MemoryUnit,
}

impl Default for MemorySourceConfig {
    fn default() -> Self {
        Self {
            cadence_ms: default_cadence(),
            unit: MemoryUnit::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert_eq!(MemoryUnit::Mib.from_bytes(3 * 1024 * 1024), 3.0);
        assert_eq!(MemoryUnit::Gib.from_bytes(1024 * 1024 * 1024), 1.0);
    }
}
