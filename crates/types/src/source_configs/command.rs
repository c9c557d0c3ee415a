//! Command source configuration types.

use serde::{Deserialize, Serialize};

fn default_cadence() -> u64 {
    2000
}

/// Configuration for a source that runs an external command on a worker
/// thread and parses `key=value` lines from its stdout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandSourceConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// How often the scheduler drains the latest result
    #[serde(default = "default_cadence")]
    pub cadence_ms: u64,
    /// How often the worker re-runs the command (defaults to the cadence)
    #[serde(default)]
    pub run_every_ms: Option<u64>,
}

impl CommandSourceConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cadence_ms: default_cadence(),
            run_every_ms: None,
        }
    }

    pub fn run_interval_ms(&self) -> u64 {
        self.run_every_ms.unwrap_or(self.cadence_ms).max(1)
    }
}
