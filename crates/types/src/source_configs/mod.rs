//! Source configuration types for all data sources.

pub mod clock;
pub mod command;
pub mod cpu;
pub mod memory;
pub mod static_text;

use serde::{Deserialize, Serialize};

// Re-export all source config types for convenience
pub use clock::{ClockSourceConfig, DateFormat, TimeFormat};
pub use command::CommandSourceConfig;
pub use cpu::CpuSourceConfig;
pub use memory::{MemorySourceConfig, MemoryUnit};
pub use static_text::{StaticTextLine, StaticTextSourceConfig};
pub use test::{TestMode, TestSourceConfig};

/// Type-safe enum for all source configurations.
/// Uses serde tag for JSON serialization: {"source_type": "cpu", ...}
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "source_type")]
pub enum SourceConfig {
    #[serde(rename = "cpu")]
    Cpu(CpuSourceConfig),

    #[serde(rename = "memory")]
    Memory(MemorySourceConfig),

    #[serde(rename = "clock")]
    Clock(ClockSourceConfig),

    #[serde(rename = "test")]
    Test(TestSourceConfig),

    #[serde(rename = "static_text")]
    StaticText(StaticTextSourceConfig),

    #[serde(rename = "command")]
    Command(CommandSourceConfig),
}

impl SourceConfig {
    /// Get the source type ID string
    pub fn source_type(&self) -> &'static str {
        match self {
            SourceConfig::Cpu(_) => "cpu",
            SourceConfig::Memory(_) => "memory",
            SourceConfig::Clock(_) => "clock",
            SourceConfig::Test(_) => "test",
            SourceConfig::StaticText(_) => "static_text",
            SourceConfig::Command(_) => "command",
        }
    }

    /// Poll cadence in milliseconds (0 = one-shot)
    pub fn cadence_ms(&self) -> u64 {
        match self {
            SourceConfig::Cpu(cfg) => cfg.cadence_ms,
            SourceConfig::Memory(cfg) => cfg.cadence_ms,
            SourceConfig::Clock(cfg) => cfg.cadence_ms,
            SourceConfig::Test(cfg) => cfg.cadence_ms,
            SourceConfig::StaticText(cfg) => cfg.cadence_ms,
            SourceConfig::Command(cfg) => cfg.cadence_ms,
        }
    }

    /// Create a default SourceConfig for a given source type ID
    pub fn default_for_type(source_type: &str) -> Option<Self> {
        match source_type {
            "cpu" => Some(SourceConfig::Cpu(CpuSourceConfig::default())),
            "memory" => Some(SourceConfig::Memory(MemorySourceConfig::default())),
            "clock" => Some(SourceConfig::Clock(ClockSourceConfig::default())),
            "test" => Some(SourceConfig::Test(TestSourceConfig::default())),
            "static_text" => Some(SourceConfig::StaticText(StaticTextSourceConfig::default())),
            _ => None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// A named, configured data source instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceData {
    /// ID panels use to refer to this source
    pub id: String,
    /// Disabled sources are kept in the table but never polled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(flatten)]
    pub config: SourceConfig,
}

impl SourceData {
    pub fn new(id: impl Into<String>, config: SourceConfig) -> Self {
        Self {
            id: id.into(),
            enabled: true,
            config,
        }
    }

    pub fn cadence_ms(&self) -> u64 {
        self.config.cadence_ms()
    }
}
