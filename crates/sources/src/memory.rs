//! Memory data source implementation

use anyhow::{bail, Result};
use serde_json::Value;
use std::time::Duration;
use sysinfo::{MemoryRefreshKind, RefreshKind, System};
use tickboard_core::{
    DataSource, FieldMetadata, FieldPurpose, FieldType, InitError, Snapshot, SourceMetadata,
};
use tickboard_types::source_configs::MemorySourceConfig;

/// RAM and swap usage.
pub struct MemorySource {
    metadata: SourceMetadata,
    config: MemorySourceConfig,
    system: System,
}

impl MemorySource {
    pub fn new(config: MemorySourceConfig) -> Self {
        let metadata = SourceMetadata::new(
            "memory",
            "Memory",
            "System memory (RAM) and swap usage",
            Duration::from_millis(config.cadence_ms),
        );
        let system = System::new_with_specifics(
            RefreshKind::new().with_memory(MemoryRefreshKind::everything()),
        );

        Self {
            metadata,
            config,
            system,
        }
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new(MemorySourceConfig::default())
    }
}

fn percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        used as f64 / total as f64 * 100.0
    }
}

impl DataSource for MemorySource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn fields(&self) -> Vec<FieldMetadata> {
        vec![
            FieldMetadata::caption("caption"),
            FieldMetadata::new("usage", "Used %", FieldType::Percentage, FieldPurpose::Value),
            FieldMetadata::new("used", "Used", FieldType::Numerical, FieldPurpose::SecondaryValue),
            FieldMetadata::new("total", "Total", FieldType::Numerical, FieldPurpose::Other),
            FieldMetadata::new(
                "available",
                "Available",
                FieldType::Numerical,
                FieldPurpose::Other,
            ),
            FieldMetadata::new("unit", "Unit", FieldType::Text, FieldPurpose::Unit),
            FieldMetadata::new(
                "swap_usage",
                "Swap Used %",
                FieldType::Percentage,
                FieldPurpose::SecondaryValue,
            ),
        ]
    }

    fn init(&mut self) -> Result<(), InitError> {
        self.system.refresh_memory();
        if self.system.total_memory() == 0 {
            return Err(InitError::Unavailable(
                "total memory reported as zero".to_string(),
            ));
        }
        Ok(())
    }

    fn poll(&mut self) -> Result<Snapshot> {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        if total == 0 {
            bail!("memory statistics unavailable");
        }
        let used = self.system.used_memory();
        let unit = self.config.unit;

        Ok([
            ("caption", Value::from("RAM")),
            ("usage", Value::from(percent(used, total))),
            ("used", Value::from(unit.from_bytes(used))),
            ("total", Value::from(unit.from_bytes(total))),
            (
                "available",
                Value::from(unit.from_bytes(self.system.available_memory())),
            ),
            ("unit", Value::from(unit.as_str())),
            (
                "swap_usage",
                Value::from(percent(self.system.used_swap(), self.system.total_swap())),
            ),
        ]
        .into_iter()
        .collect())
    }
}
