//! CPU data source implementation

use anyhow::Result;
use serde_json::Value;
use std::time::Duration;
use sysinfo::{CpuRefreshKind, RefreshKind, System};
use tickboard_core::{
    DataSource, FieldMetadata, FieldPurpose, FieldType, InitError, Snapshot, SourceMetadata,
};
use tickboard_types::source_configs::CpuSourceConfig;

/// CPU data source
///
/// Overall usage and frequency via sysinfo, optionally per-core usage.
/// Usage is a delta between two refreshes, so the first poll after init
/// reports whatever sysinfo measured since construction.
pub struct CpuSource {
    metadata: SourceMetadata,
    config: CpuSourceConfig,
    system: System,
}

impl CpuSource {
    pub fn new(config: CpuSourceConfig) -> Self {
        let metadata = SourceMetadata::new(
            "cpu",
            "CPU Information",
            "CPU usage and frequency",
            Duration::from_millis(config.cadence_ms),
        );

        let system =
            System::new_with_specifics(RefreshKind::new().with_cpu(CpuRefreshKind::everything()));

        Self {
            metadata,
            config,
            system,
        }
    }
}

impl Default for CpuSource {
    fn default() -> Self {
        Self::new(CpuSourceConfig::default())
    }
}

impl DataSource for CpuSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn fields(&self) -> Vec<FieldMetadata> {
        let mut fields = vec![
            FieldMetadata::caption("caption"),
            FieldMetadata::new("usage", "Usage", FieldType::Percentage, FieldPurpose::Value),
            FieldMetadata::new("unit", "Unit", FieldType::Text, FieldPurpose::Unit),
            FieldMetadata::new(
                "frequency",
                "Frequency (MHz)",
                FieldType::Numerical,
                FieldPurpose::SecondaryValue,
            ),
            FieldMetadata::new("cores", "Core Count", FieldType::Numerical, FieldPurpose::Other),
        ];

        if self.config.per_core {
            for i in 0..self.system.cpus().len() {
                fields.push(FieldMetadata::new(
                    format!("core{}_usage", i),
                    format!("Core {} Usage", i),
                    FieldType::Percentage,
                    FieldPurpose::Value,
                ));
            }
        }

        fields
    }

    fn init(&mut self) -> Result<(), InitError> {
        self.system.refresh_cpu_all();
        if self.system.cpus().is_empty() {
            return Err(InitError::Unavailable(
                "no CPU information on this system".to_string(),
            ));
        }
        log::debug!("CPU source sees {} core(s)", self.system.cpus().len());
        Ok(())
    }

    fn poll(&mut self) -> Result<Snapshot> {
        self.system.refresh_cpu_all();

        let cpus = self.system.cpus();
        let mut values: Vec<(String, Value)> = vec![
            ("caption".into(), Value::from("CPU")),
            (
                "usage".into(),
                Value::from(f64::from(self.system.global_cpu_usage())),
            ),
            ("unit".into(), Value::from("%")),
            (
                "frequency".into(),
                Value::from(cpus.first().map_or(0, |cpu| cpu.frequency())),
            ),
            ("cores".into(), Value::from(cpus.len())),
        ];

        if self.config.per_core {
            for (i, cpu) in cpus.iter().enumerate() {
                values.push((format!("core{}_usage", i), Value::from(f64::from(cpu.cpu_usage()))));
            }
        }

        Ok(values.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_core_fields() {
        let mut source = CpuSource::new(CpuSourceConfig {
            per_core: true,
            ..Default::default()
        });
        if source.init().is_err() {
            return;
        }
        let snapshot = source.poll().unwrap();
        let cores = snapshot.get_f64("cores").unwrap() as usize;
        assert!(snapshot.contains("core0_usage"));
        assert!(snapshot.contains(&format!("core{}_usage", cores - 1)));
        assert_eq!(source.fields().len(), 5 + cores);
        assert_eq!(snapshot.get("unit"), Some(&Value::from("%")));
    }
}
