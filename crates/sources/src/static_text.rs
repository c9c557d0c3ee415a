//! Static Text data source implementation
//!
//! Provides configurable static text lines for labels and titles.

use anyhow::Result;
use serde_json::Value;
use std::time::Duration;
use tickboard_core::{DataSource, FieldMetadata, FieldPurpose, FieldType, Snapshot, SourceMetadata};
use tickboard_types::source_configs::{StaticTextLine, StaticTextSourceConfig};

/// Static Text data source
///
/// The snapshot never changes, so this is normally scheduled one-shot.
pub struct StaticTextSource {
    metadata: SourceMetadata,
    lines: Vec<StaticTextLine>,
}

impl StaticTextSource {
    pub fn new(config: StaticTextSourceConfig) -> Self {
        let lines = if config.lines.is_empty() {
            log::warn!("StaticTextSource configured without lines, using default");
            vec![StaticTextLine::default()]
        } else {
            config.lines
        };

        Self {
            metadata: SourceMetadata::new(
                "static_text",
                "Static Text",
                "Configurable static text lines",
                Duration::from_millis(config.cadence_ms),
            ),
            lines,
        }
    }
}

impl Default for StaticTextSource {
    fn default() -> Self {
        Self::new(StaticTextSourceConfig::default())
    }
}

impl DataSource for StaticTextSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn fields(&self) -> Vec<FieldMetadata> {
        let mut fields = vec![FieldMetadata::new(
            "value",
            "Value",
            FieldType::Text,
            FieldPurpose::Value,
        )];
        fields.extend(self.lines.iter().map(|line| {
            FieldMetadata::new(
                line.field_id.clone(),
                format!("Static text: {}", line.field_id),
                FieldType::Text,
                FieldPurpose::Value,
            )
        }));
        fields
    }

    fn poll(&mut self) -> Result<Snapshot> {
        // `value` mirrors the first line
        let first = self.lines.first().map(|line| line.text.clone()).unwrap_or_default();
        Ok(std::iter::once(("value".to_string(), Value::from(first)))
            .chain(
                self.lines
                    .iter()
                    .map(|line| (line.field_id.clone(), Value::from(line.text.as_str()))),
            )
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_become_fields() {
        let mut source = StaticTextSource::new(StaticTextSourceConfig {
            lines: vec![
                StaticTextLine {
                    field_id: "title".to_string(),
                    text: "tickboard".to_string(),
                },
                StaticTextLine {
                    field_id: "host".to_string(),
                    text: "localhost".to_string(),
                },
            ],
            cadence_ms: 0,
        });

        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.sorted_keys(), ["host", "title", "value"]);
        assert_eq!(snapshot.get("value"), Some(&Value::from("tickboard")));
        assert_eq!(source.fields().len(), 3);
    }

    #[test]
    fn test_empty_config_gets_default_line() {
        let mut source = StaticTextSource::default();
        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.get("line1"), Some(&Value::from("Static Text")));
    }
}
