//! Key/value table over a whole snapshot

use tickboard_core::{Displayer, PanelInput, RenderedBlock};
use tickboard_render::ansi::paint;
use tickboard_types::display_configs::TableDisplayConfig;

use crate::frame::{format_value, framed};

pub struct TableDisplayer {
    config: TableDisplayConfig,
    rows: Vec<(String, String)>,
}

impl TableDisplayer {
    pub fn new(config: TableDisplayConfig) -> Self {
        Self {
            config,
            rows: Vec::new(),
        }
    }
}

impl Default for TableDisplayer {
    fn default() -> Self {
        Self::new(TableDisplayConfig::default())
    }
}

impl Displayer for TableDisplayer {
    fn id(&self) -> &str {
        "table"
    }

    fn update_data(&mut self, input: PanelInput<'_>) {
        let precision = self.config.precision;
        self.rows = match input {
            PanelInput::Snapshot(snapshot) if self.config.keys.is_empty() => snapshot
                .sorted_keys()
                .into_iter()
                .filter_map(|key| {
                    let value = snapshot.get(key)?;
                    Some((key.to_string(), format_value(value, precision)))
                })
                .collect(),
            // Configured keys keep their order; missing ones show as "-"
            PanelInput::Snapshot(snapshot) => self
                .config
                .keys
                .iter()
                .map(|key| {
                    let value = snapshot
                        .get(key)
                        .map_or_else(|| "-".to_string(), |v| format_value(v, precision));
                    (key.clone(), value)
                })
                .collect(),
            PanelInput::Field(value) => vec![(String::new(), format_value(value, precision))],
        };
    }

    fn render(&self, width: u16, height: u16) -> RenderedBlock {
        let key_width = self
            .rows
            .iter()
            .map(|(key, _)| key.chars().count())
            .max()
            .unwrap_or(0);

        framed(
            self.config.title.as_deref(),
            self.config.border,
            width,
            height,
            |_, h| {
                self.rows
                    .iter()
                    .take(h)
                    .map(|(key, value)| {
                        let key = format!("{:<width$}", key, width = key_width);
                        format!("{} {}", paint(&key, self.config.key_color), value)
                    })
                    .collect()
            },
        )
    }
}
