//! Bar displayer

use log::trace;
use tickboard_core::{Displayer, PanelInput, RenderedBlock};
use tickboard_render::bar_display::render_bar;
use tickboard_types::display_configs::BarDisplayConfig;

use crate::frame::framed;

/// Horizontal bar with threshold colors. The value is printed after the
/// bar when `show_value` is set and there is room.
pub struct BarDisplayer {
    config: BarDisplayConfig,
    value: Option<f64>,
}

impl BarDisplayer {
    pub fn new(config: BarDisplayConfig) -> Self {
        Self {
            config,
            value: None,
        }
    }
}

impl Default for BarDisplayer {
    fn default() -> Self {
        Self::new(BarDisplayConfig::default())
    }
}

impl Displayer for BarDisplayer {
    fn id(&self) -> &str {
        "bar"
    }

    fn update_data(&mut self, input: PanelInput<'_>) {
        match input.as_f64() {
            Some(value) => self.value = Some(value),
            None => trace!("Bar displayer ignores non-numeric input"),
        }
    }

    fn render(&self, width: u16, height: u16) -> RenderedBlock {
        let value = self.value;
        let config = &self.config;
        framed(config.label.as_deref(), config.border, width, height, |w, _| {
            let Some(value) = value else {
                return Vec::new();
            };
            let label = format!(" {:5.1}", value);
            let label_len = label.chars().count();
            if config.show_value && w > label_len + 1 {
                vec![format!("{}{}", render_bar(config, value, w - label_len), label)]
            } else {
                vec![render_bar(config, value, w)]
            }
        })
    }
}
