//! Text displayer: one value, optionally captioned

use log::trace;
use tickboard_core::{Displayer, PanelInput, RenderedBlock};
use tickboard_render::ansi::paint;
use tickboard_types::display_configs::TextDisplayConfig;

use crate::frame::{format_value, framed};

pub struct TextDisplayer {
    config: TextDisplayConfig,
    text: String,
}

impl TextDisplayer {
    pub fn new(config: TextDisplayConfig) -> Self {
        Self {
            config,
            text: String::new(),
        }
    }
}

impl Default for TextDisplayer {
    fn default() -> Self {
        Self::new(TextDisplayConfig::default())
    }
}

impl Displayer for TextDisplayer {
    fn id(&self) -> &str {
        "text"
    }

    fn update_data(&mut self, input: PanelInput<'_>) {
        let Some(value) = input.value() else {
            trace!("Text displayer ignores whole-snapshot input");
            return;
        };
        let mut text = format_value(value, self.config.precision);
        if let (Some(unit), true) = (&self.config.unit, value.is_number()) {
            text.push_str(unit);
        }
        self.text = text;
    }

    fn render(&self, width: u16, height: u16) -> RenderedBlock {
        let text = paint(&self.text, self.config.color);
        framed(
            self.config.label.as_deref(),
            self.config.border,
            width,
            height,
            |_, _| vec![text],
        )
    }
}
