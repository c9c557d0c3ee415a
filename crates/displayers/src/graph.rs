//! Graph displayer implementation

use log::trace;
use std::collections::VecDeque;
use tickboard_core::{Displayer, PanelInput, RenderedBlock};
use tickboard_render::graph_display::{render_graph, value_range};
use tickboard_types::display_configs::GraphDisplayConfig;

use crate::frame::framed;

/// Graph displayer - sparkline of the most recent values
///
/// Keeps a bounded history; the oldest sample is dropped once `history`
/// samples are stored.
pub struct GraphDisplayer {
    config: GraphDisplayConfig,
    samples: VecDeque<f64>,
}

impl GraphDisplayer {
    pub fn new(config: GraphDisplayConfig) -> Self {
        let capacity = config.history.max(1);
        Self {
            config,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    pub fn samples(&self) -> &VecDeque<f64> {
        &self.samples
    }
}

impl Default for GraphDisplayer {
    fn default() -> Self {
        Self::new(GraphDisplayConfig::default())
    }
}

impl Displayer for GraphDisplayer {
    fn id(&self) -> &str {
        "graph"
    }

    fn update_data(&mut self, input: PanelInput<'_>) {
        let Some(value) = input.as_f64() else {
            trace!("Graph displayer ignores non-numeric input");
            return;
        };
        while self.samples.len() >= self.config.history.max(1) {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    fn render(&self, width: u16, height: u16) -> RenderedBlock {
        let range = value_range(&self.samples, self.config.min, self.config.max);
        framed(
            self.config.label.as_deref(),
            self.config.border,
            width,
            height,
            |w, h| render_graph(&self.samples, w, h, range, self.config.color),
        )
    }
}
