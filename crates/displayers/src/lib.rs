//! tickboard-displayers: Built-in panel renderers for the tickboard terminal dashboard.

mod bar;
mod frame;
mod graph;
mod table;
mod text;

pub use bar::BarDisplayer;
pub use graph::GraphDisplayer;
pub use table::TableDisplayer;
pub use text::TextDisplayer;

use anyhow::Result;
use tickboard_core::{BoxedDisplayer, DisplayerConfig, Registry};

/// Build any built-in displayer from its config
pub fn create_displayer(config: &DisplayerConfig) -> Result<BoxedDisplayer> {
    let displayer: BoxedDisplayer = match config {
        DisplayerConfig::Text(cfg) => Box::new(TextDisplayer::new(cfg.clone())),
        DisplayerConfig::Bar(cfg) => Box::new(BarDisplayer::new(cfg.clone())),
        DisplayerConfig::Graph(cfg) => Box::new(GraphDisplayer::new(cfg.clone())),
        DisplayerConfig::Table(cfg) => Box::new(TableDisplayer::new(cfg.clone())),
    };
    Ok(displayer)
}

/// Register all built-in displayers
pub fn register_all(registry: &mut Registry) {
    for displayer_type in ["text", "bar", "graph", "table"] {
        registry.register_displayer(displayer_type, create_displayer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_builds() {
        let mut registry = Registry::new();
        register_all(&mut registry);
        for displayer_type in registry.list_displayers() {
            let config = DisplayerConfig::default_for_type(&displayer_type).unwrap();
            let displayer = registry.create_displayer(&config).unwrap();
            assert_eq!(displayer.id(), displayer_type);
        }
    }
}
