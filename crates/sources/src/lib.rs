//! tickboard-sources: Built-in data sources for the tickboard terminal dashboard.

mod clock;
mod command;
mod cpu;
mod memory;
mod static_text;
mod test;

pub use clock::ClockSource;
pub use command::{command_source, parse_key_values};
pub use cpu::CpuSource;
pub use memory::MemorySource;
pub use static_text::StaticTextSource;
pub use test::TestSource;

use anyhow::{bail, Result};
use std::sync::Arc;
use tickboard_core::{BoxedDataSource, BuildContext, Registry, SourceConfig};

/// Build any built-in source from its config
pub fn create_source(config: &SourceConfig, ctx: &BuildContext) -> Result<BoxedDataSource> {
    let source: BoxedDataSource = match config {
        SourceConfig::Cpu(cfg) => Box::new(CpuSource::new(cfg.clone())),
        SourceConfig::Memory(cfg) => Box::new(MemorySource::new(cfg.clone())),
        SourceConfig::Clock(cfg) => Box::new(ClockSource::new(cfg.clone())),
        SourceConfig::Test(cfg) => Box::new(TestSource::new(cfg.clone(), Arc::clone(&ctx.clock))),
        SourceConfig::StaticText(cfg) => Box::new(StaticTextSource::new(cfg.clone())),
        SourceConfig::Command(cfg) => {
            if cfg.program.trim().is_empty() {
                bail!("command source needs a program");
            }
            Box::new(command_source(cfg.clone()))
        }
    };
    Ok(source)
}

/// Register all built-in sources
pub fn register_all(registry: &mut Registry) {
    for source_type in ["cpu", "memory", "clock", "test", "static_text", "command"] {
        registry.register_source(source_type, create_source);
    }
}
