//! Configuration management

mod defaults;
mod settings;

pub use defaults::default_layout;
pub use settings::{AppConfig, ConfigError, TerminalSize, CONFIG_VERSION};
