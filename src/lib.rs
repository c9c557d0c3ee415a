//! tickboard: a multi-cadence terminal dashboard
//!
//! This crate ties the workspace together:
//! - configuration loading and validation
//! - the tick orchestrator that polls sources, updates panels and composes
//!   frames
//! - a registry pre-loaded with the built-in sources and displayers

pub mod config;
pub mod core;

pub use config::AppConfig;
pub use core::UpdateManager;

use tickboard_core::Registry;

/// Registry with every built-in source and displayer
pub fn builtin_registry() -> Registry {
    let mut registry = Registry::new();
    tickboard_sources::register_all(&mut registry);
    tickboard_displayers::register_all(&mut registry);
    registry
}
