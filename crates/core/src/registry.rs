//! Registry for data sources and displayers

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tickboard_types::{DisplayerConfig, SourceConfig};

use crate::clock::SimClock;
use crate::data_source::BoxedDataSource;
use crate::displayer::BoxedDisplayer;
use crate::error::CoreError;

/// Shared services handed to source factories
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    pub clock: Arc<SimClock>,
}

impl BuildContext {
    pub fn new(clock: Arc<SimClock>) -> Self {
        Self { clock }
    }
}

/// Function that creates a data source from its config
pub type SourceFactory = fn(&SourceConfig, &BuildContext) -> Result<BoxedDataSource>;

/// Function that creates a displayer from its config
pub type DisplayerFactory = fn(&DisplayerConfig) -> Result<BoxedDisplayer>;

/// Maps config type tags to factories.
///
/// Built once at startup (see `register_all` in the sources and displayers
/// crates) and consulted only while the dashboard is being assembled.
#[derive(Default)]
pub struct Registry {
    sources: HashMap<String, SourceFactory>,
    displayers: HashMap<String, DisplayerFactory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_source(&mut self, source_type: &str, factory: SourceFactory) {
        self.sources.insert(source_type.to_string(), factory);
    }

    pub fn register_displayer(&mut self, displayer_type: &str, factory: DisplayerFactory) {
        self.displayers.insert(displayer_type.to_string(), factory);
    }

    pub fn create_source(
        &self,
        config: &SourceConfig,
        ctx: &BuildContext,
    ) -> Result<BoxedDataSource> {
        let source_type = config.source_type();
        let factory = self
            .sources
            .get(source_type)
            .ok_or_else(|| CoreError::UnknownSourceType(source_type.to_string()))?;
        factory(config, ctx)
    }

    pub fn create_displayer(&self, config: &DisplayerConfig) -> Result<BoxedDisplayer> {
        let displayer_type = config.displayer_type();
        let factory = self
            .displayers
            .get(displayer_type)
            .ok_or_else(|| CoreError::UnknownDisplayerType(displayer_type.to_string()))?;
        factory(config)
    }

    /// Registered source types, sorted
    pub fn list_sources(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sources.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Registered displayer types, sorted
    pub fn list_displayers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.displayers.keys().cloned().collect();
        ids.sort();
        ids
    }
}
