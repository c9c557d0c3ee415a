//! Data source trait and related types

use anyhow::Result;
use std::time::Duration;
use tickboard_types::{FieldMetadata, Snapshot};

use crate::error::InitError;

/// Metadata about a data source
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    /// Unique identifier for this source type
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Description of what this source provides
    pub description: String,
    /// Recommended poll cadence
    pub default_cadence: Duration,
}

impl SourceMetadata {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        default_cadence: Duration,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            default_cadence,
        }
    }
}

/// Trait for all data sources
///
/// A data source knows how to acquire one set of values. It does not know
/// when it will be called; [`SourceSlot`](crate::SourceSlot) owns the cadence,
/// the status machine and the published snapshot.
///
/// `poll` should return quickly. Acquisition that can block belongs on a
/// worker, see [`WorkerSource`](crate::WorkerSource).
pub trait DataSource: Send {
    /// Get metadata about this source
    fn metadata(&self) -> &SourceMetadata;

    /// Get field metadata describing available data fields
    fn fields(&self) -> Vec<FieldMetadata>;

    /// One-time setup before the first poll
    fn init(&mut self) -> Result<(), InitError> {
        Ok(())
    }

    /// Acquire a fresh snapshot
    fn poll(&mut self) -> Result<Snapshot>;

    /// Release resources; called once when the source is stopped
    fn shutdown(&mut self) {}
}

/// Type-erased data source for dynamic dispatch
pub type BoxedDataSource = Box<dyn DataSource>;
