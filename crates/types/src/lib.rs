//! tickboard-types: Shared data types for the tickboard terminal dashboard.
//!
//! This crate contains pure data types (snapshots, configs, field metadata,
//! geometry) that are shared across all tickboard crates. It has no terminal
//! or runtime dependencies, making it suitable as a foundation layer.

pub mod color;
pub mod display_configs;
pub mod field;
pub mod panel;
pub mod snapshot;
pub mod source_configs;

// Re-export commonly used types at the crate root for convenience
pub use color::Color;
pub use display_configs::DisplayerConfig;
pub use field::{FieldMetadata, FieldPurpose, FieldType};
pub use panel::{FieldSelector, PanelData, PanelGeometry};
pub use snapshot::Snapshot;
pub use source_configs::{SourceConfig, SourceData};
