//! tickboard-core: Scheduling core for the tickboard terminal dashboard.
//!
//! This crate contains the external contracts (`DataSource`, `Displayer`),
//! the cadence-gated wrappers that schedule them (`SourceSlot`, `Panel`),
//! the `EventBus` used for lifecycle and error signalling, and the
//! `Registry` that resolves configs into live instances.

pub mod cadence;
pub mod clock;
pub mod constants;
mod data_source;
mod displayer;
pub mod error;
pub mod event_bus;
mod panel;
mod registry;
mod source_slot;
mod source_table;
pub mod worker;

pub use cadence::Cadence;
pub use clock::SimClock;
pub use constants::{DEFAULT_EVENT_HISTORY, DEFAULT_TICK_INTERVAL};
pub use data_source::{BoxedDataSource, DataSource, SourceMetadata};
pub use displayer::{BoxedDisplayer, Displayer, PanelInput};
pub use error::{CoreError, EventBusError, FieldMissing, InitError};
pub use event_bus::{handler, Event, EventBus, EventType, Handler};
pub use panel::Panel;
pub use registry::{BuildContext, DisplayerFactory, Registry, SourceFactory};
pub use source_slot::{SourceSlot, SourceStatus};
pub use source_table::{SourceHandle, SourceTable};
pub use worker::WorkerSource;

// Re-export types used in trait signatures for convenience
pub use tickboard_render::{LayoutError, RenderedBlock};
pub use tickboard_types::{
    DisplayerConfig, FieldMetadata, FieldPurpose, FieldSelector, FieldType, PanelGeometry,
    Snapshot, SourceConfig,
};
