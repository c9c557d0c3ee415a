//! Error taxonomy for the scheduling core.
//!
//! Per-tick failures (`poll()` errors, missing fields, failing handlers) are
//! caught where they happen and reported through the event bus. The types
//! here are for the callers that do need to branch on them.

use thiserror::Error;
use tickboard_render::LayoutError;

use crate::event_bus::EventType;

/// Failure of a data source's one-time initialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    /// The source tried and failed
    #[error("initialization failed: {0}")]
    Failed(String),
    /// The source cannot run on this system at all (missing backend, no
    /// permission, ...). Reported as its own status instead of being masked.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

/// A panel's field is not present in its source's current snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("panel `{panel}`: field `{field}` missing from snapshot")]
pub struct FieldMissing {
    pub panel: String,
    pub field: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventBusError {
    #[error("handler is not subscribed to {0}")]
    HandlerNotFound(EventType),
}

/// Errors raised while assembling the dashboard, before any tick runs.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("panel `{panel}`: {source}")]
    Layout {
        panel: String,
        #[source]
        source: LayoutError,
    },

    #[error("unknown source type `{0}`")]
    UnknownSourceType(String),

    #[error("unknown displayer type `{0}`")]
    UnknownDisplayerType(String),

    #[error("duplicate source id `{0}`")]
    DuplicateSource(String),

    #[error("panel `{panel}`: source `{source_id}` has no field `{field}` (declared: {declared})")]
    UnknownField {
        panel: String,
        source_id: String,
        field: String,
        declared: String,
    },
}
