//! Displayer trait

use serde_json::Value;
use tickboard_render::RenderedBlock;
use tickboard_types::Snapshot;

/// What a panel hands to its displayer on update
#[derive(Debug, Clone, Copy)]
pub enum PanelInput<'a> {
    /// The value of the panel's configured field
    Field(&'a Value),
    /// The whole snapshot, for panels bound to `"*"`
    Snapshot(&'a Snapshot),
}

impl<'a> PanelInput<'a> {
    /// The single value, if this is a field update
    pub fn value(&self) -> Option<&'a Value> {
        match self {
            PanelInput::Field(value) => Some(value),
            PanelInput::Snapshot(_) => None,
        }
    }

    /// Numeric view of a field update
    pub fn as_f64(&self) -> Option<f64> {
        self.value().and_then(Value::as_f64)
    }
}

/// Trait for all panel renderers
///
/// A displayer owns whatever state it accumulates between updates (history
/// buffers, last value). It renders into a block of the panel's size; the
/// panel takes care of padding or clipping the result to exact geometry, so
/// lines may be ragged.
pub trait Displayer: Send {
    /// Unique identifier for this displayer type
    fn id(&self) -> &str;

    /// Absorb new data
    fn update_data(&mut self, input: PanelInput<'_>);

    /// Draw the current state
    fn render(&self, width: u16, height: u16) -> RenderedBlock;
}

/// Type-erased displayer for dynamic dispatch
pub type BoxedDisplayer = Box<dyn Displayer>;
