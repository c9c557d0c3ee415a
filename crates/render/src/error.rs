//! Layout errors

use thiserror::Error;

/// Geometry that cannot be placed on the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Width or height of zero
    #[error("geometry {width}x{height} must have a non-zero width and height")]
    ZeroSize { width: u16, height: u16 },

    /// Origin is on or past the terminal edge, so nothing would be visible
    #[error("block at column {x}, row {y} lies outside the {term_width}x{term_height} terminal")]
    OutsideTerminal {
        x: u16,
        y: u16,
        term_width: u16,
        term_height: u16,
    },
}
