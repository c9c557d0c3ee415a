//! tickboard-render: ANSI text layout for the tickboard terminal dashboard.
//!
//! Everything here works on strings that mix visible characters with
//! zero-width CSI sequences: measuring them, padding/clipping them to an
//! exact column count, and placing fixed-size blocks on an absolute grid.

pub mod ansi;
pub mod bar_display;
pub mod block;
pub mod border;
pub mod compositor;
pub mod error;
pub mod graph_display;
pub mod screen;

pub use ansi::{pad_or_clip, strip_csi, visible_len};
pub use block::RenderedBlock;
pub use compositor::{Compositor, Placement, MIN_BLOCK_SIZE};
pub use error::LayoutError;
pub use screen::VirtualScreen;
