//! Frame assembly: absolute placement of rendered blocks on the terminal.
//!
//! Blocks are painted in submission order. Each line is addressed with its
//! own cursor-position escape, so a block submitted later simply overwrites
//! whatever an earlier block put in the same cells.

use log::{debug, trace};

use crate::ansi::{push_cursor_to, CLEAR_SCREEN, CURSOR_HOME};
use crate::block::RenderedBlock;
use crate::error::LayoutError;

/// Smallest block the compositor will place, in both dimensions
pub const MIN_BLOCK_SIZE: u16 = 3;

/// Where a submitted block ended up after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Collects the blocks of one tick and turns them into one frame.
pub struct Compositor {
    term_width: u16,
    term_height: u16,
    blocks: Vec<(RenderedBlock, Placement)>,
}

impl Compositor {
    pub fn new(term_width: u16, term_height: u16) -> Self {
        Self {
            term_width,
            term_height,
            blocks: Vec::new(),
        }
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        (self.term_width, self.term_height)
    }

    /// Change the terminal size. Pending blocks were clamped against the old
    /// size, so they are dropped.
    pub fn resize(&mut self, term_width: u16, term_height: u16) {
        if (term_width, term_height) != (self.term_width, self.term_height) {
            debug!(
                "Terminal resized from {}x{} to {}x{}",
                self.term_width, self.term_height, term_width, term_height
            );
            self.term_width = term_width;
            self.term_height = term_height;
            self.blocks.clear();
        }
    }

    /// Apply the minimum-size rule, then clamp to the terminal edge.
    pub fn clamp(&self, x: u16, y: u16, width: u16, height: u16) -> Result<Placement, LayoutError> {
        let width = i32::from(width.max(MIN_BLOCK_SIZE));
        let height = i32::from(height.max(MIN_BLOCK_SIZE));
        let width = width.min(i32::from(self.term_width) - i32::from(x));
        let height = height.min(i32::from(self.term_height) - i32::from(y));

        if width <= 0 || height <= 0 {
            return Err(LayoutError::OutsideTerminal {
                x,
                y,
                term_width: self.term_width,
                term_height: self.term_height,
            });
        }

        // Both values are positive and no larger than a u16 terminal size.
        Ok(Placement {
            x,
            y,
            width: width as u16,
            height: height as u16,
        })
    }

    /// Queue a block for the next frame.
    pub fn submit(
        &mut self,
        block: RenderedBlock,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Result<Placement, LayoutError> {
        let placement = self.clamp(x, y, width, height)?;
        trace!(
            "Placed {}x{} block at {},{} as {}x{}",
            width,
            height,
            x,
            y,
            placement.width,
            placement.height
        );
        let block = block.normalized(placement.width, placement.height);
        self.blocks.push((block, placement));
        Ok(placement)
    }

    /// Number of blocks queued for the next frame.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Build the frame: clear, every block line at its absolute position,
    /// then park the cursor on the last row (if there is one).
    pub fn compose(&self) -> String {
        let body: usize = self
            .blocks
            .iter()
            .map(|(block, _)| block.lines().iter().map(|l| l.len() + 12).sum::<usize>())
            .sum();
        let mut frame = String::with_capacity(body + 32);
        frame.push_str(CLEAR_SCREEN);
        frame.push_str(CURSOR_HOME);

        let term_height = u32::from(self.term_height);
        for (block, placement) in &self.blocks {
            for (index, line) in block.lines().iter().enumerate() {
                let row = u32::from(placement.y) + index as u32 + 1;
                if row > term_height {
                    break;
                }
                push_cursor_to(&mut frame, row, u32::from(placement.x) + 1);
                frame.push_str(line);
            }
        }

        if term_height > 0 {
            push_cursor_to(&mut frame, term_height, 1);
        }
        frame
    }

    /// Drop all queued blocks.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }
}
