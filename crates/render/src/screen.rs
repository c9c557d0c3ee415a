//! Headless replay of composed frames.
//!
//! Interprets exactly the escape subset the compositor emits (clear, home,
//! cursor position, SGR) onto a character grid. Used to print a plain-text
//! copy of a frame and to check what actually lands on screen.

use crate::ansi::{segments, Segment};

/// Plain character grid with a cursor.
#[derive(Debug, Clone)]
pub struct VirtualScreen {
    width: usize,
    height: usize,
    cells: Vec<Vec<char>>,
    row: usize,
    col: usize,
    /// Largest 1-based (row, col) addressed by a cursor-position escape
    max_addressed: (u32, u32),
}

impl VirtualScreen {
    pub fn new(width: u16, height: u16) -> Self {
        let width = usize::from(width);
        let height = usize::from(height);
        Self {
            width,
            height,
            cells: vec![vec![' '; width]; height],
            row: 0,
            col: 0,
            max_addressed: (0, 0),
        }
    }

    /// Replay a whole frame onto a fresh screen.
    pub fn replay(frame: &str, width: u16, height: u16) -> Self {
        let mut screen = Self::new(width, height);
        screen.apply(frame);
        screen
    }

    pub fn apply(&mut self, output: &str) {
        for segment in segments(output) {
            match segment {
                Segment::Csi(seq) => self.apply_csi(seq),
                Segment::Char(ch) => self.put(ch),
            }
        }
    }

    fn apply_csi(&mut self, seq: &str) {
        // seq is ESC '[' params terminator
        let params = &seq[2..seq.len() - 1];
        match seq.as_bytes()[seq.len() - 1] {
            b'J' if params == "2" => {
                for row in &mut self.cells {
                    row.fill(' ');
                }
            }
            b'H' => {
                let mut parts = params.split(';').map(|p| p.parse::<u32>().unwrap_or(1));
                let row = parts.next().unwrap_or(1).max(1);
                let col = parts.next().unwrap_or(1).max(1);
                if !params.is_empty() {
                    self.max_addressed.0 = self.max_addressed.0.max(row);
                    self.max_addressed.1 = self.max_addressed.1.max(col);
                }
                self.row = (row - 1) as usize;
                self.col = (col - 1) as usize;
            }
            // Styling and everything else has no effect on the text grid
            _ => {}
        }
    }

    fn put(&mut self, ch: char) {
        if self.row < self.height && self.col < self.width {
            self.cells[self.row][self.col] = ch;
        }
        self.col += 1;
    }

    pub fn row_text(&self, row: usize) -> String {
        self.cells
            .get(row)
            .map(|cells| cells.iter().collect())
            .unwrap_or_default()
    }

    pub fn rows(&self) -> Vec<String> {
        (0..self.height).map(|row| self.row_text(row)).collect()
    }

    pub fn max_addressed(&self) -> (u32, u32) {
        self.max_addressed
    }
}
