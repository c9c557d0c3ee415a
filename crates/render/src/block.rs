//! Fixed-size text blocks produced by panel renderers.

use crate::ansi::{pad_or_clip, visible_len};

/// Text output of one render call.
///
/// Renderers may hand back ragged lines; [`RenderedBlock::normalized`] turns
/// them into exactly `height` lines of exactly `width` visible columns, which
/// is the only shape the compositor emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    width: u16,
    height: u16,
    lines: Vec<String>,
}

impl RenderedBlock {
    pub fn new(width: u16, height: u16, lines: Vec<String>) -> Self {
        Self {
            width,
            height,
            lines,
        }
    }

    /// A block of spaces.
    pub fn blank(width: u16, height: u16) -> Self {
        let line = " ".repeat(usize::from(width));
        Self::new(width, height, vec![line; usize::from(height)])
    }

    /// Split multi-line text into a block of the given size.
    pub fn from_text(text: &str, width: u16, height: u16) -> Self {
        Self::new(width, height, text.lines().map(str::to_string).collect())
            .normalized(width, height)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Pad or clip to exactly `width` x `height`.
    pub fn normalized(self, width: u16, height: u16) -> Self {
        let w = usize::from(width);
        let h = usize::from(height);
        let mut lines: Vec<String> = self
            .lines
            .into_iter()
            .take(h)
            .map(|line| pad_or_clip(&line, w).into_owned())
            .collect();
        while lines.len() < h {
            lines.push(" ".repeat(w));
        }
        Self::new(width, height, lines)
    }

    /// True when every line is exactly `width` columns and there are `height` lines.
    pub fn is_exact(&self) -> bool {
        self.lines.len() == usize::from(self.height)
            && self
                .lines
                .iter()
                .all(|line| visible_len(line) == usize::from(self.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::strip_csi;

    #[test]
    fn test_normalize_pads_missing_lines() {
        let block = RenderedBlock::new(4, 3, vec!["ab".to_string()]).normalized(4, 3);
        assert_eq!(block.lines(), &["ab  ", "    ", "    "]);
        assert!(block.is_exact());
    }

    #[test]
    fn test_normalize_truncates_extra_lines_and_columns() {
        let block = RenderedBlock::new(
            2,
            1,
            vec!["\x1b[31mwide\x1b[0m".to_string(), "dropped".to_string()],
        )
        .normalized(2, 1);

        assert_eq!(block.lines().len(), 1);
        assert_eq!(strip_csi(&block.lines()[0]), "wi");
        assert!(block.is_exact());
    }

    #[test]
    fn test_from_text() {
        let block = RenderedBlock::from_text("one\ntwo", 5, 2);
        assert_eq!(block.lines(), &["one  ", "two  "]);
    }

    #[test]
    fn test_blank_is_exact() {
        assert!(RenderedBlock::blank(7, 2).is_exact());
        assert!(!RenderedBlock::new(3, 2, vec!["abc".to_string()]).is_exact());
    }
}
