//! Minimal CSI handling: escape constants, visible-width measurement and
//! exact-width padding/clipping of styled lines.
//!
//! A CSI sequence here is `ESC [`, any run of digits, `;`, spaces or `?`, and
//! one terminator from `mHJKhlABCDEFG`. Such sequences occupy no columns.
//! Anything else, including a lone or unterminated `ESC`, counts as one
//! visible column per `char`; [`pad_or_clip`] blanks the control characters
//! among them.

use std::borrow::Cow;
use std::fmt::Write;

use tickboard_types::Color;

pub const ESC: char = '\x1b';
pub const CLEAR_SCREEN: &str = "\x1b[2J";
pub const CURSOR_HOME: &str = "\x1b[H";
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

const CSI_TERMINATORS: &[u8] = b"mHJKhlABCDEFG";

/// Byte length of the complete CSI sequence at the start of `bytes`.
pub fn csi_len(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < 3 || bytes[0] != 0x1b || bytes[1] != b'[' {
        return None;
    }
    for (i, &b) in bytes.iter().enumerate().skip(2) {
        if b.is_ascii_digit() || matches!(b, b';' | b' ' | b'?') {
            continue;
        }
        return CSI_TERMINATORS.contains(&b).then_some(i + 1);
    }
    None
}

/// One piece of a styled line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A complete zero-width CSI sequence, verbatim
    Csi(&'a str),
    /// One visible character
    Char(char),
}

/// Iterator splitting a line into CSI sequences and visible characters.
pub struct Segments<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.line[self.pos..];
        if let Some(len) = csi_len(rest.as_bytes()) {
            // CSI bytes are all ASCII, so `len` is a char boundary.
            self.pos += len;
            return Some(Segment::Csi(&rest[..len]));
        }
        let ch = rest.chars().next()?;
        self.pos += ch.len_utf8();
        Some(Segment::Char(ch))
    }
}

pub fn segments(line: &str) -> Segments<'_> {
    Segments { line, pos: 0 }
}

/// Number of terminal columns `line` occupies.
pub fn visible_len(line: &str) -> usize {
    segments(line)
        .filter(|segment| matches!(segment, Segment::Char(_)))
        .count()
}

/// Normalize `line` to exactly `width` visible columns.
///
/// Short lines are padded with plain spaces after the existing content. Long
/// lines keep every CSI sequence up to the cut, drop the rest, and get a
/// trailing [`RESET`] so no open style leaks into neighbouring cells. Control
/// characters outside a CSI sequence (newlines, tabs, a lone `ESC`) would move
/// the cursor, so each one becomes a single space. Lines that already fit and
/// hold no such characters are returned untouched.
pub fn pad_or_clip(line: &str, width: usize) -> Cow<'_, str> {
    let visible = visible_len(line);
    if visible == width && !has_raw_control(line) {
        return Cow::Borrowed(line);
    }

    let clipped = visible > width;
    let mut out = String::with_capacity(line.len() + width.saturating_sub(visible) + RESET.len());
    let mut count = 0;
    for segment in segments(line) {
        if clipped && count == width {
            break;
        }
        match segment {
            Segment::Csi(seq) => out.push_str(seq),
            Segment::Char(ch) => {
                out.push(if ch.is_control() { ' ' } else { ch });
                count += 1;
            }
        }
    }

    if clipped {
        out.push_str(RESET);
    } else {
        out.extend(std::iter::repeat(' ').take(width - count));
    }
    Cow::Owned(out)
}

fn has_raw_control(line: &str) -> bool {
    segments(line).any(|segment| matches!(segment, Segment::Char(ch) if ch.is_control()))
}

/// Remove every CSI sequence, leaving only visible text.
pub fn strip_csi(line: &str) -> String {
    segments(line)
        .filter_map(|segment| match segment {
            Segment::Char(ch) => Some(ch),
            Segment::Csi(_) => None,
        })
        .collect()
}

/// Cursor-position escape for a 1-based row and column.
pub fn cursor_to(row: u32, col: u32) -> String {
    let mut out = String::with_capacity(10);
    push_cursor_to(&mut out, row, col);
    out
}

pub(crate) fn push_cursor_to(out: &mut String, row: u32, col: u32) {
    // Writing to a String cannot fail.
    let _ = write!(out, "\x1b[{};{}H", row, col);
}

/// 24-bit foreground color escape.
pub fn fg(color: Color) -> String {
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

/// Wrap `text` in a foreground color and a trailing reset.
pub fn paint(text: &str, color: Color) -> String {
    let mut out = fg(color);
    out.push_str(text);
    out.push_str(RESET);
    out
}
