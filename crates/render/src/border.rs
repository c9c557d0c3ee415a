//! Box-drawing frame around panel content

/// Wrap `content` in a single-line box of exactly `width` x `height`.
///
/// The title, if any, is set into the top edge. Content lines are expected to
/// be plain or already clipped by the caller; the compositor normalizes the
/// final width anyway. Boxes smaller than 2x2 return the content unchanged.
pub fn boxed(title: Option<&str>, content: Vec<String>, width: usize, height: usize) -> Vec<String> {
    if width < 2 || height < 2 {
        return content;
    }
    let inner_width = width - 2;
    let inner_height = height - 2;

    let mut top = String::from("┌");
    let mut used = 0;
    if let Some(title) = title {
        for ch in title.chars().take(inner_width) {
            top.push(ch);
            used += 1;
        }
    }
    top.extend(std::iter::repeat('─').take(inner_width - used));
    top.push('┐');

    let mut lines = Vec::with_capacity(height);
    lines.push(top);
    let mut content = content.into_iter();
    for _ in 0..inner_height {
        let line = content.next().unwrap_or_default();
        let padded = crate::ansi::pad_or_clip(&line, inner_width);
        lines.push(format!("│{}│", padded));
    }
    let mut bottom = String::from("└");
    bottom.extend(std::iter::repeat('─').take(inner_width));
    bottom.push('┘');
    lines.push(bottom);
    lines
}
