//! Shared layout for displayer output: optional caption line or border.

use serde_json::Value;
use tickboard_render::border::boxed;
use tickboard_render::RenderedBlock;

/// Lay out `content` inside a `width` x `height` block.
///
/// With a border the title sits in the top edge; without one a title takes
/// the first line. `content` receives the inner size and returns its lines.
pub(crate) fn framed(
    title: Option<&str>,
    border: bool,
    width: u16,
    height: u16,
    content: impl FnOnce(usize, usize) -> Vec<String>,
) -> RenderedBlock {
    let (w, h) = (usize::from(width), usize::from(height));

    let lines = if border && w >= 2 && h >= 2 {
        boxed(title, content(w - 2, h - 2), w, h)
    } else {
        match title {
            Some(title) if h >= 2 => {
                let mut lines = vec![title.to_string()];
                lines.extend(content(w, h - 1));
                lines
            }
            _ => content(w, h),
        }
    };

    RenderedBlock::new(width, height, lines).normalized(width, height)
}

/// Human-readable form of a snapshot value
pub(crate) fn format_value(value: &Value, precision: usize) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{:.*}", precision, f),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(3.14159), 2), "3.14");
        assert_eq!(format_value(&json!(7), 2), "7");
        assert_eq!(format_value(&json!("up"), 2), "up");
        assert_eq!(format_value(&json!(null), 2), "-");
        assert_eq!(format_value(&json!(true), 2), "true");
    }

    #[test]
    fn test_title_line_without_border() {
        let block = framed(Some("CPU"), false, 5, 3, |w, h| {
            assert_eq!((w, h), (5, 2));
            vec!["42".to_string()]
        });
        assert_eq!(block.lines(), ["CPU  ", "42   ", "     "]);
    }

    #[test]
    fn test_border_gets_inner_size() {
        let block = framed(Some("M"), true, 6, 3, |w, h| {
            assert_eq!((w, h), (4, 1));
            vec!["ok".to_string()]
        });
        assert_eq!(block.lines(), ["┌M───┐", "│ok  │", "└────┘"]);
        assert!(block.is_exact());
    }
}
