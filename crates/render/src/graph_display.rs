//! Sparkline graph glyphs

use std::collections::VecDeque;

use tickboard_types::Color;

use crate::ansi::{fg, RESET};

/// Vertical eighth blocks, index 0 = empty
const LEVELS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Value range used to scale a graph.
///
/// Fixed bounds win; otherwise the range is taken from the samples. A flat
/// range is widened so a constant series draws as a mid-height line.
pub fn value_range(samples: &VecDeque<f64>, min: Option<f64>, max: Option<f64>) -> (f64, f64) {
    let lo = min.unwrap_or_else(|| samples.iter().copied().fold(f64::INFINITY, f64::min));
    let hi = max.unwrap_or_else(|| samples.iter().copied().fold(f64::NEG_INFINITY, f64::max));
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if hi - lo <= f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    (lo, hi)
}

/// Render the most recent `width` samples as `height` rows of block glyphs,
/// right-aligned so the newest sample is in the last column.
pub fn render_graph(
    samples: &VecDeque<f64>,
    width: usize,
    height: usize,
    range: (f64, f64),
    color: Color,
) -> Vec<String> {
    if height == 0 {
        return Vec::new();
    }
    let (lo, hi) = range;
    let span = hi - lo;
    let total = (height * 8) as f64;

    let visible = samples.len().min(width);
    let skip = samples.len() - visible;
    let padding = width - visible;

    // Height of each column in eighths of a cell
    let columns: Vec<usize> = samples
        .iter()
        .skip(skip)
        .map(|v| {
            let t = if span > 0.0 { ((v - lo) / span).clamp(0.0, 1.0) } else { 0.0 };
            (t * total).round() as usize
        })
        .collect();

    let color = fg(color);
    (0..height)
        .map(|row| {
            // Row 0 is the top of the graph
            let floor = (height - row - 1) * 8;
            let mut line = String::with_capacity(color.len() + width * 3 + RESET.len());
            line.push_str(&color);
            line.extend(std::iter::repeat(' ').take(padding));
            for &level in &columns {
                let fill = level.saturating_sub(floor).min(8);
                line.push(LEVELS[fill]);
            }
            line.push_str(RESET);
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::{strip_csi, visible_len};

    #[test]
    fn test_single_row_sparkline() {
        let samples: VecDeque<f64> = [0.0, 4.0, 8.0].into_iter().collect();
        let rows = render_graph(&samples, 5, 1, (0.0, 8.0), Color::GREEN);
        assert_eq!(rows.len(), 1);
        assert_eq!(strip_csi(&rows[0]), "   ▄█");
    }

    #[test]
    fn test_multi_row_stacks_levels() {
        let samples: VecDeque<f64> = [1.0].into_iter().collect();
        let rows = render_graph(&samples, 1, 2, (0.0, 1.0), Color::GREEN);
        assert_eq!(strip_csi(&rows[0]), "█");
        assert_eq!(strip_csi(&rows[1]), "█");

        let samples: VecDeque<f64> = [0.5].into_iter().collect();
        let rows = render_graph(&samples, 1, 2, (0.0, 1.0), Color::GREEN);
        assert_eq!(strip_csi(&rows[0]), " ");
        assert_eq!(strip_csi(&rows[1]), "█");
    }

    #[test]
    fn test_only_newest_samples_fit() {
        let samples: VecDeque<f64> = (0..10).map(f64::from).collect();
        let rows = render_graph(&samples, 4, 3, value_range(&samples, None, None), Color::RED);
        for row in &rows {
            assert_eq!(visible_len(row), 4);
        }
    }

    #[test]
    fn test_value_range() {
        let empty = VecDeque::new();
        assert_eq!(value_range(&empty, None, None), (0.0, 1.0));

        let flat: VecDeque<f64> = [5.0, 5.0].into_iter().collect();
        assert_eq!(value_range(&flat, None, None), (4.0, 6.0));

        let samples: VecDeque<f64> = [1.0, 3.0].into_iter().collect();
        assert_eq!(value_range(&samples, Some(0.0), None), (0.0, 3.0));
    }
}
