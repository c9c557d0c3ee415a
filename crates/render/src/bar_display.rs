//! Horizontal bar glyphs with eighth-cell resolution

use tickboard_types::display_configs::BarDisplayConfig;

use crate::ansi::{fg, RESET};

/// Partial-cell glyphs, indexed by eighths filled (1..=7)
const EIGHTHS: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];
const FULL: char = '█';
const TRACK: char = '·';

/// Plain bar of exactly `width` columns for `fraction` in 0.0..=1.0
pub fn bar_glyphs(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let eighths = (fraction * (width * 8) as f64).round() as usize;
    let full = eighths / 8;
    let partial = eighths % 8;

    let mut out = String::with_capacity(width * 3);
    out.extend(std::iter::repeat(FULL).take(full));
    if full < width {
        if partial > 0 {
            out.push(EIGHTHS[partial]);
        } else {
            out.push(TRACK);
        }
        out.extend(std::iter::repeat(TRACK).take(width - full - 1));
    }
    out
}

/// Render a colored bar for a raw value according to the config thresholds
pub fn render_bar(config: &BarDisplayConfig, value: f64, width: usize) -> String {
    let glyphs = bar_glyphs(config.fraction(value), width);
    format!("{}{}{}", fg(config.color_for(value)), glyphs, RESET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::visible_len;

    #[test]
    fn test_bar_extremes() {
        assert_eq!(bar_glyphs(0.0, 4), "····");
        assert_eq!(bar_glyphs(1.0, 4), "████");
        assert_eq!(bar_glyphs(f64::NAN, 3), "···");
        assert_eq!(bar_glyphs(2.0, 3), "███");
    }

    #[test]
    fn test_bar_partial_cell() {
        // 0.5 of 3 cells = 12 eighths = 1 full + half cell
        assert_eq!(bar_glyphs(0.5, 3), "█▌·");
    }

    #[test]
    fn test_render_bar_width() {
        let config = BarDisplayConfig::default();
        for value in [0.0, 33.0, 71.0, 100.0] {
            assert_eq!(visible_len(&render_bar(&config, value, 12)), 12);
        }
    }
}
