//! Bar display configuration types

use serde::{Deserialize, Serialize};

use crate::color::Color;

fn default_max() -> f64 {
    100.0
}

fn default_warn_at() -> f64 {
    70.0
}

fn default_crit_at() -> f64 {
    90.0
}

fn default_true() -> bool {
    true
}

/// Configuration for the horizontal bar displayer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarDisplayConfig {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub min: f64,
    #[serde(default = "default_max")]
    pub max: f64,
    /// Values at or above this use the warning color
    #[serde(default = "default_warn_at")]
    pub warn_at: f64,
    /// Values at or above this use the critical color
    #[serde(default = "default_crit_at")]
    pub crit_at: f64,
    #[serde(default = "default_true")]
    pub show_value: bool,
    #[serde(default)]
    pub border: bool,
}

impl BarDisplayConfig {
    /// Color for a raw value according to the thresholds
    pub fn color_for(&self, value: f64) -> Color {
        if value >= self.crit_at {
            Color::RED
        } else if value >= self.warn_at {
            Color::YELLOW
        } else {
            Color::GREEN
        }
    }

    /// Position of `value` within `min..=max`, clamped to 0.0..=1.0
    pub fn fraction(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range <= 0.0 || !value.is_finite() {
            return 0.0;
        }
        ((value - self.min) / range).clamp(0.0, 1.0)
    }
}

impl Default for BarDisplayConfig {
    fn default() -> Self {
        Self {
            label: None,
            min: 0.0,
            max: default_max(),
            warn_at: default_warn_at(),
            crit_at: default_crit_at(),
            show_value: true,
            border: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_is_clamped() {
        let config = BarDisplayConfig::default();
        assert_eq!(config.fraction(50.0), 0.5);
        assert_eq!(config.fraction(-10.0), 0.0);
        assert_eq!(config.fraction(250.0), 1.0);
        assert_eq!(config.fraction(f64::NAN), 0.0);
    }

    #[test]
    fn test_threshold_colors() {
        let config = BarDisplayConfig::default();
        assert_eq!(config.color_for(10.0), Color::GREEN);
        assert_eq!(config.color_for(75.0), Color::YELLOW);
        assert_eq!(config.color_for(95.0), Color::RED);
    }
}
