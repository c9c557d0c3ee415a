//! Test data source for debugging and demonstration
//!
//! Produces a configurable value: static, or a wave driven by the shared
//! simulated clock so that every panel reading it sees the same curve.

use anyhow::{bail, Result};
use rand::Rng;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tickboard_core::{
    DataSource, FieldMetadata, FieldPurpose, FieldType, SimClock, Snapshot, SourceMetadata,
};
use tickboard_types::source_configs::{TestMode, TestSourceConfig};

pub struct TestSource {
    metadata: SourceMetadata,
    config: TestSourceConfig,
    clock: Arc<SimClock>,
    polls: u64,
}

impl TestSource {
    pub fn new(config: TestSourceConfig, clock: Arc<SimClock>) -> Self {
        let metadata = SourceMetadata::new(
            "test",
            "Test",
            "Test source for debugging and demonstration",
            Duration::from_millis(config.cadence_ms),
        );
        Self {
            metadata,
            config,
            clock,
            polls: 0,
        }
    }

    /// Noise-free value at `elapsed` seconds
    fn wave_value(config: &TestSourceConfig, elapsed: f64) -> f64 {
        let range = config.max_value - config.min_value;
        let cycles = if config.period > 0.0 {
            elapsed / config.period
        } else {
            0.0
        };

        match config.mode {
            TestMode::Manual => config.manual_value,
            TestMode::SineWave => {
                let normalized = ((cycles * std::f64::consts::TAU).sin() + 1.0) / 2.0;
                config.min_value + normalized * range
            }
            TestMode::Sawtooth => config.min_value + cycles.fract() * range,
            TestMode::Triangle => {
                let phase = cycles.fract() * 2.0;
                let normalized = if phase <= 1.0 { phase } else { 2.0 - phase };
                config.min_value + normalized * range
            }
            TestMode::Square => {
                if cycles.fract() < 0.5 {
                    config.min_value
                } else {
                    config.max_value
                }
            }
        }
    }
}

impl DataSource for TestSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn fields(&self) -> Vec<FieldMetadata> {
        vec![
            FieldMetadata::caption("caption"),
            FieldMetadata::new("value", "Value", FieldType::Numerical, FieldPurpose::Value),
            FieldMetadata::new("unit", "Unit", FieldType::Text, FieldPurpose::Unit),
            FieldMetadata::new(
                "normalized",
                "Normalized",
                FieldType::Percentage,
                FieldPurpose::SecondaryValue,
            ),
            FieldMetadata::new("min", "Min", FieldType::Numerical, FieldPurpose::Other),
            FieldMetadata::new("max", "Max", FieldType::Numerical, FieldPurpose::Other),
        ]
    }

    fn poll(&mut self) -> Result<Snapshot> {
        self.polls += 1;
        if let Some(every) = self.config.fail_every.filter(|n| *n > 0) {
            if self.polls % u64::from(every) == 0 {
                bail!("simulated failure on poll {}", self.polls);
            }
        }

        let mut value = Self::wave_value(&self.config, self.clock.now_secs());
        if self.config.noise > 0.0 {
            value += rand::thread_rng().gen_range(-self.config.noise..=self.config.noise);
        }

        let range = self.config.max_value - self.config.min_value;
        let normalized = if range.abs() > f64::EPSILON {
            ((value - self.config.min_value) / range * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        Ok([
            ("caption", Value::from("Test")),
            ("value", Value::from(value)),
            ("unit", Value::from("")),
            ("normalized", Value::from(normalized)),
            ("min", Value::from(self.config.min_value)),
            ("max", Value::from(self.config.max_value)),
        ]
        .into_iter()
        .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(mode: TestMode) -> TestSourceConfig {
        TestSourceConfig {
            mode,
            period: 4.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_wave_shapes() {
        let sine = wave(TestMode::SineWave);
        assert!((TestSource::wave_value(&sine, 0.0) - 50.0).abs() < 1e-9);
        assert!((TestSource::wave_value(&sine, 1.0) - 100.0).abs() < 1e-9);

        let saw = wave(TestMode::Sawtooth);
        assert!((TestSource::wave_value(&saw, 1.0) - 25.0).abs() < 1e-9);

        let tri = wave(TestMode::Triangle);
        assert!((TestSource::wave_value(&tri, 2.0) - 100.0).abs() < 1e-9);
        assert!((TestSource::wave_value(&tri, 3.0) - 50.0).abs() < 1e-9);

        let square = wave(TestMode::Square);
        assert_eq!(TestSource::wave_value(&square, 1.0), 0.0);
        assert_eq!(TestSource::wave_value(&square, 3.0), 100.0);
    }

    #[test]
    fn test_follows_shared_clock() {
        let clock = Arc::new(SimClock::new());
        let mut source = TestSource::new(wave(TestMode::Sawtooth), Arc::clone(&clock));

        clock.set(2_000);
        assert_eq!(source.poll().unwrap().get_f64("value"), Some(50.0));
        clock.set(3_000);
        assert_eq!(source.poll().unwrap().get_f64("normalized"), Some(75.0));
    }

    #[test]
    fn test_fail_every() {
        let config = TestSourceConfig {
            fail_every: Some(3),
            ..Default::default()
        };
        let mut source = TestSource::new(config, Arc::default());
        let outcomes: Vec<bool> = (0..6).map(|_| source.poll().is_ok()).collect();
        assert_eq!(outcomes, [true, true, false, true, true, false]);
    }

    #[test]
    fn test_noise_stays_within_amplitude() {
        let config = TestSourceConfig {
            noise: 2.0,
            ..Default::default()
        };
        let mut source = TestSource::new(config, Arc::default());
        for _ in 0..50 {
            let value = source.poll().unwrap().get_f64("value").unwrap();
            assert!((48.0..=52.0).contains(&value));
        }
    }
}
