//! Wall clock data source

use anyhow::Result;
use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde_json::Value;
use std::time::Duration;
use tickboard_core::{
    DataSource, FieldMetadata, FieldPurpose, FieldType, InitError, Snapshot, SourceMetadata,
};
use tickboard_types::source_configs::{ClockSourceConfig, DateFormat, TimeFormat};

/// Timezone resolved at init
#[derive(Debug, Clone, Copy)]
enum Zone {
    Local,
    Named(Tz),
}

pub struct ClockSource {
    metadata: SourceMetadata,
    config: ClockSourceConfig,
    zone: Option<Zone>,
}

impl ClockSource {
    pub fn new(config: ClockSourceConfig) -> Self {
        let metadata = SourceMetadata::new(
            "clock",
            "Clock",
            "Current time and date",
            Duration::from_millis(config.cadence_ms),
        );
        Self {
            metadata,
            config,
            zone: None,
        }
    }

    fn format_time<T: TimeZone>(&self, now: &DateTime<T>) -> String {
        let (hour, suffix) = match self.config.time_format {
            TimeFormat::Hour24 => (now.hour(), ""),
            TimeFormat::Hour12 => {
                let (pm, hour) = now.hour12();
                (hour, if pm { " PM" } else { " AM" })
            }
        };
        if self.config.show_seconds {
            format!("{:02}:{:02}:{:02}{}", hour, now.minute(), now.second(), suffix)
        } else {
            format!("{:02}:{:02}{}", hour, now.minute(), suffix)
        }
    }

    fn format_date<T: TimeZone>(&self, now: &DateTime<T>) -> String {
        let (y, m, d) = (now.year(), now.month(), now.day());
        match self.config.date_format {
            DateFormat::YearMonthDay => format!("{:04}-{:02}-{:02}", y, m, d),
            DateFormat::DayMonthYear => format!("{:02}/{:02}/{:04}", d, m, y),
            DateFormat::MonthDayYear => format!("{:02}/{:02}/{:04}", m, d, y),
        }
    }

    fn snapshot_at<T: TimeZone>(&self, now: &DateTime<T>) -> Snapshot {
        [
            ("caption", Value::from(self.config.timezone.as_str())),
            ("time", Value::from(self.format_time(now))),
            ("date", Value::from(self.format_date(now))),
            ("day_name", Value::from(now.weekday().to_string())),
            ("hour", Value::from(now.hour())),
            ("minute", Value::from(now.minute())),
            ("second", Value::from(now.second())),
        ]
        .into_iter()
        .collect()
    }
}

impl Default for ClockSource {
    fn default() -> Self {
        Self::new(ClockSourceConfig::default())
    }
}

impl DataSource for ClockSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn fields(&self) -> Vec<FieldMetadata> {
        vec![
            FieldMetadata::new("caption", "Timezone", FieldType::Text, FieldPurpose::Caption),
            FieldMetadata::new("time", "Time", FieldType::Text, FieldPurpose::Value),
            FieldMetadata::new("date", "Date", FieldType::Text, FieldPurpose::SecondaryValue),
            FieldMetadata::new("day_name", "Day", FieldType::Text, FieldPurpose::Other),
            FieldMetadata::new("hour", "Hour", FieldType::Numerical, FieldPurpose::Other),
            FieldMetadata::new("minute", "Minute", FieldType::Numerical, FieldPurpose::Other),
            FieldMetadata::new("second", "Second", FieldType::Numerical, FieldPurpose::Other),
        ]
    }

    fn init(&mut self) -> Result<(), InitError> {
        let zone = if self.config.timezone == "Local" {
            Zone::Local
        } else {
            let tz = self.config.timezone.parse::<Tz>().map_err(|e| {
                InitError::Failed(format!("unknown timezone `{}`: {}", self.config.timezone, e))
            })?;
            Zone::Named(tz)
        };
        self.zone = Some(zone);
        Ok(())
    }

    fn poll(&mut self) -> Result<Snapshot> {
        Ok(match self.zone {
            Some(Zone::Named(tz)) => self.snapshot_at(&Utc::now().with_timezone(&tz)),
            Some(Zone::Local) | None => self.snapshot_at(&Local::now()),
        })
    }
}
