//! Clock source configuration types.

use serde::{Deserialize, Serialize};

/// Time format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TimeFormat {
    #[serde(rename = "24h")]
    #[default]
    Hour24,
    #[serde(rename = "12h")]
    Hour12,
}

/// Date format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DateFormat {
    #[serde(rename = "yyyy-mm-dd")]
    #[default]
    YearMonthDay,
    #[serde(rename = "dd/mm/yyyy")]
    DayMonthYear,
    #[serde(rename = "mm/dd/yyyy")]
    MonthDayYear,
}

fn default_cadence() -> u64 {
    1000
}

fn default_timezone() -> String {
    "Local".to_string()
}

/// Clock source configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClockSourceConfig {
    #[serde(default = "default_cadence")]
    pub cadence_ms: u64,
    #[serde(default)]
    pub time_format: TimeFormat,
    #[serde(default)]
    pub date_format: DateFormat,
    #[serde(default = "default_show_seconds")]
    pub show_seconds: bool,
    /// Timezone ID (e.g., "America/New_York", "Europe/London", "Local")
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_show_seconds() -> bool {
    true
}

impl Default for ClockSourceConfig {
    fn default() -> Self {
        Self {
            cadence_ms: default_cadence(),
            time_format: TimeFormat::default(),
            date_format: DateFormat::default(),
            show_seconds: default_show_seconds(),
            timezone: default_timezone(),
        }
    }
}
