//! Built-in layout used when no config file exists
//!
//! Sized for an 80x24 terminal.

use tickboard_types::display_configs::{
    BarDisplayConfig, GraphDisplayConfig, TableDisplayConfig, TextDisplayConfig,
};
use tickboard_types::source_configs::{
    ClockSourceConfig, CpuSourceConfig, MemorySourceConfig, StaticTextLine,
    StaticTextSourceConfig, TestMode, TestSourceConfig,
};
use tickboard_types::{Color, DisplayerConfig, PanelData, PanelGeometry, SourceConfig, SourceData};

use super::settings::{AppConfig, CONFIG_VERSION};

fn source(id: &str, config: SourceConfig) -> SourceData {
    SourceData::new(id, config)
}

fn panel(
    id: &str,
    source: &str,
    field: &str,
    (x, y, width, height): (u16, u16, u16, u16),
    displayer: DisplayerConfig,
) -> PanelData {
    PanelData::new(id, source, field, PanelGeometry::new(x, y, width, height), displayer)
}

pub fn default_layout() -> AppConfig {
    let sources = vec![
        source(
            "title",
            SourceConfig::StaticText(StaticTextSourceConfig {
                lines: vec![StaticTextLine {
                    field_id: "title".to_string(),
                    text: "tickboard".to_string(),
                }],
                cadence_ms: 0,
            }),
        ),
        source("clock", SourceConfig::Clock(ClockSourceConfig::default())),
        source("cpu", SourceConfig::Cpu(CpuSourceConfig::default())),
        source("memory", SourceConfig::Memory(MemorySourceConfig::default())),
        source(
            "wave",
            SourceConfig::Test(TestSourceConfig {
                mode: TestMode::SineWave,
                period: 10.0,
                noise: 3.0,
                ..Default::default()
            }),
        ),
    ];

    let panels = vec![
        panel(
            "title",
            "title",
            "title",
            (0, 0, 60, 3),
            DisplayerConfig::Text(TextDisplayConfig {
                color: Color::WHITE,
                border: true,
                ..Default::default()
            }),
        )
        .with_cadence(0),
        panel(
            "clock",
            "clock",
            "time",
            (60, 0, 20, 3),
            DisplayerConfig::Text(TextDisplayConfig {
                border: true,
                ..Default::default()
            }),
        )
        .with_cadence(1000),
        panel(
            "cpu-bar",
            "cpu",
            "usage",
            (0, 3, 40, 3),
            DisplayerConfig::Bar(BarDisplayConfig {
                label: Some("CPU".to_string()),
                border: true,
                ..Default::default()
            }),
        )
        .with_cadence(1000),
        panel(
            "memory-bar",
            "memory",
            "usage",
            (40, 3, 40, 3),
            DisplayerConfig::Bar(BarDisplayConfig {
                label: Some("Memory".to_string()),
                border: true,
                ..Default::default()
            }),
        )
        .with_cadence(2000),
        panel(
            "wave-graph",
            "wave",
            "value",
            (0, 6, 50, 10),
            DisplayerConfig::Graph(GraphDisplayConfig {
                label: Some("Wave".to_string()),
                history: 48,
                min: Some(0.0),
                max: Some(100.0),
                border: true,
                ..Default::default()
            }),
        )
        .with_cadence(200),
        panel(
            "memory-table",
            "memory",
            "*",
            (50, 6, 30, 10),
            DisplayerConfig::Table(TableDisplayConfig {
                title: Some("Memory".to_string()),
                keys: ["total", "used", "available", "unit", "swap_usage"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                border: true,
                ..Default::default()
            }),
        )
        .with_cadence(2000),
    ];

    AppConfig {
        version: CONFIG_VERSION,
        tick_interval_ms: 100,
        event_history: tickboard_core::DEFAULT_EVENT_HISTORY,
        terminal: None,
        sources,
        panels,
    }
}
