//! External command data source
//!
//! Runs a program on a worker thread and turns each `key=value` line of its
//! stdout into a snapshot field. Values that parse as numbers become numbers.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::process::Command;
use std::time::Duration;
use tickboard_core::worker::Job;
use tickboard_core::{FieldMetadata, Snapshot, SourceMetadata, WorkerSource};
use tickboard_types::source_configs::CommandSourceConfig;

/// Parse `key=value` lines. Blank lines, `#` comments and lines without
/// `=` are ignored; the last occurrence of a key wins.
pub fn parse_key_values(output: &str) -> Snapshot {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .filter(|(key, _)| !key.trim().is_empty())
        .map(|(key, value)| {
            let value = value.trim();
            let value = match value.parse::<f64>() {
                Ok(n) if n.is_finite() => Value::from(n),
                _ => Value::from(value),
            };
            (key.trim().to_string(), value)
        })
        .collect()
}

fn run(config: &CommandSourceConfig) -> Result<Snapshot> {
    let output = Command::new(&config.program)
        .args(&config.args)
        .output()
        .with_context(|| format!("failed to run `{}`", config.program))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "`{}` exited with {}: {}",
            config.program,
            output.status,
            stderr.trim()
        );
    }
    Ok(parse_key_values(&String::from_utf8_lossy(&output.stdout)))
}

/// Build a worker-backed source for `config`
pub fn command_source(config: CommandSourceConfig) -> WorkerSource {
    let metadata = SourceMetadata::new(
        "command",
        format!("Command: {}", config.program),
        "key=value output of an external program",
        Duration::from_millis(config.cadence_ms),
    );
    let interval = Duration::from_millis(config.run_interval_ms());
    let fields: Vec<FieldMetadata> = Vec::new();
    let job: Job = Box::new(move || run(&config));
    WorkerSource::new(metadata, fields, interval, job)
}
