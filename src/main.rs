use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tickboard::config::AppConfig;
use tickboard::{builtin_registry, UpdateManager};
use tickboard_core::{BuildContext, SourceConfig};

/// Fallback when the terminal size cannot be detected (e.g. output is piped)
const FALLBACK_TERMINAL: (u16, u16) = (80, 24);

/// tickboard - a multi-cadence terminal dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "tickboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Exit after this many ticks
    #[arg(short = 'n', long = "ticks", value_name = "N")]
    ticks: Option<u64>,

    /// List available source types with their fields, and displayer types
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Print the effective layout as JSON and exit
    #[arg(long = "dump-config")]
    dump_config: bool,

    /// Layout file to load at startup
    #[arg(value_name = "LAYOUT_FILE")]
    layout_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        eprintln!("tickboard: {:#}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> AppConfig {
    if let Some(ref layout_path) = cli.layout_file {
        match AppConfig::load_from_path(layout_path) {
            Ok(config) => {
                info!("Loaded layout from: {}", layout_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load layout file '{}': {:#}", layout_path.display(), e);
            }
        }
    }
    AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config: {:#}, using built-in layout", e);
        AppConfig::default()
    })
}

fn terminal_size(config: &AppConfig) -> Option<(u16, u16)> {
    if let Some(size) = config.terminal {
        return Some((size.width, size.height));
    }
    crossterm::terminal::size().ok()
}

fn run(cli: Cli) -> Result<()> {
    info!("Starting tickboard v{}", env!("CARGO_PKG_VERSION"));
    let registry = builtin_registry();

    if cli.list {
        let ctx = BuildContext::default();
        println!("Sources:");
        for id in registry.list_sources() {
            println!("  {}", id);
            let source = SourceConfig::default_for_type(&id)
                .map(|config| registry.create_source(&config, &ctx));
            match source {
                Some(Ok(source)) => {
                    let fields = source.fields();
                    if fields.is_empty() {
                        println!("    (fields known at run time)");
                    }
                    for field in fields {
                        println!("    {}", field);
                    }
                }
                Some(Err(e)) => debug!("No field list for {}: {:#}", id, e),
                None => println!("    (fields known at run time)"),
            }
        }
        println!("Displayers:");
        for id in registry.list_displayers() {
            println!("  {}", id);
        }
        return Ok(());
    }

    let config = load_config(&cli);
    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let initial = terminal_size(&config).unwrap_or(FALLBACK_TERMINAL);
    let mut manager = UpdateManager::from_config(&config, &registry, initial)?;
    let interval = Duration::from_millis(config.tick_interval_ms);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    let stdout = std::io::stdout();
    runtime.block_on(manager.run(
        interval,
        cli.ticks,
        || terminal_size(&config),
        |frame| {
            let mut out = stdout.lock();
            out.write_all(frame.as_bytes())?;
            out.flush()
        },
    ))?;

    for line in manager.status_report() {
        info!("{}", line);
    }
    Ok(())
}
