//! ralph-bench - Benchmark report generator for the Ralph agent loop.
//!
//! A CLI tool that reads the line-delimited JSON metrics log written by
//! the loop, aggregates it, and renders a markdown benchmark report.
//!
//! Exit codes:
//!   0 - Success (including the "no data" and "missing log" soft conditions)
//!   1 - Runtime error (config parse failure, report write failure)

mod analysis;
mod cli;
mod config;
mod models;
mod parser;
mod report;

use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use tracing::{debug, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    init_logging(&args);

    info!("ralph-bench v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run_report(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .ralph-bench.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::DEFAULT_CONFIG_FILE))?;

    println!(
        "✅ Created {} with default settings.",
        config::DEFAULT_CONFIG_FILE
    );
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the parse -> aggregate -> report pipeline.
fn run_report(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let records = parser::parse_metrics(&config.input.path);
    debug!(
        "Loaded {} records from {}",
        records.len(),
        config.input.path.display()
    );

    let summary = analysis::aggregate(&records);

    report::emit(
        summary.as_ref(),
        config.report.output.as_deref(),
        &config.report.title,
    )
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded config from {}", config::DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
