//! Smooth table demo - Entry Point

use clap::builder::RangedU64ValueParser;
use clap::Parser;
use smoothtable::config::{self, ConfigError, ResolvedConfig};
use std::path::PathBuf;
use tracing::info;

/// Smooth table demo - scroll a virtualized grid line by line
#[derive(Parser, Debug)]
#[command(name = "smoothtable")]
#[command(version)]
#[command(about = "Scroll a grid of numbered cells backed by a fixed pool of recycled cells")]
pub struct Args {
    /// Rows visible at a time
    #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub rows: Option<usize>,

    /// Cells per row
    #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub columns: Option<usize>,

    /// Number of items
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Resolve the configuration: Defaults → Config File → Env Vars → CLI Args
fn resolve_config(args: &Args) -> Result<ResolvedConfig, ConfigError> {
    let config_file = config::load_config_with_precedence(args.config.clone())?;
    let merged = config::merge_config(config_file);
    let with_env = config::apply_env_overrides(merged);
    Ok(config::apply_cli_overrides(
        with_env,
        args.rows,
        args.columns,
        args.count,
    ))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    smoothtable::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    smoothtable::view::run(&config)?;

    Ok(())
}
