//! rncli - rename sample-pack stems into canonical names
//!
//! Subcommands:
//! - `rncli rename <source>` - Copy every stem into `_<source>` under its new name
//! - `rncli classify <phrase>...` - Show how instrument phrases are read
//! - `rncli key <key>...` - Normalize musical keys
//! - `rncli folder <name>...` - Parse composition folder names
//! - `rncli config` - Print the effective configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use renamoconf::RenamoConfig;
use std::path::PathBuf;

mod commands;
mod progress;

#[derive(Parser)]
#[command(name = "rncli")]
#[command(about = "Rename sample-pack stems into canonical names")]
#[command(version)]
struct Cli {
    /// Config file (replaces ./renamo.toml); `~/` and `$VAR/` are expanded
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename every composition folder under SOURCE
    Rename {
        /// Folder holding the composition folders
        source: PathBuf,

        /// Pack abbreviation, 3-8 letters (default: derived from the pack folder)
        #[arg(short, long)]
        pack_prefix: Option<String>,

        /// First segment of every name
        #[arg(short, long)]
        label: Option<String>,

        /// Show what would be copied without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify instrument phrases into core and adjective
    Classify {
        #[arg(required = true)]
        phrases: Vec<String>,
    },

    /// Normalize musical keys (Abm -> G#min)
    Key {
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Parse composition folder names
    Folder {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.as_deref().map(|path| match path.to_str() {
        Some(raw) => renamoconf::expand_path(raw),
        None => path.to_path_buf(),
    });
    let (config, sources) = RenamoConfig::load_with_sources_from(config_path.as_deref())
        .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&config.telemetry.log_level)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        files = ?sources.files,
        env = ?sources.env_overrides,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Rename {
            source,
            pack_prefix,
            label,
            dry_run,
            json,
        } => {
            commands::rename(
                &config,
                commands::RenameArgs {
                    source,
                    pack_prefix,
                    label,
                    dry_run,
                    json,
                },
            )?;
        }
        Commands::Classify { phrases } => commands::classify(&config, &phrases),
        Commands::Key { keys } => commands::key(&keys),
        Commands::Folder { names } => commands::folder(&names),
        Commands::Config => commands::show_config(&config, &sources),
    }

    Ok(())
}
