//! Minimal configuration loading for renamo.
//!
//! The engine takes plain values (label, pack prefix, aliases); this crate
//! is where those values come from. It knows nothing about the engine.
//!
//! # Usage
//!
//! ```rust,no_run
//! use renamoconf::RenamoConfig;
//!
//! let (config, sources) = RenamoConfig::load_with_sources_from(None).expect("Failed to load config");
//! println!("files: {:?}", sources.files);
//! println!("label: {}", config.naming.label);
//! for (alias, core) in &config.instruments.aliases {
//!     println!("{} -> {}", alias, core);
//! }
//! ```
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/renamo/config.toml` (system)
//! 2. `~/.config/renamo/config.toml` (user)
//! 3. `./renamo.toml` (local override), or the path given on the command line
//! 4. Environment variables (`RENAMO_*`, `RUST_LOG`)
//!
//! # Example Config
//!
//! ```toml
//! [naming]
//! label = "P&J"
//! pack_prefix = "DEMO"
//! output_prefix = "_"
//!
//! [telemetry]
//! log_level = "info"
//!
//! [instruments.aliases]
//! "Wurli" = "Electric_Piano"
//! ```

pub mod loader;
pub mod settings;

pub use loader::{discover_config_files_with_override, expand_path, load_layers, ConfigSources};
pub use settings::{InstrumentsConfig, NamingConfig, TelemetryConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Complete renamo configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RenamoConfig {
    #[serde(default)]
    pub naming: NamingConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,

    #[serde(default)]
    pub instruments: InstrumentsConfig,
}

impl RenamoConfig {
    /// Load configuration from every source and report where values came from.
    ///
    /// Load order (later wins):
    /// 1. Compiled defaults
    /// 2. `/etc/renamo/config.toml`
    /// 3. `~/.config/renamo/config.toml`
    /// 4. `config_path` if given, else `./renamo.toml`
    /// 5. Environment variables
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        loader::load_layers(
            loader::discover_config_files_with_override(config_path),
            |name| std::env::var(name).ok(),
        )
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> String {
        // Build TOML manually for nicer formatting
        let mut output = String::new();

        output.push_str("# renamo configuration\n\n");

        output.push_str("[naming]\n");
        output.push_str(&format!("label = {}\n", quoted(&self.naming.label)));
        match &self.naming.pack_prefix {
            Some(prefix) => output.push_str(&format!("pack_prefix = {}\n", quoted(prefix))),
            None => output.push_str("# pack_prefix = \"DEMO\"\n"),
        }
        output.push_str(&format!(
            "output_prefix = {}\n",
            quoted(&self.naming.output_prefix)
        ));

        output.push_str("\n[telemetry]\n");
        output.push_str(&format!(
            "log_level = {}\n",
            quoted(&self.telemetry.log_level)
        ));

        output.push_str("\n[instruments.aliases]\n");
        for (alias, core) in &self.instruments.aliases {
            output.push_str(&format!("{} = {}\n", quoted(alias), quoted(core)));
        }

        output
    }
}

fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}
