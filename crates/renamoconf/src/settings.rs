//! Config sections: naming, telemetry and extra instrument vocabulary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How output names are built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    /// First segment of every output name.
    /// Default: P&J
    #[serde(default = "NamingConfig::default_label")]
    pub label: String,

    /// Pack abbreviation override, 3-8 letters. When unset the abbreviation
    /// comes from the pack folder name.
    #[serde(default)]
    pub pack_prefix: Option<String>,

    /// Prefix of the destination root, created next to the source.
    /// Default: _
    #[serde(default = "NamingConfig::default_output_prefix")]
    pub output_prefix: String,
}

impl NamingConfig {
    fn default_label() -> String {
        "P&J".to_string()
    }

    fn default_output_prefix() -> String {
        "_".to_string()
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            label: Self::default_label(),
            pack_prefix: None,
            output_prefix: Self::default_output_prefix(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive string.
    /// Default: info
    #[serde(default = "TelemetryConfig::default_log_level")]
    pub log_level: String,
}

impl TelemetryConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}

/// Vocabulary added on top of the built-in instrument tables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InstrumentsConfig {
    /// Alias -> canonical core, e.g. `"Wurli" = "Electric_Piano"`.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}
