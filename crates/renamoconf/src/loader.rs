//! Config file discovery, loading, and environment variable overlay.

use crate::{ConfigError, RenamoConfig};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Discover config files in load order (system, user, local).
///
/// If `cli_path` is provided it replaces the local override. A CLI path is
/// returned even when missing so that loading reports the error.
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/renamo/config.toml");
    if system.exists() {
        files.push(system);
    }

    // User config (XDG_CONFIG_HOME or ~/.config)
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("renamo/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        files.push(path.to_path_buf());
        return files;
    }

    let local = PathBuf::from("renamo.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Read and parse a TOML file into a raw table.
pub fn load_from_file(path: &Path) -> Result<toml::Table, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), "Loaded config file");

    parse_toml(&contents, path)
}

fn parse_toml(contents: &str, path: &Path) -> Result<toml::Table, ConfigError> {
    contents.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Apply the keys present in `table` on top of `config`.
///
/// Absent keys keep their current value, so files layer field by field.
/// Values of the wrong type are rejected.
pub fn overlay_table(
    config: &mut RenamoConfig,
    table: &toml::Table,
    path: &Path,
) -> Result<(), ConfigError> {
    let wrong_type = |key: &str, expected: &str| ConfigError::Parse {
        path: path.to_path_buf(),
        message: format!("{} must be {}", key, expected),
    };

    if let Some(naming) = section(table, "naming", path)? {
        if let Some(v) = naming.get("label") {
            config.naming.label = v
                .as_str()
                .ok_or_else(|| wrong_type("naming.label", "a string"))?
                .to_string();
        }
        if let Some(v) = naming.get("pack_prefix") {
            let prefix = v
                .as_str()
                .ok_or_else(|| wrong_type("naming.pack_prefix", "a string"))?;
            config.naming.pack_prefix = non_blank(prefix);
        }
        if let Some(v) = naming.get("output_prefix") {
            config.naming.output_prefix = v
                .as_str()
                .ok_or_else(|| wrong_type("naming.output_prefix", "a string"))?
                .to_string();
        }
    }

    if let Some(telemetry) = section(table, "telemetry", path)? {
        if let Some(v) = telemetry.get("log_level") {
            config.telemetry.log_level = v
                .as_str()
                .ok_or_else(|| wrong_type("telemetry.log_level", "a string"))?
                .to_string();
        }
    }

    if let Some(instruments) = section(table, "instruments", path)? {
        if let Some(aliases) = section(instruments, "aliases", path)? {
            for (alias, core) in aliases {
                let core = core
                    .as_str()
                    .ok_or_else(|| wrong_type(&format!("instruments.aliases.{}", alias), "a string"))?;
                config
                    .instruments
                    .aliases
                    .insert(alias.clone(), core.to_string());
            }
        }
    }

    Ok(())
}

fn section<'a>(
    table: &'a toml::Table,
    name: &str,
    path: &Path,
) -> Result<Option<&'a toml::Table>, ConfigError> {
    match table.get(name) {
        None => Ok(None),
        Some(value) => value.as_table().map(Some).ok_or_else(|| ConfigError::Parse {
            path: path.to_path_buf(),
            message: format!("[{}] must be a table", name),
        }),
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Layer `files` over the defaults in order, then the variables `lookup`
/// resolves. A file that cannot be read or parsed aborts the load.
pub fn load_layers<F>(
    files: Vec<PathBuf>,
    lookup: F,
) -> Result<(RenamoConfig, ConfigSources), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut sources = ConfigSources::default();
    let mut config = RenamoConfig::default();

    for path in files {
        let table = load_from_file(&path)?;
        overlay_table(&mut config, &table, &path)?;
        sources.files.push(path);
    }

    apply_overrides_from(&mut config, &mut sources, lookup);

    Ok((config, sources))
}

/// Apply overrides from any variable lookup, e.g. a fixed map in tests.
pub fn apply_overrides_from<F>(config: &mut RenamoConfig, sources: &mut ConfigSources, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("RENAMO_LABEL") {
        config.naming.label = v;
        sources.env_overrides.push("RENAMO_LABEL".to_string());
    }
    if let Some(v) = lookup("RENAMO_PACK_PREFIX") {
        config.naming.pack_prefix = non_blank(&v);
        sources.env_overrides.push("RENAMO_PACK_PREFIX".to_string());
    }
    if let Some(v) = lookup("RENAMO_OUTPUT_PREFIX") {
        config.naming.output_prefix = v;
        sources.env_overrides.push("RENAMO_OUTPUT_PREFIX".to_string());
    }

    if let Some(v) = lookup("RENAMO_LOG_LEVEL") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("RENAMO_LOG_LEVEL".to_string());
    }
    // Also support RUST_LOG
    if let Some(v) = lookup("RUST_LOG") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("RUST_LOG".to_string());
    }
}

/// Expand ~ and environment variables in a path.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(stripped);
        }
    } else if let Some(stripped) = path.strip_prefix('$') {
        // Handle $VAR/rest/of/path
        let (var_name, rest) = match stripped.find('/') {
            Some(slash_pos) => (&stripped[..slash_pos], Some(&stripped[slash_pos + 1..])),
            None => (stripped, None),
        };
        if let Ok(var_value) = env::var(var_name) {
            let base = PathBuf::from(var_value);
            return match rest {
                Some(rest) => base.join(rest),
                None => base,
            };
        }
    }

    PathBuf::from(path)
}
