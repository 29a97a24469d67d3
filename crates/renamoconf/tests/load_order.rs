//! Layered loading against real files: system, user, command line, then env.

use renamoconf::{load_layers, ConfigError, RenamoConfig};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn later_layers_win_field_by_field() {
    let dir = TempDir::new().unwrap();
    let system = write(
        &dir,
        "system.toml",
        "[naming]\nlabel = \"SYS\"\npack_prefix = \"SYSP\"\noutput_prefix = \"sys_\"\n\n[telemetry]\nlog_level = \"error\"\n\n[instruments.aliases]\nWurli = \"Organ\"\nMellotron = \"Strings\"\n",
    );
    let user = write(
        &dir,
        "user.toml",
        "[naming]\nlabel = \"USER\"\npack_prefix = \"USERP\"\n\n[instruments.aliases]\nWurli = \"Electric_Piano\"\n",
    );
    let cli = write(&dir, "cli.toml", "[naming]\npack_prefix = \"CLIP\"\n");
    let vars: HashMap<&str, &str> = [("RENAMO_LABEL", "ENV")].into_iter().collect();

    let (config, sources) = load_layers(vec![system.clone(), user.clone(), cli.clone()], |name| {
        vars.get(name).map(|v| v.to_string())
    })
    .unwrap();

    assert_eq!(config.naming.label, "ENV");
    assert_eq!(config.naming.pack_prefix.as_deref(), Some("CLIP"));
    assert_eq!(config.naming.output_prefix, "sys_");
    assert_eq!(config.telemetry.log_level, "error");
    assert_eq!(
        config.instruments.aliases.get("Wurli").map(String::as_str),
        Some("Electric_Piano")
    );
    assert_eq!(
        config.instruments.aliases.get("Mellotron").map(String::as_str),
        Some("Strings")
    );
    assert_eq!(sources.files, vec![system, user, cli]);
    assert_eq!(sources.env_overrides, vec!["RENAMO_LABEL"]);
}

#[test]
fn no_layers_gives_defaults() {
    let (config, sources) = load_layers(Vec::new(), |_| None).unwrap();
    assert_eq!(config, RenamoConfig::default());
    assert!(sources.files.is_empty());
    assert!(sources.env_overrides.is_empty());
}

#[test]
fn bad_layer_names_its_file() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.toml", "[naming]\nlabel = \"PJ\"\n");
    let bad = write(&dir, "bad.toml", "[naming]\nlabel = 7\n");

    let err = load_layers(vec![good, bad.clone()], |_| None).unwrap_err();
    match err {
        ConfigError::Parse { path, message } => {
            assert_eq!(path, bad);
            assert!(message.contains("naming.label"), "{}", message);
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn missing_layer_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = load_layers(vec![missing.clone()], |_| None).unwrap_err();
    assert!(matches!(err, ConfigError::FileRead { path, .. } if path == missing));
}
