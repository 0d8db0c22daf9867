//! Configuration tests
//!
//! The template written by `to_toml()` must always parse back, and every
//! layer of precedence (env > file > default) must be honored.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed = Config::parse_file_config(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

#[test]
fn test_config_roundtrip_preserves_values() {
    let mut config = Config::default();
    config.data_file = PathBuf::from("/tmp/some dir/friends.json");
    config.capacity = 42;
    config.theme = "nord".to_string();
    config.placeholder_name = "Anonymous".to_string();
    config.demo.enabled = false;
    config.demo.peers = 3;
    config.logging.file_rotation = LogRotation::Hourly;

    let file = Config::parse_file_config(&config.to_toml()).unwrap();
    let loaded = Config::from_sources(file, no_env);

    assert_eq!(loaded.data_file, config.data_file);
    assert_eq!(loaded.capacity, 42);
    assert_eq!(loaded.theme, "nord");
    assert_eq!(loaded.placeholder_name, "Anonymous");
    assert_eq!(loaded.demo, config.demo);
    assert_eq!(loaded.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    let file = Config::parse_file_config("").unwrap();
    let config = Config::from_sources(file, no_env);
    let defaults = Config::default();

    assert_eq!(config.capacity, defaults.capacity);
    assert_eq!(config.max_name_len, defaults.max_name_len);
    assert_eq!(config.max_status_len, defaults.max_status_len);
    assert_eq!(config.placeholder_name, UNKNOWN_NAME);
    assert!(config.enable_tui);
    assert!(config.demo.enabled);
}

#[test]
fn test_env_overrides_file() {
    let file = Config::parse_file_config(
        r#"
capacity = 10
theme = "gruvbox"
data_file = "/from/file.json"

[demo]
enabled = true
"#,
    )
    .unwrap();

    let env = env_from(&[
        ("ROSTER_CAPACITY", "20"),
        ("ROSTER_THEME", "dracula"),
        ("ROSTER_DATA_FILE", "/from/env.json"),
        ("ROSTER_DEMO", "0"),
        ("ROSTER_NO_TUI", "true"),
    ]);
    let config = Config::from_sources(file, env);

    assert_eq!(config.capacity, 20);
    assert_eq!(config.theme, "dracula");
    assert_eq!(config.data_file, PathBuf::from("/from/env.json"));
    assert!(!config.demo.enabled);
    assert!(!config.enable_tui);
}

#[test]
fn test_invalid_env_capacity_falls_through() {
    let file = Config::parse_file_config("capacity = 12").unwrap();
    let config = Config::from_sources(file, env_from(&[("ROSTER_CAPACITY", "lots")]));
    assert_eq!(config.capacity, 12);
}

#[test]
fn test_capacity_is_clamped() {
    let file = Config::parse_file_config("capacity = 0").unwrap();
    assert_eq!(Config::from_sources(file, no_env).capacity, 1);

    let file = Config::parse_file_config("capacity = 10000000").unwrap();
    assert_eq!(Config::from_sources(file, no_env).capacity, MAX_CAPACITY);
}

#[test]
fn test_blank_placeholder_ignored() {
    let file = Config::parse_file_config(r#"placeholder_name = "   ""#).unwrap();
    let config = Config::from_sources(file, no_env);
    assert_eq!(config.placeholder_name, UNKNOWN_NAME);
}

#[test]
fn test_roster_limits_follow_config() {
    let file = Config::parse_file_config(
        r#"
capacity = 5
max_name_len = 32
max_status_len = 64
placeholder_name = "???"
"#,
    )
    .unwrap();
    let limits = Config::from_sources(file, no_env).roster_limits();

    assert_eq!(
        limits,
        RosterLimits {
            capacity: 5,
            max_name_len: 32,
            max_status_len: 64,
            placeholder_name: "???".to_string(),
        }
    );
}

#[test]
fn test_malformed_file_is_an_error() {
    assert!(Config::parse_file_config("capacity = \"many\"").is_err());
    assert!(Config::parse_file_config("[demo\nenabled = true").is_err());
}

#[test]
fn test_logging_section_parsed() {
    let file = Config::parse_file_config(
        r#"
[logging]
level = "DEBUG"
file_enabled = true
file_rotation = "never"
file_prefix = ""
"#,
    )
    .unwrap();
    let logging = Config::from_sources(file, no_env).logging;

    assert_eq!(logging.level, tracing::level_filters::LevelFilter::DEBUG);
    assert_eq!(logging.level_name(), "debug");
    assert!(logging.file_enabled);
    assert_eq!(logging.file_rotation, LogRotation::Never);
    assert_eq!(logging.file_prefix, "roster.log");
}

#[test]
fn test_bad_logging_values_are_errors() {
    assert!(Config::parse_file_config("[logging]\nfile_rotation = \"weekly\"").is_err());
    assert!(Config::parse_file_config("[logging]\nlevel = \"chatty\"").is_err());
}
