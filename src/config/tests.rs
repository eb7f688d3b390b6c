//! Configuration tests
//!
//! Every persisted field has to survive `to_toml` -> parse -> `resolve`.
//! When you add a field, the round-trip test fails until serialization
//! knows about it.

use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

fn no_env(_: &str) -> Option<String> {
    None
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let resolved = Config::resolve(parsed.unwrap(), no_env);
    assert_eq!(resolved.api_url, config.api_url);
    assert_eq!(resolved.default_employee, config.default_employee);
    assert_eq!(resolved.logging, config.logging);
}

#[test]
fn test_config_roundtrip_custom_values() {
    let mut config = Config::default();
    config.api_url = "http://localhost:3000".to_string();
    config.default_employee = 7;
    config.logging.level = "debug".to_string();
    config.logging.file_enabled = true;
    config.logging.file_dir = PathBuf::from("/var/log/post\"board");
    config.logging.file_rotation = LogRotation::Hourly;
    config.logging.file_prefix = "pb".to_string();

    let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    let resolved = Config::resolve(parsed, no_env);

    assert_eq!(resolved.api_url, "http://localhost:3000");
    assert_eq!(resolved.default_employee, 7);
    assert_eq!(resolved.logging, config.logging);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_defaults_when_nothing_is_set() {
    let config = Config::resolve(FileConfig::default(), no_env);
    assert_eq!(config.api_url, crate::api::DEFAULT_API_URL);
    assert_eq!(config.default_employee, DEFAULT_EMPLOYEE);
    assert!(config.enable_tui);
    assert!(!config.demo_mode);
    assert_eq!(config.logging, LoggingConfig::default());
}

#[test]
fn test_env_overrides_file() {
    let file = FileConfig {
        api_url: Some("http://from-file".to_string()),
        default_employee: Some(3),
        logging: None,
    };
    let env = env_from(&[
        ("POSTBOARD_API_URL", "http://from-env"),
        ("POSTBOARD_EMPLOYEE", "5"),
    ]);

    let config = Config::resolve(file, env);
    assert_eq!(config.api_url, "http://from-env");
    assert_eq!(config.default_employee, 5);
}

#[test]
fn test_file_used_when_env_missing_or_unusable() {
    let file = FileConfig {
        api_url: Some("http://from-file".to_string()),
        default_employee: Some(3),
        logging: None,
    };
    let env = env_from(&[("POSTBOARD_API_URL", "  "), ("POSTBOARD_EMPLOYEE", "abc")]);

    let config = Config::resolve(file, env);
    assert_eq!(config.api_url, "http://from-file");
    assert_eq!(config.default_employee, 3);
}

#[test]
fn test_zero_employee_falls_back_to_default() {
    let file = FileConfig {
        default_employee: Some(0),
        ..FileConfig::default()
    };
    let config = Config::resolve(file, no_env);
    assert_eq!(config.default_employee, DEFAULT_EMPLOYEE);
}

#[test]
fn test_runtime_flags() {
    let config = Config::resolve(
        FileConfig::default(),
        env_from(&[("POSTBOARD_NO_TUI", "true"), ("POSTBOARD_DEMO", "1")]),
    );
    assert!(!config.enable_tui);
    assert!(config.demo_mode);

    let config = Config::resolve(
        FileConfig::default(),
        env_from(&[("POSTBOARD_NO_TUI", "0"), ("POSTBOARD_DEMO", "no")]),
    );
    assert!(config.enable_tui);
    assert!(!config.demo_mode);
}

#[test]
fn test_zero_env_employee_keeps_file_value() {
    let file = FileConfig {
        default_employee: Some(3),
        ..FileConfig::default()
    };
    let config = Config::resolve(file, env_from(&[("POSTBOARD_EMPLOYEE", "0")]));
    assert_eq!(config.default_employee, 3);
}

#[test]
fn test_log_rotation_from_file() {
    let file: FileConfig = toml::from_str("[logging]\nfile_rotation = \"hourly\"\n").unwrap();
    let logging = Config::resolve(file, no_env).logging;
    assert_eq!(logging.file_rotation, LogRotation::Hourly);
    assert_eq!(logging.level, "info");

    let file: FileConfig = toml::from_str("[logging]\nfile_rotation = \"never\"\n").unwrap();
    assert_eq!(
        Config::resolve(file, no_env).logging.file_rotation,
        LogRotation::Never
    );
}

#[test]
fn test_unknown_log_rotation_is_rejected() {
    let parsed: Result<FileConfig, _> = toml::from_str("[logging]\nfile_rotation = \"weekly\"\n");
    assert!(parsed.is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// File handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let parsed = Config::read_file_config(&dir.path().join("config.toml")).unwrap();
    assert!(parsed.is_none());
}

#[test]
fn test_written_file_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.default_employee = 4;
    config.write_to(&path).unwrap();

    let file = Config::read_file_config(&path).unwrap().unwrap();
    assert_eq!(file.default_employee, Some(4));
    assert_eq!(file.logging.map(|l| l.file_prefix).as_deref(), Some("postboard"));
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[logging]\nlevel = \"trace\"\n").unwrap();

    let file = Config::read_file_config(&path).unwrap().unwrap();
    let config = Config::resolve(file, no_env);
    assert_eq!(config.logging.level, "trace");
    assert_eq!(config.logging.file_prefix, "postboard");
    assert_eq!(config.api_url, crate::api::DEFAULT_API_URL);
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "default_employee = \"seven\"\n").unwrap();

    let err = Config::read_file_config(&path).unwrap_err();
    assert!(format!("{err:#}").contains("parse"));
}
