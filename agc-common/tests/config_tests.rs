//! Unit tests for configuration resolution and graceful degradation
//!
//! Missing or malformed config files must never prevent startup; the
//! resolver falls through to compiled defaults. CLI overrides beat the
//! file, which beats the defaults.

use agc_common::config::{CompiledDefaults, ServiceConfig, TomlConfig, DEFAULT_PORT};
use std::io::Write;
use std::path::PathBuf;

fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_compiled_defaults() {
    let defaults = CompiledDefaults::for_current_platform();

    assert_eq!(defaults.port, DEFAULT_PORT);
    assert!(!defaults.database.as_os_str().is_empty());
    assert!(defaults.database.to_string_lossy().ends_with("agc.db"));
}

#[test]
fn test_resolve_with_no_overrides_uses_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist.toml");

    let config = ServiceConfig::resolve(None, None, Some(&missing));

    let defaults = CompiledDefaults::for_current_platform();
    assert_eq!(config.port, defaults.port);
    assert_eq!(config.database, defaults.database);
}

#[test]
fn test_toml_file_values_are_applied() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_config(&dir, "port = 6200\ndatabase = \"/tmp/agc-test.db\"\n");

    let config = ServiceConfig::resolve(None, None, Some(&path));

    assert_eq!(config.port, 6200);
    assert_eq!(config.database, PathBuf::from("/tmp/agc-test.db"));
}

#[test]
fn test_cli_override_beats_toml() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_config(&dir, "port = 6200\ndatabase = \"/tmp/agc-test.db\"\n");

    let config = ServiceConfig::resolve(
        Some(7100),
        Some(PathBuf::from("/tmp/agc-cli.db")),
        Some(&path),
    );

    assert_eq!(config.port, 7100);
    assert_eq!(config.database, PathBuf::from("/tmp/agc-cli.db"));
}

#[test]
fn test_partial_toml_falls_back_per_field() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_config(&dir, "port = 6300\n");

    let config = ServiceConfig::resolve(None, None, Some(&path));

    assert_eq!(config.port, 6300);
    // database not in file -> compiled default
    let defaults = CompiledDefaults::for_current_platform();
    assert_eq!(config.database, defaults.database);
}

#[test]
fn test_malformed_toml_degrades_to_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_config(&dir, "port = \"not a number");

    let loaded = TomlConfig::load(Some(&path));
    assert!(loaded.port.is_none());
    assert!(loaded.database.is_none());

    let config = ServiceConfig::resolve(None, None, Some(&path));
    assert_eq!(config.port, DEFAULT_PORT);
}
