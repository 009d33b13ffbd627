//! Tests for TOML config loading and graceful fallback to defaults

use cf_common::config::{TomlConfig, DEFAULT_MAX_RESULTS, DEFAULT_PORT};
use std::path::PathBuf;

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
        database_path = "/data/proteins.db"

        [web]
        bind = "0.0.0.0"
        port = 8088

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    let config = TomlConfig::load(&path).unwrap();
    assert_eq!(config.database_path, Some(PathBuf::from("/data/proteins.db")));
    assert_eq!(config.web.bind, "0.0.0.0");
    assert_eq!(config.web.port, 8088);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.ingest.max_results, DEFAULT_MAX_RESULTS);
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = TomlConfig::load_or_default(Some(&dir.path().join("absent.toml")));

    assert!(config.database_path.is_none());
    assert_eq!(config.web.port, DEFAULT_PORT);
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[web]\nport = \"not a number\"\n").unwrap();

    assert!(TomlConfig::load(&path).is_err());

    let config = TomlConfig::load_or_default(Some(&path));
    assert_eq!(config.web.port, DEFAULT_PORT);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = TomlConfig::load(&PathBuf::from("/nonexistent/cf/config.toml")).unwrap_err();
    assert!(matches!(err, cf_common::Error::Io(_)));
}
