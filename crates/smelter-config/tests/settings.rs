//! Layered settings loading: defaults, settings file, environment.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serial_test::serial;
use smelter_config::{ConfigError, SmelterSettings};
use tempfile::TempDir;

#[test]
#[serial]
fn test_toml_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("smelter.toml");
    fs::write(
        &path,
        r#"
source_root = "vendor/alloy"
engine_timeout_ms = 30000
"#,
    )
    .unwrap();

    let settings = SmelterSettings::load(Some(&path)).unwrap();
    assert_eq!(settings.source_root, PathBuf::from("vendor/alloy"));
    assert_eq!(settings.entry, PathBuf::from("src/index.js"));
    assert_eq!(settings.engine_timeout(), Some(Duration::from_secs(30)));
}

#[test]
#[serial]
fn test_json_file_is_accepted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"aggregation_file": "src/creators.js"}"#).unwrap();

    let settings = SmelterSettings::load(Some(&path)).unwrap();
    assert_eq!(settings.aggregation_file, PathBuf::from("src/creators.js"));
}

#[test]
#[serial]
fn test_env_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("smelter.toml");
    fs::write(&path, "source_root = \"from-file\"\n").unwrap();

    unsafe {
        std::env::set_var("SMELTER_SOURCE_ROOT", "from-env");
    }
    let result = SmelterSettings::load(Some(&path));
    unsafe {
        std::env::remove_var("SMELTER_SOURCE_ROOT");
    }

    assert_eq!(result.unwrap().source_root, PathBuf::from("from-env"));
}

#[test]
#[serial]
fn test_explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(matches!(
        SmelterSettings::load(Some(&missing)),
        Err(ConfigError::NotFound(_))
    ));
}

#[test]
#[serial]
fn test_unknown_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("smelter.yaml");
    fs::write(&path, "source_root: x\n").unwrap();
    assert!(matches!(
        SmelterSettings::load(Some(&path)),
        Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"
    ));
}

#[test]
#[serial]
fn test_invalid_values_fail_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("smelter.toml");
    fs::write(&path, "engine_timeout_ms = 0\n").unwrap();
    assert!(matches!(
        SmelterSettings::load(Some(&path)),
        Err(ConfigError::InvalidValue { field, .. }) if field == "engine_timeout_ms"
    ));
}
