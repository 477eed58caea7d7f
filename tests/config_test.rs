//! Tests for TOML configuration loading.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use strictly_guess::AppConfig;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("strictly_guess.toml");
    fs::write(&path, content).expect("Failed to write TOML");
    path
}

#[test]
fn test_defaults() {
    let config = AppConfig::load(None).expect("Defaults never fail");
    assert_eq!(config.leaderboard_path(), Path::new("leaderboard.json"));
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 3000);
    assert!(!config.strict_store());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        r#"leaderboard_path = "/var/lib/guess/top.json"
port = 8080
"#,
    );

    let config = AppConfig::from_file(&path).expect("Load failed");
    assert_eq!(
        config.leaderboard_path(),
        Path::new("/var/lib/guess/top.json")
    );
    assert_eq!(*config.port(), 8080);
    assert_eq!(config.host(), "127.0.0.1");
}

#[test]
fn test_strict_store_flag() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "strict_store = true\n");
    let config = AppConfig::load(Some(path.as_path())).expect("Load failed");
    assert!(*config.strict_store());
}

#[test]
fn test_invalid_toml_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "port = \"not a number\"\n");
    let err = AppConfig::from_file(&path).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = AppConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_overrides() {
    let config = AppConfig::default()
        .with_leaderboard_path("scores.json")
        .with_bind(Some("0.0.0.0".to_string()), None);
    assert_eq!(config.leaderboard_path(), Path::new("scores.json"));
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(*config.port(), 3000);
}
