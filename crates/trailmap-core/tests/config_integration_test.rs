//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use trailmap_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};

fn clear_env() {
    for key in [
        "TRAILMAP_DATA_DIR",
        "TRAILMAP_CACHE_DIR",
        "TRAILMAP_THUMBNAIL_SIZE",
        "TRAILMAP_JPEG_QUALITY",
    ] {
        env::remove_var(key);
    }
}

fn config_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
data_dir = "/from/file/data"
cache_dir = "/from/file/cache"
thumbnail_size = 120
"#
    )
    .unwrap();
    file
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    let file = config_file();

    env::set_var("TRAILMAP_DATA_DIR", "/from/env/data");
    env::set_var("TRAILMAP_THUMBNAIL_SIZE", "64");

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.data_dir.value, PathBuf::from("/from/env/data"));
    assert_eq!(config.data_dir.source, ConfigSource::Environment);
    assert_eq!(config.cache_dir.value, PathBuf::from("/from/file/cache"));
    assert_eq!(config.cache_dir.source, ConfigSource::File);
    assert_eq!(config.thumbnail_size.value, 64);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values_are_ignored() {
    clear_env();
    env::set_var("TRAILMAP_THUMBNAIL_SIZE", "large");
    env::set_var("TRAILMAP_JPEG_QUALITY", "250");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.thumbnail_size.value, 200);
    assert_eq!(config.thumbnail_size.source, ConfigSource::Default);
    assert_eq!(config.jpeg_quality.value, 80);
    assert_eq!(config.jpeg_quality.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_full_precedence_chain() {
    clear_env();
    let file = config_file();
    env::set_var("TRAILMAP_CACHE_DIR", "/from/env/cache");
    env::set_var("TRAILMAP_JPEG_QUALITY", "70");

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    config.update_from_cli(CliConfigOverrides {
        cache_dir: Some(PathBuf::from("/from/cli/cache")),
        ..Default::default()
    });

    assert_eq!(config.cache_dir.value, PathBuf::from("/from/cli/cache"));
    assert_eq!(config.cache_dir.source, ConfigSource::Cli);
    assert_eq!(config.jpeg_quality.value, 70);
    assert_eq!(config.jpeg_quality.source, ConfigSource::Environment);
    assert_eq!(config.data_dir.source, ConfigSource::File);
    assert_eq!(config.placement_attempts.source, ConfigSource::Default);

    clear_env();
}

#[test]
fn test_missing_file_is_config_error() {
    let result = LayeredConfig::with_defaults().load_from_file("/definitely/not/here.toml");
    assert!(result.is_err());
}

#[test]
fn test_malformed_file_is_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "thumbnail_size = \"huge\"").unwrap();

    let result = LayeredConfig::with_defaults().load_from_file(file.path());
    assert!(result.is_err());
}
