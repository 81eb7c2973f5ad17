use anyhow::{Context, Result};
use trailmap_core::config::{CliConfigOverrides, LayeredConfig};

use crate::cli::Cli;

/// Resolve defaults, the optional config file, `TRAILMAP_*` variables and flags
pub fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    let file = cli.config.clone().or_else(|| std::env::var_os("TRAILMAP_CONFIG").map(Into::into));
    if let Some(path) = file {
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
    }

    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        data_dir: cli.data_dir.clone(),
        cache_dir: cli.cache_dir.clone(),
        thumbnail_size: cli.thumbnail_size,
        jpeg_quality: cli.jpeg_quality,
    });

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;
    use trailmap_core::config::ConfigSource;

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("trailmap.toml");
        std::fs::write(
            &file,
            "data_dir = \"/from/file\"\nthumbnail_size = 120\n\n[placement]\nattempts = 3\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "trailmap",
            "--config",
            file.to_str().unwrap(),
            "--data-dir",
            "/from/flag",
            "config",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();

        assert_eq!(config.data_dir.value, PathBuf::from("/from/flag"));
        assert_eq!(config.data_dir.source, ConfigSource::Cli);
        assert_eq!(config.thumbnail_size.value, 120);
        assert_eq!(config.thumbnail_size.source, ConfigSource::File);
        assert_eq!(config.placement_config().attempts, 3);
    }

    #[test]
    fn test_missing_config_file() {
        let cli =
            Cli::try_parse_from(["trailmap", "--config", "/nonexistent/trailmap.toml", "walks"])
                .unwrap();
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn test_zero_thumbnail_size_is_rejected() {
        let cli = Cli::try_parse_from(["trailmap", "--thumbnail-size", "0", "walks"]).unwrap();
        assert!(load_config(&cli).is_err());
    }
}
