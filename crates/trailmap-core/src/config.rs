use crate::error::{Result, TrailmapError};
use crate::models::{PlacementConfig, ThumbnailSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for Trailmap
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub data_dir: ConfigValue<PathBuf>,
    pub cache_dir: ConfigValue<PathBuf>,
    pub thumbnail_size: ConfigValue<u32>,
    pub jpeg_quality: ConfigValue<u8>,
    pub base_offset: ConfigValue<f64>,
    pub min_separation: ConfigValue<f64>,
    pub placement_attempts: ConfigValue<usize>,
    pub direction_window: ConfigValue<f64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        let thumbnail = ThumbnailSpec::default();
        let placement = PlacementConfig::default();

        Self {
            data_dir: ConfigValue::new(PathBuf::from("data"), ConfigSource::Default),
            cache_dir: ConfigValue::new(PathBuf::from("cache"), ConfigSource::Default),
            thumbnail_size: ConfigValue::new(thumbnail.width, ConfigSource::Default),
            jpeg_quality: ConfigValue::new(thumbnail.quality, ConfigSource::Default),
            base_offset: ConfigValue::new(placement.base_offset, ConfigSource::Default),
            min_separation: ConfigValue::new(placement.min_separation, ConfigSource::Default),
            placement_attempts: ConfigValue::new(placement.attempts, ConfigSource::Default),
            direction_window: ConfigValue::new(placement.direction_window, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| TrailmapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| TrailmapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(data_dir) = file_config.data_dir {
            self.data_dir.update(data_dir, ConfigSource::File);
        }

        if let Some(cache_dir) = file_config.cache_dir {
            self.cache_dir.update(cache_dir, ConfigSource::File);
        }

        if let Some(size) = file_config.thumbnail_size {
            self.thumbnail_size.update(size, ConfigSource::File);
        }

        if let Some(quality) = file_config.jpeg_quality {
            self.jpeg_quality.update(quality, ConfigSource::File);
        }

        if let Some(placement) = file_config.placement {
            if let Some(base_offset) = placement.base_offset {
                self.base_offset.update(base_offset, ConfigSource::File);
            }
            if let Some(min_separation) = placement.min_separation {
                self.min_separation.update(min_separation, ConfigSource::File);
            }
            if let Some(attempts) = placement.attempts {
                self.placement_attempts.update(attempts, ConfigSource::File);
            }
            if let Some(window) = placement.direction_window {
                self.direction_window.update(window, ConfigSource::File);
            }
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // TRAILMAP_DATA_DIR
        if let Ok(data_dir) = env::var("TRAILMAP_DATA_DIR") {
            self.data_dir.update(PathBuf::from(data_dir), ConfigSource::Environment);
        }

        // TRAILMAP_CACHE_DIR
        if let Ok(cache_dir) = env::var("TRAILMAP_CACHE_DIR") {
            self.cache_dir.update(PathBuf::from(cache_dir), ConfigSource::Environment);
        }

        // TRAILMAP_THUMBNAIL_SIZE
        if let Ok(size_str) = env::var("TRAILMAP_THUMBNAIL_SIZE") {
            match size_str.parse::<u32>() {
                Ok(size) => self.thumbnail_size.update(size, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid TRAILMAP_THUMBNAIL_SIZE value '{}': expected pixel count",
                    size_str
                ),
            }
        }

        // TRAILMAP_JPEG_QUALITY
        if let Ok(quality_str) = env::var("TRAILMAP_JPEG_QUALITY") {
            match parse_jpeg_quality(&quality_str) {
                Ok(quality) => self.jpeg_quality.update(quality, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid TRAILMAP_JPEG_QUALITY value '{}': expected 1-100",
                    quality_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(data_dir) = overrides.data_dir {
            self.data_dir.update(data_dir, ConfigSource::Cli);
        }

        if let Some(cache_dir) = overrides.cache_dir {
            self.cache_dir.update(cache_dir, ConfigSource::Cli);
        }

        if let Some(size) = overrides.thumbnail_size {
            self.thumbnail_size.update(size, ConfigSource::Cli);
        }

        if let Some(quality) = overrides.jpeg_quality {
            self.jpeg_quality.update(quality, ConfigSource::Cli);
        }
    }

    /// Reject values the cache or the placer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.thumbnail_size.value == 0 {
            return Err(TrailmapError::ConfigInvalid {
                key: "thumbnail_size".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if !(1..=100).contains(&self.jpeg_quality.value) {
            return Err(TrailmapError::ConfigInvalid {
                key: "jpeg_quality".to_string(),
                reason: format!("{} is outside 1-100", self.jpeg_quality.value),
            });
        }

        for (key, value) in [
            ("placement.base_offset", self.base_offset.value),
            ("placement.min_separation", self.min_separation.value),
            ("placement.direction_window", self.direction_window.value),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TrailmapError::ConfigInvalid {
                    key: key.to_string(),
                    reason: format!("{} must be a positive number", value),
                });
            }
        }

        if self.placement_attempts.value == 0 {
            return Err(TrailmapError::ConfigInvalid {
                key: "placement.attempts".to_string(),
                reason: "at least one candidate is required".to_string(),
            });
        }

        Ok(())
    }

    pub fn thumbnail_spec(&self) -> ThumbnailSpec {
        ThumbnailSpec {
            width: self.thumbnail_size.value,
            height: self.thumbnail_size.value,
            quality: self.jpeg_quality.value,
        }
    }

    pub fn placement_config(&self) -> PlacementConfig {
        PlacementConfig {
            base_offset: self.base_offset.value,
            min_separation: self.min_separation.value,
            attempts: self.placement_attempts.value,
            direction_window: self.direction_window.value,
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "data_dir".to_string(),
            (self.data_dir.value.display().to_string(), self.data_dir.source),
        );

        map.insert(
            "cache_dir".to_string(),
            (self.cache_dir.value.display().to_string(), self.cache_dir.source),
        );

        map.insert(
            "thumbnail_size".to_string(),
            (
                format!("{0}x{0}", self.thumbnail_size.value),
                self.thumbnail_size.source,
            ),
        );

        map.insert(
            "jpeg_quality".to_string(),
            (self.jpeg_quality.value.to_string(), self.jpeg_quality.source),
        );

        map.insert(
            "placement.base_offset".to_string(),
            (self.base_offset.value.to_string(), self.base_offset.source),
        );

        map.insert(
            "placement.min_separation".to_string(),
            (self.min_separation.value.to_string(), self.min_separation.source),
        );

        map.insert(
            "placement.attempts".to_string(),
            (self.placement_attempts.value.to_string(), self.placement_attempts.source),
        );

        map.insert(
            "placement.direction_window".to_string(),
            (self.direction_window.value.to_string(), self.direction_window.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
    thumbnail_size: Option<u32>,
    jpeg_quality: Option<u8>,
    placement: Option<FilePlacementConfig>,
}

/// `[placement]` table of the config file
#[derive(Debug, Deserialize, Serialize)]
struct FilePlacementConfig {
    base_offset: Option<f64>,
    min_separation: Option<f64>,
    attempts: Option<usize>,
    direction_window: Option<f64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub thumbnail_size: Option<u32>,
    pub jpeg_quality: Option<u8>,
}

/// Parse a JPEG quality between 1 and 100
pub fn parse_jpeg_quality(s: &str) -> Result<u8> {
    match s.trim().parse::<u8>() {
        Ok(q) if (1..=100).contains(&q) => Ok(q),
        _ => Err(TrailmapError::ConfigInvalid {
            key: "jpeg_quality".to_string(),
            reason: format!("Invalid JPEG quality: {}. Use a number between 1 and 100", s),
        }),
    }
}
