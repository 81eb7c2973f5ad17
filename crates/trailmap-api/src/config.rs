use std::env;
use std::path::PathBuf;

use trailmap_core::config::LayeredConfig;
use trailmap_core::error::Result;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    /// Optional TOML file layered under the `TRAILMAP_*` variables
    pub config_file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_origin: "http://localhost:3000".to_string(),
            config_file: None,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var("TRAILMAP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let cors_origin = env::var("TRAILMAP_CORS_ORIGIN").unwrap_or(defaults.cors_origin);

        let config_file = env::var_os("TRAILMAP_CONFIG").map(PathBuf::from);

        Self {
            port,
            cors_origin,
            config_file,
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Resolve the storage and placement settings shared with the CLI
    pub fn layered(&self) -> Result<LayeredConfig> {
        let mut config = LayeredConfig::with_defaults();
        if let Some(path) = &self.config_file {
            config = config.load_from_file(path)?;
        }
        let config = config.load_from_env();
        config.validate()?;
        Ok(config)
    }
}
