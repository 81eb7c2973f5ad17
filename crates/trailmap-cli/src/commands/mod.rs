//! Command implementations

mod cache;
mod config;
mod markers;
mod walks;
mod warm;

use anyhow::Result;
use trailmap_core::config::LayeredConfig;
use trailmap_store::{AssetCache, CacheLayout};

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let settings = crate::config::load_config(&cli)?;

    match cli.command {
        Commands::Walks => walks::execute(&settings, &output),
        Commands::Warm(args) => warm::execute(args, &settings, &output),
        Commands::Markers(args) => markers::execute(args, &settings, &output),
        Commands::Cache(args) => cache::execute(args, &settings, &output),
        Commands::Config => config::execute(&settings, &output),
    }
}

/// Cache serving the configured thumbnail size
fn asset_cache(config: &LayeredConfig) -> AssetCache {
    let layout = CacheLayout::new(&config.data_dir.value, &config.cache_dir.value);
    AssetCache::with_raster(layout, config.thumbnail_spec())
}
