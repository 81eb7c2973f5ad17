use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trailmap - walks, thumbnails and marker layout
#[derive(Parser, Debug)]
#[command(name = "trailmap")]
#[command(about = "Manage trail-map walks and their image cache", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory containing the walks
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory for generated thumbnails and metadata
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Edge length of the square thumbnails in pixels
    #[arg(long, global = true, value_name = "PX")]
    pub thumbnail_size: Option<u32>,

    /// JPEG quality of generated thumbnails (1-100)
    #[arg(long, global = true, value_parser = parse_quality)]
    pub jpeg_quality: Option<u8>,

    #[command(subcommand)]
    pub command: Commands,
}

fn parse_quality(s: &str) -> Result<u8, String> {
    trailmap_core::config::parse_jpeg_quality(s).map_err(|e| e.to_string())
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the walks under the data directory
    Walks,

    /// Pre-generate thumbnails and metadata for a walk's images
    Warm(WarmArgs),

    /// Show where each image marker of a walk is placed
    Markers(MarkersArgs),

    /// Inspect or clear the asset cache
    Cache(CacheArgs),

    /// Show the resolved configuration and where each value comes from
    Config,
}

#[derive(Parser, Debug)]
pub struct WarmArgs {
    /// Walk identifier (its directory name)
    pub walk_id: String,

    /// Generate the small 50x50 marker icons into `<cache_dir>/batch` instead
    #[arg(long)]
    pub batch: bool,
}

#[derive(Parser, Debug)]
pub struct MarkersArgs {
    /// Walk identifier (its directory name)
    pub walk_id: String,
}

#[derive(Parser, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Count cached thumbnails and metadata records
    Stats,

    /// Delete every cached thumbnail and metadata record
    Clear,
}
