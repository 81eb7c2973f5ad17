//! Cache command implementation

use anyhow::Result;
use trailmap_core::config::LayeredConfig;
use trailmap_store::CacheStats;

use crate::cli::{CacheAction, CacheArgs};
use crate::output::OutputWriter;

pub fn execute(args: CacheArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let cache = super::asset_cache(config);

    match args.action {
        CacheAction::Stats => {
            let stats = cache.stats()?;
            if output.is_json() {
                return output.result(stats);
            }
            output.section(format!("Cache at {}", config.cache_dir.value.display()));
            print_stats(output, &stats);
        }
        CacheAction::Clear => {
            let removed = cache.clear()?;
            if output.is_json() {
                return output.result(removed);
            }
            print_stats(output, &removed);
            output.success("Cache cleared");
        }
    }

    Ok(())
}

fn print_stats(output: &OutputWriter, stats: &CacheStats) {
    output.kv("Thumbnails", stats.thumbnails);
    output.kv("Metadata records", stats.metadata_records);
    output.kv("Size", format!("{:.1} KiB", stats.bytes as f64 / 1024.0));
}
