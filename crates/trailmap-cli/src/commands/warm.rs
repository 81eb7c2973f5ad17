//! Warm command implementation

use anyhow::{bail, Result};
use trailmap_core::config::LayeredConfig;
use trailmap_core::models::{ImageKey, ThumbnailSpec};
use trailmap_core::walks::WalkRepository;
use trailmap_store::{AssetCache, CacheLayout};

use crate::cli::WarmArgs;
use crate::output::OutputWriter;

pub fn execute(args: WarmArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let repo = WalkRepository::new(&config.data_dir.value);
    let walk = repo.load_walk(&args.walk_id)?;

    let cache = if args.batch {
        let layout = CacheLayout::new(&config.data_dir.value, &config.cache_dir.value).batch();
        let spec = ThumbnailSpec {
            quality: config.jpeg_quality.value,
            ..ThumbnailSpec::batch()
        };
        AssetCache::with_raster(layout, spec)
    } else {
        super::asset_cache(config)
    };

    let mut keys = Vec::with_capacity(walk.images.len());
    for image in &walk.images {
        match ImageKey::new(Some(&walk.id), &image.image_name) {
            Ok(key) => keys.push(key),
            Err(e) => output.warning(format!("Skipping image: {}", e)),
        }
    }

    let spec = cache.spec();
    let pb = output.progress(
        keys.len() as u64,
        &format!("Warming {} ({}x{} thumbnails)", walk.title, spec.width, spec.height),
    );
    let report = cache.warm(keys, |key| {
        pb.set_message(key.filename().to_string());
        pb.inc(1);
    });
    pb.finish_and_clear();

    if output.is_json() {
        output.result(&report)?;
    } else {
        output.kv("Generated", report.generated);
        output.kv("Already cached", report.cached);
        for failure in &report.failures {
            output.warning(format!("{}: {}", failure.image, failure.error));
        }
    }

    if !report.is_success() {
        bail!("{} image(s) could not be processed", report.failures.len());
    }

    output.success(format!("Cache warm for walk '{}'", walk.id));
    Ok(())
}
