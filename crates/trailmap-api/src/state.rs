use std::sync::Arc;

use trailmap_core::config::LayeredConfig;
use trailmap_core::walks::WalkRepository;
use trailmap_geo::MarkerPlacer;
use trailmap_store::{AssetCache, CacheLayout};

#[derive(Clone)]
pub struct AppState {
    pub walks: WalkRepository,
    pub cache: Arc<AssetCache>,
    pub placer: MarkerPlacer,
}

impl AppState {
    pub fn new(walks: WalkRepository, cache: Arc<AssetCache>, placer: MarkerPlacer) -> Self {
        Self {
            walks,
            cache,
            placer,
        }
    }

    /// Wire the walk repository, asset cache and placer from resolved settings
    pub fn from_config(config: &LayeredConfig) -> Self {
        let data_dir = config.data_dir.value.clone();
        let layout = CacheLayout::new(&data_dir, &config.cache_dir.value);

        Self::new(
            WalkRepository::new(data_dir),
            Arc::new(AssetCache::with_raster(layout, config.thumbnail_spec())),
            MarkerPlacer::new(config.placement_config()),
        )
    }
}
