//! Walks command implementation

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;
use trailmap_core::config::LayeredConfig;
use trailmap_core::walks::WalkRepository;

use crate::output::OutputWriter;

#[derive(Debug, Serialize, Tabled)]
struct WalkRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Images")]
    images: usize,
    #[tabled(rename = "Trail Points")]
    trail_points: usize,
    #[tabled(rename = "Updated")]
    updated: String,
}

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let repo = WalkRepository::new(&config.data_dir.value);
    let ids = repo.list_walks()?;

    let mut rows = Vec::with_capacity(ids.len());
    for id in ids {
        let walk = match repo.load_walk(&id) {
            Ok(walk) => walk,
            Err(e) => {
                output.warning(format!("Skipping {}: {}", id, e));
                continue;
            }
        };

        let updated = repo
            .walk_info(&id)
            .map(|info| info.last_modified.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| "-".to_string());

        rows.push(WalkRow {
            id,
            title: walk.title,
            images: walk.images.len(),
            trail_points: walk.trail_path.len(),
            updated,
        });
    }

    output.section(format!("Walks in {}", config.data_dir.value.display()));
    output.table(rows)
}
