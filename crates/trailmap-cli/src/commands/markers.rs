//! Markers command implementation

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;
use trailmap_core::config::LayeredConfig;
use trailmap_core::walks::WalkRepository;
use trailmap_geo::{trail_extent, trail_length_meters, MarkerPlacer};

use crate::cli::MarkersArgs;
use crate::output::OutputWriter;

#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct MarkerRow {
    #[tabled(rename = "#")]
    order: usize,
    #[tabled(rename = "Image")]
    image_name: String,
    #[tabled(rename = "Photo", display_with = "format_position")]
    coordinates: [f64; 2],
    #[tabled(rename = "Marker", display_with = "format_position")]
    offset: [f64; 2],
}

fn format_position(position: &[f64; 2]) -> String {
    format!("{:.6}, {:.6}", position[0], position[1])
}

pub fn execute(args: MarkersArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let walk = WalkRepository::new(&config.data_dir.value).load_walk(&args.walk_id)?;
    let placer = MarkerPlacer::new(config.placement_config());

    let rows: Vec<MarkerRow> = placer
        .place_all(&walk.trail_path, walk.marker_points())?
        .into_iter()
        .enumerate()
        .map(|(i, placed)| MarkerRow {
            order: i + 1,
            image_name: placed.marker.payload.image_name,
            coordinates: placed.marker.coordinates.into(),
            offset: placed.offset.into(),
        })
        .collect();

    output.section(&walk.title);
    output.kv("Trail points", walk.trail_path.len());
    output.kv("Trail length", format!("{:.2} km", trail_length_meters(&walk.trail_path) / 1000.0));
    if let Some(extent) = trail_extent(&walk.trail_path, 0.2) {
        output.kv(
            "Map bounds",
            format!(
                "{:.5}, {:.5} to {:.5}, {:.5}",
                extent.south, extent.west, extent.north, extent.east
            ),
        );
    }

    output.table(rows)
}
