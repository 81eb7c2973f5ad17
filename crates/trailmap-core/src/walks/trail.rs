use gpx::{read, Gpx};
use std::io::Read;

use crate::models::{LatLng, TrailPath};

/// Trail data recovered from a GPX document
#[derive(Debug, Clone, PartialEq)]
pub struct GpxTrail {
    pub title: Option<String>,
    pub trail_path: TrailPath,
}

/// Parse the track points of a GPX document into a trail path.
///
/// Points from every track segment are concatenated in document order.
/// The title comes from the document metadata, falling back to the first
/// named track.
pub fn parse_gpx_trail<R: Read>(reader: R) -> Result<GpxTrail, String> {
    let gpx: Gpx = read(reader).map_err(|e| format!("Failed to parse GPX: {}", e))?;

    let title = gpx
        .metadata
        .as_ref()
        .and_then(|meta| meta.name.clone())
        .or_else(|| gpx.tracks.iter().find_map(|track| track.name.clone()))
        .filter(|name| !name.trim().is_empty());

    let trail_path = gpx
        .tracks
        .iter()
        .flat_map(|track| track.segments.iter())
        .flat_map(|segment| segment.points.iter())
        .map(|waypoint| {
            let point = waypoint.point();
            LatLng::new(point.y(), point.x())
        })
        .collect();

    Ok(GpxTrail {
        title,
        trail_path,
    })
}
