use geo::algorithm::bounding_rect::BoundingRect;
use geo::{Coord, Distance, Haversine, LineString, Point};
use serde::{Deserialize, Serialize};

use trailmap_core::models::TrailPath;

/// Latitude/longitude box that a map view should fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailExtent {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl TrailExtent {
    pub fn center(&self) -> (f64, f64) {
        ((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }
}

fn to_line_string(trail: &TrailPath) -> LineString<f64> {
    trail
        .points()
        .iter()
        .map(|p| Coord { x: p.lng, y: p.lat })
        .collect()
}

/// Bounds of the trail grown by `pad_ratio` of its height and width on each side.
///
/// Returns `None` for an empty trail.
pub fn trail_extent(trail: &TrailPath, pad_ratio: f64) -> Option<TrailExtent> {
    let rect = to_line_string(trail).bounding_rect()?;

    let lat_pad = rect.height() * pad_ratio;
    let lng_pad = rect.width() * pad_ratio;

    Some(TrailExtent {
        south: rect.min().y - lat_pad,
        west: rect.min().x - lng_pad,
        north: rect.max().y + lat_pad,
        east: rect.max().x + lng_pad,
    })
}

/// Great-circle length of the trail in meters
pub fn trail_length_meters(trail: &TrailPath) -> f64 {
    trail
        .segments()
        .map(|(a, b)| Haversine.distance(Point::new(a.lng, a.lat), Point::new(b.lng, b.lat)))
        .sum()
}
