use serde::{Deserialize, Serialize};

use super::LatLng;

/// A geo-tagged point that should be shown as an offset thumbnail marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPoint<T> {
    pub coordinates: LatLng,
    pub payload: T,
}

impl<T> MarkerPoint<T> {
    pub fn new(coordinates: LatLng, payload: T) -> Self {
        Self { coordinates, payload }
    }
}

/// Result of placing one marker during a rendering pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedMarker<T> {
    /// Where the thumbnail is drawn
    pub offset: LatLng,
    /// The point the thumbnail belongs to
    pub marker: MarkerPoint<T>,
}

/// Tuning of the greedy offset search, all distances in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Step between candidate offsets (~50 m)
    pub base_offset: f64,
    /// Candidates closer than this to an already placed marker are rejected (~30 m)
    pub min_separation: f64,
    /// Number of candidates tried, at 1x..=attempts x `base_offset`
    pub attempts: usize,
    /// Fraction of the trail point count averaged for the local direction
    pub direction_window: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            base_offset: 0.0005,
            min_separation: 0.0003,
            attempts: 5,
            direction_window: 0.05,
        }
    }
}
