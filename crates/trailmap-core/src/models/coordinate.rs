//! Geographic coordinates and trail polylines.
//!
//! Coordinates are stored as decimal degrees and serialized the way walk
//! settings files write them: a `[lat, lng]` pair.

use serde::{Deserialize, Serialize};

/// A WGS 84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(coord: LatLng) -> Self {
        [coord.lat, coord.lng]
    }
}

/// Ordered polyline describing a walking route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrailPath(Vec<LatLng>);

impl TrailPath {
    pub fn new(points: Vec<LatLng>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[LatLng] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consecutive point pairs, in trail order
    pub fn segments(&self) -> impl Iterator<Item = (LatLng, LatLng)> + '_ {
        self.0.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

impl From<Vec<LatLng>> for TrailPath {
    fn from(points: Vec<LatLng>) -> Self {
        Self(points)
    }
}

impl FromIterator<LatLng> for TrailPath {
    fn from_iter<I: IntoIterator<Item = LatLng>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
