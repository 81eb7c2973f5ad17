use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LatLng, MarkerPoint, TrailPath};

/// A walk after its settings and trail file have been merged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Walk {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Image shown on the walk card; the first image when not configured
    pub cover_image: Option<String>,
    pub trail_path: TrailPath,
    pub images: Vec<WalkImage>,
}

impl Walk {
    /// Images as marker points, in settings order
    pub fn marker_points(&self) -> Vec<MarkerPoint<WalkImage>> {
        self.images
            .iter()
            .map(|image| MarkerPoint::new(image.coordinates, image.clone()))
            .collect()
    }
}

/// A geo-tagged photo taken along a walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkImage {
    pub image_name: String,
    pub coordinates: LatLng,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Filesystem timestamps of a walk's settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkInfo {
    pub id: String,
    pub last_modified: DateTime<Utc>,
    pub created: Option<DateTime<Utc>>,
}
