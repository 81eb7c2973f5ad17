use serde::Deserialize;

use super::trail::GpxTrail;
use crate::error::{Result, TrailmapError};
use crate::models::{TrailPath, Walk, WalkImage};

/// `walk_settings.json` as written by walk authors. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkSettingsFile {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub trail_path: Vec<[f64; 2]>,
    #[serde(default)]
    pub images: Vec<WalkImage>,
}

impl WalkSettingsFile {
    pub fn from_json(walk_id: &str, content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| TrailmapError::InvalidWalk {
            walk_id: walk_id.to_string(),
            reason: format!("Failed to parse walk_settings.json: {}", e),
        })
    }

    /// Merge the settings with an optional GPX trail into a single walk.
    ///
    /// A GPX trail replaces the inline trail path and supplies the title.
    pub fn normalize(self, walk_id: &str, gpx: Option<GpxTrail>) -> Result<Walk> {
        let (gpx_title, trail_path) = match gpx {
            Some(trail) if !trail.trail_path.is_empty() => (trail.title, trail.trail_path),
            _ => (None, self.trail_path.into_iter().map(Into::into).collect::<TrailPath>()),
        };

        if trail_path.is_empty() {
            return Err(TrailmapError::InvalidWalk {
                walk_id: walk_id.to_string(),
                reason: "No trail path found in either GPX or JSON file".to_string(),
            });
        }

        let title = gpx_title
            .or(self.title)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| walk_id.to_string());

        let cover_image = self
            .cover_image
            .or_else(|| self.images.first().map(|image| image.image_name.clone()));

        Ok(Walk {
            id: walk_id.to_string(),
            title,
            description: self.description,
            cover_image,
            trail_path,
            images: self.images,
        })
    }
}
