//! Walk discovery and loading
//!
//! A walk lives in its own directory under the data root:
//!
//! ```text
//! <data_dir>/<walk_id>/walk_settings.json
//! <data_dir>/<walk_id>/trail.gpx          (optional)
//! <data_dir>/<walk_id>/images/<filename>
//! ```

pub mod trail;
pub mod settings;

use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Result, TrailmapError};
use crate::models::{sanitize_name, Walk, WalkInfo};

pub use trail::{parse_gpx_trail, GpxTrail};
pub use settings::WalkSettingsFile;

pub const SETTINGS_FILE: &str = "walk_settings.json";
pub const TRAIL_FILE: &str = "trail.gpx";
pub const IMAGES_DIR: &str = "images";

/// Read-only access to the walks stored under a data directory
#[derive(Debug, Clone)]
pub struct WalkRepository {
    data_dir: PathBuf,
}

impl WalkRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory names that carry a settings file, sorted alphabetically
    pub fn list_walks(&self) -> Result<Vec<String>> {
        tracing::debug!(data_dir = %self.data_dir.display(), "Looking for walks");

        let mut walks = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                tracing::debug!(entry = ?entry.file_name(), "Skipping non UTF-8 directory name");
                continue;
            };

            if entry.path().join(SETTINGS_FILE).is_file() {
                walks.push(name);
            } else {
                tracing::debug!(walk = %name, "Missing {} in directory", SETTINGS_FILE);
            }
        }

        walks.sort();
        tracing::debug!(count = walks.len(), "Found walks");
        Ok(walks)
    }

    /// Timestamps of the walk's settings file
    pub fn walk_info(&self, walk_id: &str) -> Result<WalkInfo> {
        let (walk_id, walk_dir) = self.walk_dir(walk_id)?;
        let settings_path = walk_dir.join(SETTINGS_FILE);

        let metadata = match fs::metadata(&settings_path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TrailmapError::WalkNotFound { walk_id })
            }
            Err(e) => return Err(e.into()),
        };

        Ok(WalkInfo {
            id: walk_id,
            last_modified: DateTime::<Utc>::from(metadata.modified()?),
            created: metadata.created().ok().map(DateTime::<Utc>::from),
        })
    }

    /// Load and normalize a walk's settings and trail
    pub fn load_walk(&self, walk_id: &str) -> Result<Walk> {
        let (walk_id, walk_dir) = self.walk_dir(walk_id)?;

        let content = match fs::read_to_string(walk_dir.join(SETTINGS_FILE)) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TrailmapError::WalkNotFound { walk_id })
            }
            Err(e) => return Err(e.into()),
        };
        let settings = WalkSettingsFile::from_json(&walk_id, &content)?;

        let gpx = match File::open(walk_dir.join(TRAIL_FILE)) {
            Ok(file) => Some(parse_gpx_trail(BufReader::new(file)).map_err(|reason| {
                TrailmapError::InvalidWalk { walk_id: walk_id.clone(), reason }
            })?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let walk = settings.normalize(&walk_id, gpx)?;
        tracing::debug!(
            walk = %walk.id,
            trail_points = walk.trail_path.len(),
            images = walk.images.len(),
            "Loaded walk"
        );
        Ok(walk)
    }

    fn walk_dir(&self, walk_id: &str) -> Result<(String, PathBuf)> {
        let walk_id = sanitize_name(walk_id)?;
        let dir = self.data_dir.join(&walk_id);
        Ok((walk_id, dir))
    }
}
