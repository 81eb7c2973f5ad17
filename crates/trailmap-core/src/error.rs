//! Error types for Trailmap

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrailmapError {
    // Lookup errors
    #[error("Image not found at {path}")]
    ImageNotFound { path: PathBuf },

    #[error("Walk not found: {walk_id}")]
    WalkNotFound { walk_id: String },

    // Validation errors
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Invalid image dimensions {width}x{height}: aspect ratio is undefined")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Trail path has {points} point(s); at least 2 are required")]
    InsufficientTrail { points: usize },

    #[error("Degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },

    #[error("Invalid walk {walk_id}: {reason}")]
    InvalidWalk { walk_id: String, reason: String },

    // Image processing errors
    #[error("Failed to decode image {path}: {reason}")]
    ImageDecode { path: PathBuf, reason: String },

    #[error("Failed to encode thumbnail: {reason}")]
    ImageEncode { reason: String },

    #[error("Failed to read image header {path}: {reason}")]
    MetadataParse { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TrailmapError {
    /// The requested source asset or walk does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, TrailmapError::ImageNotFound { .. } | TrailmapError::WalkNotFound { .. })
    }

    /// The input was rejected before or after touching storage
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TrailmapError::InvalidName { .. }
                | TrailmapError::InvalidDimensions { .. }
                | TrailmapError::InsufficientTrail { .. }
                | TrailmapError::DegenerateGeometry { .. }
                | TrailmapError::InvalidWalk { .. }
        )
    }
}

impl From<serde_json::Error> for TrailmapError {
    fn from(err: serde_json::Error) -> Self {
        TrailmapError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrailmapError>;
