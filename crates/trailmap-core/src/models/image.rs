//! Source image identifiers and derived image records.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrailmapError};

/// Reduce an untrusted path component to its bare base name.
///
/// Both `/` and `\` count as separators so that `..\..\boot.ini` is handled
/// the same on every platform. What remains must be a usable file name.
pub fn sanitize_name(raw: &str) -> Result<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();

    let invalid = |reason: &str| TrailmapError::InvalidName {
        name: raw.to_string(),
        reason: reason.to_string(),
    };

    if base.is_empty() {
        return Err(invalid("empty after removing directory components"));
    }
    if base == "." || base == ".." {
        return Err(invalid("refers to a directory"));
    }
    if base.contains('\0') {
        return Err(invalid("contains a NUL byte"));
    }

    Ok(base.to_string())
}

/// Identifier of a source image: optional walk scope plus a base file name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageKey {
    walk_id: Option<String>,
    filename: String,
}

impl ImageKey {
    /// Build a key from untrusted request input
    pub fn new(walk_id: Option<&str>, filename: &str) -> Result<Self> {
        let walk_id = walk_id.map(sanitize_name).transpose()?;
        let filename = sanitize_name(filename)?;
        Ok(Self { walk_id, filename })
    }

    pub fn walk_id(&self) -> Option<&str> {
        self.walk_id.as_deref()
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

impl std::fmt::Display for ImageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.walk_id {
            Some(walk) => write!(f, "{}/{}", walk, self.filename),
            None => f.write_str(&self.filename),
        }
    }
}

/// Dimensions and format of a source image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub aspect_ratio: f64,
}

impl ImageMetadata {
    /// Build a record, refusing dimensions for which the aspect ratio is undefined
    pub fn from_dimensions(width: u32, height: u32, format: impl Into<String>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TrailmapError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            format: format.into(),
            aspect_ratio: width as f64 / height as f64,
        })
    }
}

/// Target box and encoder settings for generated thumbnails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailSpec {
    pub width: u32,
    pub height: u32,
    /// JPEG quality, 1..=100
    pub quality: u8,
}

impl Default for ThumbnailSpec {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            quality: 80,
        }
    }
}

impl ThumbnailSpec {
    /// Square thumbnail with the default quality
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            ..Self::default()
        }
    }

    /// Small marker icons used when a whole walk is rendered at once
    pub fn batch() -> Self {
        Self::square(50)
    }
}
