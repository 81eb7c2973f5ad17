use std::path::Path;

use trailmap_core::error::Result;
use trailmap_core::models::ThumbnailSpec;

/// Header information of a source image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageProbe {
    pub width: u32,
    pub height: u32,
    /// Lower-case format name such as `jpeg` or `png`
    pub format: String,
}

/// Encoded thumbnail together with what was learned about its source
#[derive(Debug, Clone)]
pub struct RenderedThumbnail {
    pub bytes: Vec<u8>,
    pub probe: ImageProbe,
}

/// Port for the resize/encode primitive used by the asset cache
pub trait ImageProcessor: Send + Sync {
    /// Read dimensions and format without decoding pixel data
    fn probe(&self, path: &Path) -> Result<ImageProbe>;

    /// Cover-fit the image into `spec` and encode it as JPEG.
    ///
    /// Must be deterministic: the same source and spec yield the same bytes.
    fn render_thumbnail(&self, path: &Path, spec: &ThumbnailSpec) -> Result<RenderedThumbnail>;
}
