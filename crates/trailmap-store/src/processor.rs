//! [`ImageProcessor`] backed by the `image` crate.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};

use trailmap_core::error::{Result, TrailmapError};
use trailmap_core::models::ThumbnailSpec;

use crate::ports::{ImageProbe, ImageProcessor, RenderedThumbnail};

#[derive(Debug, Clone, Copy, Default)]
pub struct RasterProcessor;

impl RasterProcessor {
    pub fn new() -> Self {
        Self
    }

    fn open(path: &Path) -> Result<ImageReader<BufReader<File>>> {
        let reader = ImageReader::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => TrailmapError::ImageNotFound {
                path: path.to_path_buf(),
            },
            _ => TrailmapError::Io(e),
        })?;

        Ok(reader.with_guessed_format()?)
    }
}

/// Name reported in metadata records
pub fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Png => "png".to_string(),
        ImageFormat::Gif => "gif".to_string(),
        ImageFormat::WebP => "webp".to_string(),
        ImageFormat::Tiff => "tiff".to_string(),
        ImageFormat::Bmp => "bmp".to_string(),
        ImageFormat::Avif => "avif".to_string(),
        other => format!("{:?}", other).to_lowercase(),
    }
}

impl ImageProcessor for RasterProcessor {
    fn probe(&self, path: &Path) -> Result<ImageProbe> {
        let reader = Self::open(path)?;

        let format = reader.format().ok_or_else(|| TrailmapError::MetadataParse {
            path: path.to_path_buf(),
            reason: "unrecognised image format".to_string(),
        })?;

        let (width, height) = reader.into_dimensions().map_err(|e| TrailmapError::MetadataParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(ImageProbe {
            width,
            height,
            format: format_name(format),
        })
    }

    fn render_thumbnail(&self, path: &Path, spec: &ThumbnailSpec) -> Result<RenderedThumbnail> {
        let reader = Self::open(path)?;
        let format = reader.format();

        let source = reader.decode().map_err(|e| TrailmapError::ImageDecode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let probe = ImageProbe {
            width: source.width(),
            height: source.height(),
            format: format.map(format_name).unwrap_or_else(|| "unknown".to_string()),
        };

        let resized = source.resize_to_fill(spec.width, spec.height, FilterType::Lanczos3);

        // JPEG has no alpha channel
        let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

        let mut bytes = Vec::new();
        rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, spec.quality))
            .map_err(|e| TrailmapError::ImageEncode {
                reason: e.to_string(),
            })?;

        Ok(RenderedThumbnail { bytes, probe })
    }
}
