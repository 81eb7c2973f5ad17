//! Disk-memoized thumbnails and image metadata.
//!
//! Artifacts are write-once: an existing thumbnail or metadata record is
//! served as-is even if its source image has changed since. Removing them is
//! left to [`AssetCache::clear`] or an operator.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use trailmap_core::error::{Result, TrailmapError};
use trailmap_core::models::{ImageKey, ImageMetadata, ThumbnailSpec};

use crate::atomic::write_atomic;
use crate::layout::CacheLayout;
use crate::ports::ImageProcessor;
use crate::processor::RasterProcessor;

/// Counts of artifacts under the cache directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub thumbnails: usize,
    pub metadata_records: usize,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WarmFailure {
    pub image: String,
    pub error: String,
}

/// Outcome of pre-generating artifacts for a set of images
#[derive(Debug, Clone, Default, Serialize)]
pub struct WarmReport {
    /// Thumbnails rendered by this run
    pub generated: usize,
    /// Thumbnails that were already cached
    pub cached: usize,
    pub failures: Vec<WarmFailure>,
}

impl WarmReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct AssetCache {
    layout: CacheLayout,
    spec: ThumbnailSpec,
    processor: Arc<dyn ImageProcessor>,
}

impl AssetCache {
    pub fn new(layout: CacheLayout, spec: ThumbnailSpec, processor: Arc<dyn ImageProcessor>) -> Self {
        Self {
            layout,
            spec,
            processor,
        }
    }

    /// Cache using the `image` crate for decoding and encoding
    pub fn with_raster(layout: CacheLayout, spec: ThumbnailSpec) -> Self {
        Self::new(layout, spec, Arc::new(RasterProcessor::new()))
    }

    pub fn layout(&self) -> &CacheLayout {
        &self.layout
    }

    pub fn spec(&self) -> &ThumbnailSpec {
        &self.spec
    }

    /// JPEG thumbnail bytes for `key`, rendered on first request.
    ///
    /// A freshly rendered thumbnail also records the source metadata when no
    /// record exists yet, since the dimensions are known at that point.
    pub fn thumbnail(&self, key: &ImageKey) -> Result<Vec<u8>> {
        let path = self.layout.thumbnail_path(key);

        if let Some(bytes) = read_if_exists(&path)? {
            tracing::debug!(image = %key, "Thumbnail cache hit");
            return Ok(bytes);
        }
        tracing::debug!(image = %key, "Thumbnail cache miss");

        let source = self.require_source(key)?;
        let rendered = self.processor.render_thumbnail(&source, &self.spec)?;
        write_atomic(&path, &rendered.bytes)?;

        tracing::info!(
            image = %key,
            width = self.spec.width,
            height = self.spec.height,
            bytes = rendered.bytes.len(),
            "Generated thumbnail"
        );

        let metadata_path = self.layout.metadata_path(key);
        if !metadata_path.exists() {
            let probe = rendered.probe;
            // The thumbnail is already persisted; a failed record is recomputed by `metadata`
            let recorded = ImageMetadata::from_dimensions(probe.width, probe.height, probe.format)
                .and_then(|metadata| persist_metadata(&metadata_path, &metadata));
            if let Err(e) = recorded {
                tracing::warn!(image = %key, error = %e, "Not recording metadata");
            }
        }

        Ok(rendered.bytes)
    }

    /// Dimensions, format and aspect ratio of the source image for `key`.
    ///
    /// Only the image header is read on a miss; no thumbnail is produced.
    pub fn metadata(&self, key: &ImageKey) -> Result<ImageMetadata> {
        let path = self.layout.metadata_path(key);

        if let Some(bytes) = read_if_exists(&path)? {
            match serde_json::from_slice::<ImageMetadata>(&bytes) {
                Ok(metadata) => {
                    tracing::debug!(image = %key, "Metadata cache hit");
                    return Ok(metadata);
                }
                Err(e) => tracing::warn!(
                    image = %key,
                    path = %path.display(),
                    error = %e,
                    "Unreadable metadata record, recomputing"
                ),
            }
        } else {
            tracing::debug!(image = %key, "Metadata cache miss");
        }

        let source = self.require_source(key)?;
        let probe = self.processor.probe(&source)?;
        let metadata = ImageMetadata::from_dimensions(probe.width, probe.height, probe.format)?;
        persist_metadata(&path, &metadata)?;

        tracing::info!(image = %key, width = metadata.width, height = metadata.height, "Recorded metadata");
        Ok(metadata)
    }

    /// Generate thumbnails and metadata for every key, continuing past failures.
    ///
    /// `on_done` is called once per key after it has been processed.
    pub fn warm<I, F>(&self, keys: I, mut on_done: F) -> WarmReport
    where
        I: IntoIterator<Item = ImageKey>,
        F: FnMut(&ImageKey),
    {
        let mut report = WarmReport::default();

        for key in keys {
            let was_cached = self.layout.thumbnail_path(&key).exists();
            let outcome = self.thumbnail(&key).and_then(|_| self.metadata(&key));

            match outcome {
                Ok(_) if was_cached => report.cached += 1,
                Ok(_) => report.generated += 1,
                Err(e) => {
                    tracing::warn!(image = %key, error = %e, "Failed to warm image");
                    report.failures.push(WarmFailure {
                        image: key.to_string(),
                        error: e.to_string(),
                    });
                }
            }
            on_done(&key);
        }

        tracing::info!(
            generated = report.generated,
            cached = report.cached,
            failed = report.failures.len(),
            "Cache warm complete"
        );
        report
    }

    /// Artifacts of this cache, including the nested batch thumbnail tree
    pub fn stats(&self) -> Result<CacheStats> {
        let batch = self.layout.batch();
        let (thumbnails, thumbnail_bytes) =
            dirs_usage(&[self.layout.thumbnails_dir(), batch.thumbnails_dir()])?;
        let (metadata_records, metadata_bytes) =
            dirs_usage(&[self.layout.metadata_dir(), batch.metadata_dir()])?;

        Ok(CacheStats {
            thumbnails,
            metadata_records,
            bytes: thumbnail_bytes + metadata_bytes,
        })
    }

    /// Delete every cached artifact, batch thumbnails included, returning what was removed
    pub fn clear(&self) -> Result<CacheStats> {
        let removed = self.stats()?;

        for dir in [
            self.layout.thumbnails_dir(),
            self.layout.metadata_dir(),
            self.layout.batch_dir(),
        ] {
            match fs::remove_dir_all(&dir) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!(
            thumbnails = removed.thumbnails,
            metadata_records = removed.metadata_records,
            "Cleared asset cache"
        );
        Ok(removed)
    }

    fn require_source(&self, key: &ImageKey) -> Result<PathBuf> {
        let path = self.layout.source_path(key);
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(TrailmapError::ImageNotFound { path }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(TrailmapError::ImageNotFound { path }),
            Err(e) => Err(e.into()),
        }
    }
}

impl std::fmt::Debug for AssetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetCache")
            .field("layout", &self.layout)
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn persist_metadata(path: &Path, metadata: &ImageMetadata) -> Result<()> {
    let json = serde_json::to_vec_pretty(metadata)?;
    write_atomic(path, &json)?;
    Ok(())
}

fn dirs_usage(dirs: &[PathBuf]) -> io::Result<(usize, u64)> {
    dirs.iter().try_fold((0, 0), |(files, bytes), dir| {
        let (more_files, more_bytes) = dir_usage(dir)?;
        Ok((files + more_files, bytes + more_bytes))
    })
}

/// File count and total size below `dir`, zero when it does not exist
fn dir_usage(dir: &Path) -> io::Result<(usize, u64)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok((0, 0)),
        Err(e) => return Err(e),
    };

    let mut files = 0;
    let mut bytes = 0;
    for entry in entries {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            let (nested_files, nested_bytes) = dir_usage(&entry.path())?;
            files += nested_files;
            bytes += nested_bytes;
        } else if file_type.is_file() {
            files += 1;
            bytes += entry.metadata()?.len();
        }
    }
    Ok((files, bytes))
}
