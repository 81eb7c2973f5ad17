use std::path::{Path, PathBuf};

use trailmap_core::models::ImageKey;
use trailmap_core::walks::IMAGES_DIR;

const THUMBNAILS_DIR: &str = "thumbnails";
const METADATA_DIR: &str = "metadata";
const BATCH_DIR: &str = "batch";

/// Where source images live and where derived artifacts are written.
///
/// ```text
/// <data_dir>/<walk>/images/<file>            source, walk scoped
/// <data_dir>/images/<file>                   source, single walk
/// <cache_dir>/thumbnails/[<walk>/]<file>.jpg
/// <cache_dir>/metadata/[<walk>/]<file>.json
/// <cache_dir>/batch/...                      same tree for batch thumbnails
/// ```
///
/// Keys are already reduced to base names, so every path stays below its root.
#[derive(Debug, Clone)]
pub struct CacheLayout {
    data_dir: PathBuf,
    cache_dir: PathBuf,
}

impl CacheLayout {
    pub fn new(data_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache_dir: cache_dir.into(),
        }
    }

    /// Layout of the batch thumbnail tree nested below this cache
    pub fn batch(&self) -> Self {
        Self {
            data_dir: self.data_dir.clone(),
            cache_dir: self.batch_dir(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn thumbnails_dir(&self) -> PathBuf {
        self.cache_dir.join(THUMBNAILS_DIR)
    }

    pub fn metadata_dir(&self) -> PathBuf {
        self.cache_dir.join(METADATA_DIR)
    }

    pub fn batch_dir(&self) -> PathBuf {
        self.cache_dir.join(BATCH_DIR)
    }

    pub fn source_path(&self, key: &ImageKey) -> PathBuf {
        let root = match key.walk_id() {
            Some(walk) => self.data_dir.join(walk),
            None => self.data_dir.clone(),
        };
        root.join(IMAGES_DIR).join(key.filename())
    }

    pub fn thumbnail_path(&self, key: &ImageKey) -> PathBuf {
        Self::scoped(self.thumbnails_dir(), key, "jpg")
    }

    pub fn metadata_path(&self, key: &ImageKey) -> PathBuf {
        Self::scoped(self.metadata_dir(), key, "json")
    }

    // The extension is appended, not substituted, so `a.png` and `a.jpg`
    // never share an artifact.
    fn scoped(root: PathBuf, key: &ImageKey, extension: &str) -> PathBuf {
        let dir = match key.walk_id() {
            Some(walk) => root.join(walk),
            None => root,
        };
        dir.join(format!("{}.{}", key.filename(), extension))
    }
}
