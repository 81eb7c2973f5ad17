use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::{Rgb, RgbImage};
use tempfile::TempDir;
use trailmap_core::error::{Result, TrailmapError};
use trailmap_core::models::{ImageKey, ThumbnailSpec};
use trailmap_store::{
    AssetCache, CacheLayout, CacheStats, ImageProbe, ImageProcessor, RasterProcessor,
    RenderedThumbnail,
};

struct Fixture {
    _root: TempDir,
    data_dir: PathBuf,
    cache_dir: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        let data_dir = root.path().join("data");
        let cache_dir = root.path().join("cache");
        fs::create_dir_all(&data_dir).unwrap();
        Self {
            _root: root,
            data_dir,
            cache_dir,
        }
    }

    fn add_image(&self, walk: Option<&str>, name: &str, width: u32, height: u32) {
        let dir = match walk {
            Some(walk) => self.data_dir.join(walk).join("images"),
            None => self.data_dir.join("images"),
        };
        fs::create_dir_all(&dir).unwrap();
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 3 % 256) as u8, ((x + y) % 256) as u8])
        });
        img.save(dir.join(name)).unwrap();
    }

    fn layout(&self) -> CacheLayout {
        CacheLayout::new(&self.data_dir, &self.cache_dir)
    }

    fn cache(&self) -> AssetCache {
        AssetCache::with_raster(self.layout(), ThumbnailSpec::default())
    }
}

/// Wraps the real processor and counts how often it is invoked
#[derive(Default)]
struct CountingProcessor {
    inner: RasterProcessor,
    probes: AtomicUsize,
    renders: AtomicUsize,
}

impl ImageProcessor for CountingProcessor {
    fn probe(&self, path: &Path) -> Result<ImageProbe> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.inner.probe(path)
    }

    fn render_thumbnail(&self, path: &Path, spec: &ThumbnailSpec) -> Result<RenderedThumbnail> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        self.inner.render_thumbnail(path, spec)
    }
}

/// Reports a header with zero height
struct FlatProcessor;

impl ImageProcessor for FlatProcessor {
    fn probe(&self, _path: &Path) -> Result<ImageProbe> {
        Ok(ImageProbe {
            width: 120,
            height: 0,
            format: "png".to_string(),
        })
    }

    fn render_thumbnail(&self, _path: &Path, _spec: &ThumbnailSpec) -> Result<RenderedThumbnail> {
        Err(TrailmapError::ImageEncode { reason: "nothing to draw".to_string() })
    }
}

fn count_files(dir: &Path) -> usize {
    if !dir.exists() {
        return 0;
    }
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| {
            let path = entry.unwrap().path();
            if path.is_dir() {
                count_files(&path)
            } else {
                1
            }
        })
        .sum()
}

#[test]
fn test_thumbnail_is_cover_fit_jpeg() {
    let fixture = Fixture::new();
    fixture.add_image(Some("coast"), "bay.png", 640, 360);

    let key = ImageKey::new(Some("coast"), "bay.png").unwrap();
    let bytes = fixture.cache().thumbnail(&key).unwrap();

    let thumb = image::load_from_memory(&bytes).unwrap();
    assert_eq!((thumb.width(), thumb.height()), (200, 200));
    assert!(fixture.layout().thumbnail_path(&key).is_file());
}

#[test]
fn test_thumbnail_is_idempotent_and_served_from_disk() {
    let fixture = Fixture::new();
    fixture.add_image(None, "view.png", 300, 500);

    let processor = Arc::new(CountingProcessor::default());
    let cache = AssetCache::new(fixture.layout(), ThumbnailSpec::default(), processor.clone());
    let key = ImageKey::new(None, "view.png").unwrap();

    let first = cache.thumbnail(&key).unwrap();
    let second = cache.thumbnail(&key).unwrap();
    let third = cache.thumbnail(&key).unwrap();

    assert_eq!(first, second);
    assert_eq!(second, third);
    assert_eq!(processor.renders.load(Ordering::SeqCst), 1);
}

#[test]
fn test_thumbnail_records_metadata_once() {
    let fixture = Fixture::new();
    fixture.add_image(Some("ridge"), "summit.png", 400, 100);

    let processor = Arc::new(CountingProcessor::default());
    let cache = AssetCache::new(fixture.layout(), ThumbnailSpec::default(), processor.clone());
    let key = ImageKey::new(Some("ridge"), "summit.png").unwrap();

    cache.thumbnail(&key).unwrap();
    assert!(fixture.layout().metadata_path(&key).is_file());

    let metadata = cache.metadata(&key).unwrap();
    assert_eq!(metadata.aspect_ratio, 4.0);
    assert_eq!(processor.probes.load(Ordering::SeqCst), 0);
}

#[test]
fn test_metadata_exact_ratio_without_thumbnail() {
    let fixture = Fixture::new();
    fixture.add_image(Some("coast"), "odd.png", 333, 777);

    let cache = fixture.cache();
    let key = ImageKey::new(Some("coast"), "odd.png").unwrap();
    let metadata = cache.metadata(&key).unwrap();

    assert_eq!(metadata.width, 333);
    assert_eq!(metadata.height, 777);
    assert_eq!(metadata.format, "png");
    assert_eq!(metadata.aspect_ratio, 333.0 / 777.0);

    // Metadata never forces a thumbnail
    assert!(!fixture.layout().thumbnail_path(&key).exists());
    assert_eq!(count_files(&fixture.layout().thumbnails_dir()), 0);

    let record: serde_json::Value =
        serde_json::from_slice(&fs::read(fixture.layout().metadata_path(&key)).unwrap()).unwrap();
    assert_eq!(record["aspectRatio"], serde_json::json!(333.0 / 777.0));
}

#[test]
fn test_missing_source_creates_nothing() {
    let fixture = Fixture::new();
    let cache = fixture.cache();
    let key = ImageKey::new(Some("coast"), "ghost.jpg").unwrap();

    let err = cache.metadata(&key).unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {err}");

    let err = cache.thumbnail(&key).unwrap_err();
    assert!(matches!(err, TrailmapError::ImageNotFound { .. }));

    assert!(!fixture.cache_dir.exists());
}

#[test]
fn test_zero_height_is_rejected_and_not_persisted() {
    let fixture = Fixture::new();
    fixture.add_image(None, "flat.png", 10, 10);

    let cache = AssetCache::new(fixture.layout(), ThumbnailSpec::default(), Arc::new(FlatProcessor));
    let key = ImageKey::new(None, "flat.png").unwrap();

    let err = cache.metadata(&key).unwrap_err();
    assert!(matches!(err, TrailmapError::InvalidDimensions { width: 120, height: 0 }));
    assert!(err.is_validation());
    assert!(!fixture.layout().metadata_path(&key).exists());
}

#[test]
fn test_traversal_cannot_escape_image_root() {
    let fixture = Fixture::new();
    fixture.add_image(Some("coast"), "passwd", 20, 20);

    let cache = fixture.cache();
    let key = ImageKey::new(Some("coast"), "../../etc/passwd").unwrap();
    assert_eq!(key.filename(), "passwd");

    // Resolves to the walk's own image, nothing outside the data directory
    let metadata = cache.metadata(&key).unwrap();
    assert_eq!(metadata.width, 20);
    assert!(fixture.layout().metadata_path(&key).starts_with(&fixture.cache_dir));
}

#[test]
fn test_corrupt_metadata_record_is_recomputed() {
    let fixture = Fixture::new();
    fixture.add_image(None, "wide.png", 200, 100);

    let cache = fixture.cache();
    let key = ImageKey::new(None, "wide.png").unwrap();
    let path = fixture.layout().metadata_path(&key);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ truncated").unwrap();

    let metadata = cache.metadata(&key).unwrap();
    assert_eq!(metadata.aspect_ratio, 2.0);

    let repaired: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(repaired["width"], 200);
}

#[test]
fn test_artifacts_are_write_once() {
    let fixture = Fixture::new();
    fixture.add_image(None, "pier.png", 100, 50);

    let cache = fixture.cache();
    let key = ImageKey::new(None, "pier.png").unwrap();
    let before = cache.thumbnail(&key).unwrap();
    let before_meta = cache.metadata(&key).unwrap();

    // Replace the source with a differently shaped image
    fixture.add_image(None, "pier.png", 50, 100);

    assert_eq!(cache.thumbnail(&key).unwrap(), before);
    assert_eq!(cache.metadata(&key).unwrap(), before_meta);
}

#[test]
fn test_warm_stats_and_clear() {
    let fixture = Fixture::new();
    fixture.add_image(Some("coast"), "a.png", 64, 64);
    fixture.add_image(Some("coast"), "b.png", 64, 32);

    let cache = fixture.cache();
    let keys = ["a.png", "b.png", "missing.png"]
        .iter()
        .map(|name| ImageKey::new(Some("coast"), name).unwrap())
        .collect::<Vec<_>>();

    let mut seen = 0;
    let report = cache.warm(keys.clone(), |_| seen += 1);
    assert_eq!(seen, 3);
    assert_eq!(report.generated, 2);
    assert_eq!(report.cached, 0);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].image, "coast/missing.png");
    assert!(!report.is_success());

    let again = cache.warm(keys.into_iter().take(2), |_| {});
    assert_eq!(again.cached, 2);
    assert!(again.is_success());

    let stats = cache.stats().unwrap();
    assert_eq!(stats.thumbnails, 2);
    assert_eq!(stats.metadata_records, 2);
    assert!(stats.bytes > 0);

    let removed = cache.clear().unwrap();
    assert_eq!(removed, stats);
    assert_eq!(cache.stats().unwrap(), CacheStats::default());

    // Clearing an empty cache is fine
    assert_eq!(cache.clear().unwrap(), CacheStats::default());
}

#[test]
fn test_concurrent_first_requests_agree() {
    let fixture = Fixture::new();
    fixture.add_image(Some("coast"), "race.png", 320, 240);

    let cache = fixture.cache();
    let key = ImageKey::new(Some("coast"), "race.png").unwrap();

    let results: Vec<Vec<u8>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| cache.thumbnail(&key).unwrap())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(fs::read(fixture.layout().thumbnail_path(&key)).unwrap(), results[0]);
}

#[test]
fn test_clear_removes_batch_thumbnails() {
    let fixture = Fixture::new();
    fixture.add_image(Some("coast"), "a.png", 80, 40);

    let cache = fixture.cache();
    let batch_layout = fixture.layout().batch();
    let batch = AssetCache::with_raster(batch_layout.clone(), ThumbnailSpec::batch());
    let key = ImageKey::new(Some("coast"), "a.png").unwrap();

    let small = batch.thumbnail(&key).unwrap();
    assert_eq!(image::load_from_memory(&small).unwrap().width(), 50);
    cache.thumbnail(&key).unwrap();

    let stats = cache.stats().unwrap();
    assert_eq!(stats.thumbnails, 2);
    assert_eq!(stats.metadata_records, 2);

    let removed = cache.clear().unwrap();
    assert_eq!(removed, stats);
    assert!(!batch_layout.thumbnail_path(&key).exists());
    assert!(!fixture.layout().batch_dir().exists());
    assert_eq!(cache.stats().unwrap(), CacheStats::default());
}

#[test]
fn test_unwritable_cache_dir_is_io_error() {
    let fixture = Fixture::new();
    fixture.add_image(None, "dock.png", 40, 40);
    fs::write(&fixture.cache_dir, b"not a directory").unwrap();

    let cache = fixture.cache();
    let key = ImageKey::new(None, "dock.png").unwrap();

    let err = cache.thumbnail(&key).unwrap_err();
    assert!(matches!(err, TrailmapError::Io(_)), "unexpected error: {err}");
    assert!(!err.is_not_found());
    assert!(!err.is_validation());

    let err = cache.metadata(&key).unwrap_err();
    assert!(matches!(err, TrailmapError::Io(_)), "unexpected error: {err}");
}

#[test]
fn test_unreadable_header_is_metadata_parse_error() {
    let fixture = Fixture::new();
    let images = fixture.data_dir.join("coast/images");
    fs::create_dir_all(&images).unwrap();
    fs::write(images.join("junk.png"), b"\x89PNG\r\n\x1a\ngarbage").unwrap();

    let cache = fixture.cache();
    let key = ImageKey::new(Some("coast"), "junk.png").unwrap();

    let err = cache.metadata(&key).unwrap_err();
    assert!(matches!(err, TrailmapError::MetadataParse { .. }), "unexpected error: {err}");
    assert!(!fixture.layout().metadata_path(&key).exists());
    assert!(!fixture.cache_dir.exists());
}

#[test]
fn test_undecodable_source_leaves_no_thumbnail() {
    let fixture = Fixture::new();
    let images = fixture.data_dir.join("images");
    fs::create_dir_all(&images).unwrap();
    fs::write(images.join("torn.png"), b"\x89PNG\r\n\x1a\ngarbage").unwrap();

    let cache = fixture.cache();
    let key = ImageKey::new(None, "torn.png").unwrap();

    let err = cache.thumbnail(&key).unwrap_err();
    assert!(matches!(err, TrailmapError::ImageDecode { .. }), "unexpected error: {err}");
    assert!(!fixture.layout().thumbnail_path(&key).exists());
    assert_eq!(count_files(&fixture.cache_dir), 0);
}

#[test]
fn test_thumbnail_survives_failed_metadata_record() {
    let fixture = Fixture::new();
    fixture.add_image(None, "buoy.png", 60, 30);

    // A file where the metadata directory should be makes the record unwritable
    fs::create_dir_all(&fixture.cache_dir).unwrap();
    fs::write(fixture.layout().metadata_dir(), b"blocked").unwrap();

    let cache = fixture.cache();
    let key = ImageKey::new(None, "buoy.png").unwrap();

    let bytes = cache.thumbnail(&key).unwrap();
    assert_eq!(fs::read(fixture.layout().thumbnail_path(&key)).unwrap(), bytes);
}
