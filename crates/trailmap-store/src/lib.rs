//! Trailmap Store - Derived image asset cache
//!
//! Thumbnails and image metadata are computed once from the source images
//! of a walk and memoized on disk. The image primitive sits behind the
//! [`ImageProcessor`](ports::ImageProcessor) port.

pub mod atomic;
pub mod cache;
pub mod layout;
pub mod ports;
pub mod processor;

pub use cache::{AssetCache, CacheStats, WarmFailure, WarmReport};
pub use layout::CacheLayout;
pub use ports::{ImageProbe, ImageProcessor, RenderedThumbnail};
pub use processor::RasterProcessor;
