pub mod coordinate;
pub mod image;
pub mod marker;
pub mod walk;

pub use coordinate::{LatLng, TrailPath};
pub use image::{sanitize_name, ImageKey, ImageMetadata, ThumbnailSpec};
pub use marker::{MarkerPoint, PlacedMarker, PlacementConfig};
pub use walk::{Walk, WalkImage, WalkInfo};
