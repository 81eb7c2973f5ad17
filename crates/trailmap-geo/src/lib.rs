//! Trailmap Geo - Marker placement and trail geometry
//!
//! This crate positions thumbnail markers beside a trail without letting
//! them pile up on each other, and derives map extents from trail paths.

pub mod extent;
pub mod placement;

pub use extent::{trail_extent, trail_length_meters, TrailExtent};
pub use placement::{closest_segment, distance_to_segment, local_direction, MarkerPlacer};
