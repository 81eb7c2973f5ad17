//! Greedy, order-dependent placement of thumbnail markers beside a trail.
//!
//! Coordinates are decimal degrees used directly as a planar (lat, lng)
//! space, which is accurate enough for the tens of metres involved.

use trailmap_core::error::{Result, TrailmapError};
use trailmap_core::models::{LatLng, MarkerPoint, PlacedMarker, PlacementConfig, TrailPath};

/// Distance from `point` to the segment `start`-`end`.
///
/// The point is projected onto the infinite line through the segment and the
/// projection parameter clamped to the segment; a zero-length segment
/// degrades to the point-to-point distance.
pub fn distance_to_segment(point: LatLng, start: LatLng, end: LatLng) -> f64 {
    let d_lat = end.lat - start.lat;
    let d_lng = end.lng - start.lng;
    let length_sq = d_lat * d_lat + d_lng * d_lng;

    if length_sq == 0.0 {
        return planar_distance(point, start);
    }

    let t = ((point.lat - start.lat) * d_lat + (point.lng - start.lng) * d_lng) / length_sq;

    if t < 0.0 {
        return planar_distance(point, start);
    }
    if t > 1.0 {
        return planar_distance(point, end);
    }

    let projection = LatLng::new(start.lat + t * d_lat, start.lng + t * d_lng);
    planar_distance(point, projection)
}

fn planar_distance(a: LatLng, b: LatLng) -> f64 {
    (a.lat - b.lat).hypot(a.lng - b.lng)
}

/// Index of the trail segment nearest to `point`; the first one wins ties
pub fn closest_segment(point: LatLng, trail: &TrailPath) -> Result<usize> {
    ensure_segments(trail)?;

    let mut closest = 0;
    let mut min_distance = f64::INFINITY;
    for (index, (start, end)) in trail.segments().enumerate() {
        let distance = distance_to_segment(point, start, end);
        if distance < min_distance {
            min_distance = distance;
            closest = index;
        }
    }

    Ok(closest)
}

/// Unit direction `(d_lat, d_lng)` of the trail around segment `closest`.
///
/// Averages `max(1, floor(len * window))` segments starting half that count
/// before `closest`, clamped to the trail.
pub fn local_direction(trail: &TrailPath, closest: usize, window: f64) -> Result<(f64, f64)> {
    ensure_segments(trail)?;

    let points = trail.points();
    let len = points.len();
    let closest = closest.min(len - 2);

    let count = ((len as f64 * window).floor() as usize).max(1);
    let start = closest.saturating_sub(count / 2);
    let end = (len - 1).min(start + count);

    let (sum_lat, sum_lng) = points[start..=end]
        .windows(2)
        .fold((0.0, 0.0), |(lat, lng), pair| {
            (lat + pair[1].lat - pair[0].lat, lng + pair[1].lng - pair[0].lng)
        });

    let segments = (end - start) as f64;
    let (d_lat, d_lng) = (sum_lat / segments, sum_lng / segments);
    let length = d_lat.hypot(d_lng);

    if !(length.is_finite() && length > 0.0) {
        return Err(TrailmapError::DegenerateGeometry {
            reason: format!(
                "trail direction around segment {} has zero length (segments {}..{})",
                closest, start, end
            ),
        });
    }

    Ok((d_lat / length, d_lng / length))
}

fn ensure_segments(trail: &TrailPath) -> Result<()> {
    if trail.len() < 2 {
        return Err(TrailmapError::InsufficientTrail { points: trail.len() });
    }
    if let Some(bad) = trail.points().iter().find(|p| !p.is_finite()) {
        return Err(TrailmapError::DegenerateGeometry {
            reason: format!("trail contains non-finite coordinate {:?}", bad),
        });
    }
    Ok(())
}

/// Computes offset positions for thumbnail markers along a trail
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerPlacer {
    config: PlacementConfig,
}

impl MarkerPlacer {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Offset position for a marker at `point`, avoiding `placed` offsets.
    ///
    /// Candidates step away from the trail along its left-hand perpendicular
    /// at 1x, 2x, ... `base_offset`. The first candidate at least
    /// `min_separation` from every placed offset is returned; when all of them
    /// collide the nearest candidate is used anyway.
    pub fn place(&self, point: LatLng, trail: &TrailPath, placed: &[LatLng]) -> Result<LatLng> {
        if !point.is_finite() {
            return Err(TrailmapError::DegenerateGeometry {
                reason: format!("marker coordinate {:?} is not finite", point),
            });
        }

        let closest = closest_segment(point, trail)?;
        let (n_lat, n_lng) = local_direction(trail, closest, self.config.direction_window)?;

        // Rotate the direction by 90 degrees
        let (p_lat, p_lng) = (n_lng, -n_lat);

        let candidate = |step: usize| {
            let distance = self.config.base_offset * step as f64;
            LatLng::new(point.lat + p_lat * distance, point.lng + p_lng * distance)
        };

        for step in 1..=self.config.attempts.max(1) {
            let offset = candidate(step);
            let overlaps = placed
                .iter()
                .any(|other| distance_to_segment(offset, *other, *other) < self.config.min_separation);

            if !overlaps {
                return Ok(offset);
            }
        }

        tracing::debug!(
            lat = point.lat,
            lng = point.lng,
            attempts = self.config.attempts,
            "No free marker position, accepting overlap"
        );
        Ok(candidate(1))
    }

    /// Place every marker in input order, each one avoiding those before it
    pub fn place_all<T>(
        &self,
        trail: &TrailPath,
        markers: impl IntoIterator<Item = MarkerPoint<T>>,
    ) -> Result<Vec<PlacedMarker<T>>> {
        let (_, placed) = markers.into_iter().try_fold(
            (Vec::new(), Vec::new()),
            |(mut offsets, mut placed): (Vec<LatLng>, Vec<PlacedMarker<T>>), marker| {
                let offset = self.place(marker.coordinates, trail, &offsets)?;
                offsets.push(offset);
                placed.push(PlacedMarker {
                    offset,
                    marker,
                });
                Ok::<_, TrailmapError>((offsets, placed))
            },
        )?;

        Ok(placed)
    }
}
