//! Spherical distance helpers for obstacle matching.
//!
//! Distances are great-circle (haversine) metres. Point-to-segment
//! projection uses planar delta vectors, a small-scale approximation that
//! holds for the detection radii involved (tens of metres).

use crate::coord::Coordinate;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates, in metres.
pub fn haversine_distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Shortest distance from `point` to the segment `start`–`end`, in metres.
///
/// A degenerate segment (`start == end`) falls back to the great-circle
/// distance to that single coordinate. Otherwise the point is projected
/// onto the segment in delta-degree space, the projection parameter is
/// clamped to `[0, 1]`, and the great-circle distance to the clamped
/// projection is returned.
pub fn point_to_segment_distance_m(point: Coordinate, start: Coordinate, end: Coordinate) -> f64 {
    let seg_lat = end.latitude - start.latitude;
    let seg_lon = end.longitude - start.longitude;
    let to_point_lat = point.latitude - start.latitude;
    let to_point_lon = point.longitude - start.longitude;

    let seg_len_sq = seg_lat * seg_lat + seg_lon * seg_lon;
    if seg_len_sq == 0.0 {
        return haversine_distance_m(point, start);
    }

    let t = ((to_point_lat * seg_lat + to_point_lon * seg_lon) / seg_len_sq).clamp(0.0, 1.0);

    let closest = Coordinate::new(start.latitude + t * seg_lat, start.longitude + t * seg_lon);
    haversine_distance_m(point, closest)
}
