//! Coordinate type definitions

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A geographic coordinate in decimal degrees.
///
/// Serializes as `{"lat": .., "lng": ..}`, matching the wire format the
/// upstream mapping provider uses for location objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees, positive north
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees, positive east
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Tile coordinates in the XYZ / Slippy Map scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Zoom level
    pub z: u8,
    /// X coordinate (east-west), 0 at west
    pub x: u32,
    /// Y coordinate (north-south), 0 at north
    pub y: u32,
}

impl TileCoord {
    /// Create a new tile coordinate.
    pub fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Validate this coordinate against the tile grid.
    ///
    /// The zoom level must not exceed `max_zoom`, and both axes must lie
    /// within `0..2^z`.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError`] describing which constraint was violated.
    pub fn validate(&self, max_zoom: u8) -> Result<(), CoordError> {
        if self.z > max_zoom {
            return Err(CoordError::InvalidZoom {
                z: self.z,
                max_zoom,
            });
        }
        let max_index = (1u64 << self.z) - 1;
        if u64::from(self.x) > max_index || u64::from(self.y) > max_index {
            return Err(CoordError::TileOutOfRange {
                x: self.x,
                y: self.y,
                z: self.z,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// A latitude/longitude bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl LatLngBounds {
    /// Create a bounding box from explicit corners.
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Compute the tight bounding box of a coordinate path.
    ///
    /// Returns `None` for an empty path.
    pub fn from_path(path: &[Coordinate]) -> Option<Self> {
        let first = path.first()?;
        let mut bounds = Self::new(
            first.latitude,
            first.latitude,
            first.longitude,
            first.longitude,
        );
        for point in &path[1..] {
            bounds.min_lat = bounds.min_lat.min(point.latitude);
            bounds.max_lat = bounds.max_lat.max(point.latitude);
            bounds.min_lon = bounds.min_lon.min(point.longitude);
            bounds.max_lon = bounds.max_lon.max(point.longitude);
        }
        Some(bounds)
    }

    /// Expand the box by `margin_deg` degrees in every direction.
    pub fn expand(self, margin_deg: f64) -> Self {
        Self {
            min_lat: self.min_lat - margin_deg,
            max_lat: self.max_lat + margin_deg,
            min_lon: self.min_lon - margin_deg,
            max_lon: self.max_lon + margin_deg,
        }
    }

    /// Whether the box contains the coordinate (inclusive on all edges).
    pub fn contains(&self, point: &Coordinate) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lon
            && point.longitude <= self.max_lon
    }
}

/// Errors produced by tile coordinate validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordError {
    /// Zoom level outside the supported range
    #[error("zoom level {z} exceeds maximum {max_zoom}")]
    InvalidZoom { z: u8, max_zoom: u8 },

    /// X or Y index outside the grid for the zoom level
    #[error("tile ({x}, {y}) out of range for zoom {z}")]
    TileOutOfRange { x: u32, y: u32, z: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_grid_corners() {
        assert!(TileCoord::new(0, 0, 0).validate(22).is_ok());
        assert!(TileCoord::new(10, 1023, 1023).validate(22).is_ok());
        assert!(TileCoord::new(22, 0, 0).validate(22).is_ok());
    }

    #[test]
    fn test_validate_rejects_excess_zoom() {
        let err = TileCoord::new(23, 0, 0).validate(22).unwrap_err();
        assert_eq!(err, CoordError::InvalidZoom { z: 23, max_zoom: 22 });
    }

    #[test]
    fn test_validate_rejects_out_of_range_axes() {
        let err = TileCoord::new(1, 2, 0).validate(22).unwrap_err();
        assert_eq!(err, CoordError::TileOutOfRange { x: 2, y: 0, z: 1 });

        let err = TileCoord::new(1, 0, 2).validate(22).unwrap_err();
        assert_eq!(err, CoordError::TileOutOfRange { x: 0, y: 2, z: 1 });
    }

    #[test]
    fn test_bounds_from_path() {
        let path = vec![
            Coordinate::new(37.50, 127.00),
            Coordinate::new(37.52, 126.98),
            Coordinate::new(37.51, 127.01),
        ];
        let bounds = LatLngBounds::from_path(&path).unwrap();
        assert_eq!(bounds.min_lat, 37.50);
        assert_eq!(bounds.max_lat, 37.52);
        assert_eq!(bounds.min_lon, 126.98);
        assert_eq!(bounds.max_lon, 127.01);
    }

    #[test]
    fn test_bounds_from_empty_path() {
        assert!(LatLngBounds::from_path(&[]).is_none());
    }

    #[test]
    fn test_bounds_expand_and_contains() {
        let bounds = LatLngBounds::new(37.50, 37.52, 126.98, 127.01).expand(0.002);
        assert!(bounds.contains(&Coordinate::new(37.4985, 126.9785)));
        assert!(bounds.contains(&Coordinate::new(37.5215, 127.0115)));
        assert!(!bounds.contains(&Coordinate::new(37.53, 127.00)));
    }

    #[test]
    fn test_coordinate_wire_format() {
        let coord: Coordinate = serde_json::from_str(r#"{"lat": 37.5665, "lng": 126.978}"#).unwrap();
        assert_eq!(coord.latitude, 37.5665);
        assert_eq!(coord.longitude, 126.978);

        let json = serde_json::to_string(&coord).unwrap();
        assert!(json.contains("\"lat\""));
        assert!(json.contains("\"lng\""));
    }
}
