//! Coordinate types for the map proxy.
//!
//! Provides geographic coordinates in decimal degrees, XYZ tile
//! coordinates with range validation, and latitude/longitude bounding
//! boxes used for obstacle store queries.

mod types;

pub use types::{Coordinate, CoordError, LatLngBounds, TileCoord};
