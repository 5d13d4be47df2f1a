//! Obstacle matching against route geometry.

use super::store::{ObstacleStore, StoreError};
use super::types::ObstacleMatch;
use crate::coord::{Coordinate, LatLngBounds};
use crate::geo::point_to_segment_distance_m;
use tracing::debug;

/// Finds obstacle reports within a detection radius of a route.
///
/// The store is queried once per route with the route's bounding box
/// expanded by a fixed margin; each returned obstacle is then checked
/// against the route's segments in path order.
pub struct ObstacleMatcher<S> {
    store: S,
    radius_m: f64,
    bbox_margin_deg: f64,
}

impl<S: ObstacleStore> ObstacleMatcher<S> {
    /// Create a matcher over `store`.
    ///
    /// # Arguments
    ///
    /// * `radius_m` - detection radius around the route, in metres
    /// * `bbox_margin_deg` - margin added to the route's bounding box
    ///   before the store query, in degrees
    pub fn new(store: S, radius_m: f64, bbox_margin_deg: f64) -> Self {
        Self {
            store,
            radius_m,
            bbox_margin_deg,
        }
    }

    /// Detection radius in metres.
    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// Match obstacles along a decoded route path.
    ///
    /// For each obstacle the route's consecutive segments are scanned in
    /// order; the first segment within the radius yields one
    /// [`ObstacleMatch`] carrying that segment's distance, and scanning
    /// stops for that obstacle. An empty path matches nothing.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the bounding box query.
    pub async fn matches_along(&self, path: &[Coordinate]) -> Result<Vec<ObstacleMatch>, StoreError> {
        let Some(bounds) = LatLngBounds::from_path(path) else {
            return Ok(Vec::new());
        };
        let bounds = bounds.expand(self.bbox_margin_deg);

        let candidates = self.store.find_by_bounds(&bounds).await?;
        debug!(
            candidates = candidates.len(),
            radius_m = self.radius_m,
            "matching obstacles against route"
        );

        let mut matches = Vec::new();
        for obstacle in candidates {
            let point = Coordinate::new(obstacle.latitude, obstacle.longitude);
            for segment in path.windows(2) {
                let distance = point_to_segment_distance_m(point, segment[0], segment[1]);
                if distance <= self.radius_m {
                    matches.push(ObstacleMatch::from_obstacle(
                        obstacle,
                        (distance * 10.0).round() / 10.0,
                    ));
                    break;
                }
            }
        }

        Ok(matches)
    }
}
