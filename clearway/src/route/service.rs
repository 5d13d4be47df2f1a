//! Directions orchestration: fetch, decode, annotate, rank.

use super::ranker;
use super::types::{AnnotatedRoute, RankedDirections, RouteStep, UpstreamRoute};
use super::{Destination, DirectionsProvider};
use crate::coord::Coordinate;
use crate::obstacle::{ObstacleMatcher, ObstacleStore, StoreError};
use crate::polyline;
use crate::provider::ProviderError;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur serving a directions request.
#[derive(Debug, Error)]
pub enum DirectionsError {
    /// Upstream directions request failed
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Obstacle store query failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Walking directions annotated with obstacle accessibility.
///
/// Fetches route alternatives from the upstream provider, decodes each
/// alternative's overview geometry, matches obstacles along it, and
/// ranks the alternatives by `(obstacle_count, duration)`. A route whose
/// geometry fails to decode is dropped with a warning; the remaining
/// alternatives proceed.
pub struct DirectionsService<D, S> {
    provider: D,
    matcher: ObstacleMatcher<S>,
}

impl<D, S> DirectionsService<D, S>
where
    D: DirectionsProvider,
    S: ObstacleStore,
{
    /// Assemble the service from its collaborators.
    pub fn new(provider: D, matcher: ObstacleMatcher<S>) -> Self {
        Self { provider, matcher }
    }

    /// Serve a walking directions request.
    ///
    /// With `avoid_obstacles` unset, the store is never queried: routes
    /// keep their upstream order and carry empty obstacle annotations.
    ///
    /// # Errors
    ///
    /// [`DirectionsError::Provider`] for upstream failures (including
    /// `NoRoute`), [`DirectionsError::Store`] when the obstacle store
    /// query fails.
    pub async fn walking(
        &self,
        origin: Coordinate,
        destination: Destination,
        avoid_obstacles: bool,
        language: &str,
    ) -> Result<RankedDirections, DirectionsError> {
        let upstream_routes = self
            .provider
            .walking_routes(origin, &destination, language, true)
            .await?;

        debug!(
            routes = upstream_routes.len(),
            avoid_obstacles, "upstream returned route alternatives"
        );

        let mut routes = Vec::with_capacity(upstream_routes.len());
        for (route_index, upstream) in upstream_routes.into_iter().enumerate() {
            match self.annotate(route_index, upstream, avoid_obstacles).await? {
                Some(route) => routes.push(route),
                None => continue,
            }
        }

        if avoid_obstacles {
            Ok(ranker::rank(routes))
        } else {
            Ok(ranker::in_given_order(routes))
        }
    }

    /// Convert one upstream route, annotating it with obstacle matches.
    ///
    /// Returns `None` for a malformed alternative (no legs, undecodable
    /// geometry) so the caller can skip it.
    async fn annotate(
        &self,
        route_index: usize,
        upstream: UpstreamRoute,
        avoid_obstacles: bool,
    ) -> Result<Option<AnnotatedRoute>, DirectionsError> {
        let Some(leg) = upstream.legs.into_iter().next() else {
            warn!(route_index, "dropping route alternative without legs");
            return Ok(None);
        };

        let obstacles = if avoid_obstacles {
            let path = match polyline::decode(&upstream.overview_polyline.points) {
                Ok(path) => path,
                Err(error) => {
                    warn!(route_index, %error, "dropping route alternative with undecodable geometry");
                    return Ok(None);
                }
            };
            self.matcher.matches_along(&path).await?
        } else {
            Vec::new()
        };

        let obstacle_count = obstacles.len();
        Ok(Some(AnnotatedRoute {
            route_index,
            summary: upstream.summary.unwrap_or_default(),
            distance: leg.distance.text,
            distance_value: leg.distance.value,
            duration: leg.duration.text,
            duration_value: leg.duration.value,
            start_address: leg.start_address.unwrap_or_default(),
            end_address: leg.end_address.unwrap_or_default(),
            start_location: leg.start_location,
            end_location: leg.end_location,
            steps: leg.steps.into_iter().map(RouteStep::from).collect(),
            overview_polyline: upstream.overview_polyline.points,
            obstacles,
            obstacle_count,
            is_accessible: obstacle_count == 0,
        }))
    }
}
