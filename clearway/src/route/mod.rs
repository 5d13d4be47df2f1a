//! Walking directions with obstacle annotation and ranking.
//!
//! Routes are computed by the upstream provider; this module decodes
//! their geometry, annotates each alternative with nearby obstacle
//! reports, and orders the alternatives by accessibility.

mod ranker;
mod service;
mod types;

use crate::coord::Coordinate;
use crate::provider::ProviderError;
use std::future::Future;

pub use ranker::rank;
pub use service::{DirectionsError, DirectionsService};
pub use types::{
    AnnotatedRoute, RankedDirections, RouteStep, TextValue, UpstreamLeg, UpstreamPolyline,
    UpstreamRoute, UpstreamStep,
};

/// Directions destination: a coordinate or an upstream place id.
#[derive(Debug, Clone)]
pub enum Destination {
    Point(Coordinate),
    PlaceId(String),
}

/// Upstream walking directions endpoint.
pub trait DirectionsProvider: Send + Sync {
    /// Fetch walking routes from `origin` to `destination`.
    ///
    /// `ZERO_RESULTS` surfaces as [`ProviderError::NoRoute`]; other
    /// non-OK provider statuses as [`ProviderError::Api`].
    fn walking_routes(
        &self,
        origin: Coordinate,
        destination: &Destination,
        language: &str,
        alternatives: bool,
    ) -> impl Future<Output = Result<Vec<UpstreamRoute>, ProviderError>> + Send;
}
