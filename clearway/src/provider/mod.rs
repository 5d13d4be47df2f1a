//! Upstream mapping provider clients.
//!
//! HTTP access goes through the [`AsyncHttpClient`] trait so every
//! client can be exercised against mock transports in tests. The
//! concrete clients cover the provider's tile session endpoint, the
//! tile endpoint itself, walking directions, and place search.

mod directions;
mod google;
mod http;
mod places;
mod types;

pub use directions::{GoogleDirectionsClient, DIRECTIONS_API_URL};
pub use google::{GoogleMapsClient, TILE_API_BASE};
pub use http::{AsyncHttpClient, AsyncReqwestClient, HttpResponse};
pub use places::{
    GooglePlacesClient, NearbySearchQuery, PlaceDetails, PlacePrediction, PlaceSummary,
    TextSearchQuery, PLACES_API_BASE,
};
pub use types::ProviderError;

#[cfg(test)]
pub use http::tests::MockHttpClient;
