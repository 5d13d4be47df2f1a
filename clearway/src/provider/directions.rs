//! Walking directions client.

use super::http::AsyncHttpClient;
use super::types::ProviderError;
use crate::coord::Coordinate;
use crate::route::{Destination, DirectionsProvider, UpstreamRoute};
use serde::Deserialize;
use tracing::{debug, warn};

/// Directions API endpoint.
pub const DIRECTIONS_API_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Client for the provider's directions endpoint.
#[derive(Clone)]
pub struct GoogleDirectionsClient<C> {
    http: C,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct DirectionsPayload {
    status: String,
    #[serde(default)]
    routes: Vec<UpstreamRoute>,
    #[serde(default)]
    error_message: Option<String>,
}

impl<C: AsyncHttpClient> GoogleDirectionsClient<C> {
    /// Create a client with the given API key.
    pub fn new(http: C, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
        }
    }

    fn build_url(
        &self,
        origin: Coordinate,
        destination: &Destination,
        language: &str,
        alternatives: bool,
    ) -> Result<String, ProviderError> {
        let origin = format!("{},{}", origin.latitude, origin.longitude);
        let destination = match destination {
            Destination::Point(point) => format!("{},{}", point.latitude, point.longitude),
            Destination::PlaceId(place_id) => format!("place_id:{place_id}"),
        };

        let mut params = vec![
            ("origin", origin),
            ("destination", destination),
            ("mode", "walking".to_string()),
            ("language", language.to_string()),
            ("key", self.api_key.clone()),
        ];
        if alternatives {
            params.push(("alternatives", "true".to_string()));
        }

        reqwest::Url::parse_with_params(DIRECTIONS_API_URL, &params)
            .map(|url| url.to_string())
            .map_err(|e| ProviderError::Internal(format!("directions URL: {e}")))
    }
}

impl<C: AsyncHttpClient> DirectionsProvider for GoogleDirectionsClient<C> {
    async fn walking_routes(
        &self,
        origin: Coordinate,
        destination: &Destination,
        language: &str,
        alternatives: bool,
    ) -> Result<Vec<UpstreamRoute>, ProviderError> {
        let url = self.build_url(origin, destination, language, alternatives)?;
        let response = self.http.get(&url).await?.error_for_status()?;

        let payload: DirectionsPayload = serde_json::from_slice(&response.body)
            .map_err(|e| ProviderError::InvalidResponse(format!("directions payload: {e}")))?;

        match payload.status.as_str() {
            "OK" => {
                debug!(routes = payload.routes.len(), "directions resolved");
                Ok(payload.routes)
            }
            "ZERO_RESULTS" => Err(ProviderError::NoRoute),
            status => {
                if let Some(message) = payload.error_message {
                    warn!(status, message, "directions request rejected");
                }
                Err(ProviderError::Api {
                    status: status.to_string(),
                })
            }
        }
    }
}
