//! Server error types with HTTP status code mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use clearway::obstacle::StoreError;
use clearway::provider::ProviderError;
use clearway::route::DirectionsError;
use clearway::tiles::TileError;
use thiserror::Error;

/// Server error wrapping the library taxonomies with HTTP mapping.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Tile proxy failure
    #[error(transparent)]
    Tile(#[from] TileError),

    /// Directions failure
    #[error(transparent)]
    Directions(#[from] DirectionsError),

    /// Place search failure
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Obstacle store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Malformed request
    #[error("{0}")]
    BadRequest(String),

    /// Missing resource
    #[error("{0}")]
    NotFound(String),
}

/// Map application-level provider statuses onto HTTP statuses.
fn api_status(status: &str) -> StatusCode {
    match status {
        "REQUEST_DENIED" => StatusCode::FORBIDDEN,
        "OVER_QUERY_LIMIT" => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::BAD_REQUEST,
    }
}

fn provider_status(error: &ProviderError) -> StatusCode {
    match error {
        ProviderError::NoRoute => StatusCode::NOT_FOUND,
        ProviderError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ProviderError::Api { status } => api_status(status),
        ProviderError::Http(_)
        | ProviderError::Status { .. }
        | ProviderError::InvalidResponse(_)
        | ProviderError::Internal(_) => StatusCode::BAD_GATEWAY,
    }
}

impl ServerError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Tile(TileError::InvalidCoordinate(_)) => StatusCode::BAD_REQUEST,
            ServerError::Tile(TileError::SessionCreation(_)) => StatusCode::BAD_GATEWAY,
            // Preserve the upstream tile status for the client.
            ServerError::Tile(TileError::Upstream { status }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ServerError::Tile(TileError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            ServerError::Tile(TileError::Transport(_)) => StatusCode::BAD_GATEWAY,
            ServerError::Directions(DirectionsError::Provider(error))
            | ServerError::Provider(error) => provider_status(error),
            ServerError::Directions(DirectionsError::Store(_)) | ServerError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearway::coord::CoordError;

    #[test]
    fn test_invalid_coordinate_is_client_error() {
        let error = ServerError::Tile(TileError::InvalidCoordinate(CoordError::InvalidZoom {
            z: 23,
            max_zoom: 22,
        }));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_tile_status_is_preserved() {
        let error = ServerError::Tile(TileError::Upstream { status: 404 });
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);

        let error = ServerError::Tile(TileError::Upstream { status: 429 });
        assert_eq!(error.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_session_creation_failure_is_bad_gateway() {
        let error = ServerError::Tile(TileError::SessionCreation(ProviderError::Status {
            status: 500,
        }));
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_timeout_is_gateway_timeout() {
        assert_eq!(
            ServerError::Tile(TileError::Timeout).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            ServerError::Provider(ProviderError::Timeout).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_no_route_is_not_found() {
        let error = ServerError::Directions(DirectionsError::Provider(ProviderError::NoRoute));
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_api_statuses_map_like_the_upstream_contract() {
        let denied = ServerError::Provider(ProviderError::Api {
            status: "REQUEST_DENIED".to_string(),
        });
        assert_eq!(denied.status_code(), StatusCode::FORBIDDEN);

        let quota = ServerError::Provider(ProviderError::Api {
            status: "OVER_QUERY_LIMIT".to_string(),
        });
        assert_eq!(quota.status_code(), StatusCode::TOO_MANY_REQUESTS);

        let invalid = ServerError::Provider(ProviderError::Api {
            status: "INVALID_REQUEST".to_string(),
        });
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
    }
}
