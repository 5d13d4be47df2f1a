//! Map Tiles API client: session creation and tile fetch.
//!
//! The provider's tile endpoints require two-step authentication:
//!
//! 1. `POST /v1/createSession` with the map type, language, and region
//!    returns a short-lived session token and an RFC3339 expiry.
//! 2. Tile requests carry the session token and the API key:
//!    `/v1/2dtiles/{z}/{x}/{y}?session={SESSION}&key={KEY}`.
//!
//! Session lifetime is managed by
//! [`SessionTokenManager`](crate::session::SessionTokenManager); this
//! client only performs the HTTP calls.

use super::http::AsyncHttpClient;
use super::types::ProviderError;
use crate::coord::TileCoord;
use crate::session::{SessionCredentials, SessionKey, SessionProvider};
use crate::tiles::{FetchedTile, TileFetcher};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::debug;

/// Base URL of the tile API.
pub const TILE_API_BASE: &str = "https://tile.googleapis.com/v1";

/// Content type assumed when the upstream omits one on a tile response.
const FALLBACK_TILE_CONTENT_TYPE: &str = "image/png";

/// Client for the tile provider's session and tile endpoints.
#[derive(Clone)]
pub struct GoogleMapsClient<C> {
    http: C,
    api_key: String,
    base_url: String,
    session_fallback_ttl: Duration,
}

#[derive(Debug, Deserialize)]
struct CreateSessionResponse {
    session: Option<String>,
    expiry: Option<String>,
}

impl<C: AsyncHttpClient> GoogleMapsClient<C> {
    /// Create a client with the given API key.
    ///
    /// `session_fallback_ttl_secs` is the lifetime assumed for a session
    /// whose creation response carries no parseable expiry.
    pub fn new(http: C, api_key: impl Into<String>, session_fallback_ttl_secs: u64) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: TILE_API_BASE.to_string(),
            session_fallback_ttl: Duration::seconds(session_fallback_ttl_secs as i64),
        }
    }

    fn session_url(&self) -> String {
        format!("{}/createSession?key={}", self.base_url, self.api_key)
    }

    fn tile_url(&self, coord: TileCoord, token: &str) -> String {
        format!(
            "{}/2dtiles/{}/{}/{}?session={}&key={}",
            self.base_url, coord.z, coord.x, coord.y, token, self.api_key
        )
    }
}

/// Parse an RFC3339 expiry, tolerating the trailing-`Z` form.
fn parse_expiry(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

impl<C: AsyncHttpClient> SessionProvider for GoogleMapsClient<C> {
    async fn create_session(&self, key: &SessionKey) -> Result<SessionCredentials, ProviderError> {
        let payload = serde_json::json!({
            "mapType": key.map_type(),
            "language": key.language(),
            "region": key.region(),
        });

        let response = self
            .http
            .post_json(&self.session_url(), &payload.to_string())
            .await?
            .error_for_status()?;

        let parsed: CreateSessionResponse = serde_json::from_slice(&response.body)
            .map_err(|e| ProviderError::InvalidResponse(format!("session payload: {e}")))?;

        let token = parsed
            .session
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ProviderError::InvalidResponse("missing session token in response".to_string())
            })?;

        let expires_at = parsed
            .expiry
            .as_deref()
            .and_then(parse_expiry)
            .unwrap_or_else(|| Utc::now() + self.session_fallback_ttl);

        debug!(session_key = %key, %expires_at, "upstream session created");
        Ok(SessionCredentials { token, expires_at })
    }
}

impl<C: AsyncHttpClient> TileFetcher for GoogleMapsClient<C> {
    async fn fetch_tile(&self, coord: TileCoord, token: &str) -> Result<FetchedTile, ProviderError> {
        let response = self
            .http
            .get(&self.tile_url(coord, token))
            .await?
            .error_for_status()?;

        let content_type = response
            .content_type
            .unwrap_or_else(|| FALLBACK_TILE_CONTENT_TYPE.to_string());

        Ok(FetchedTile {
            bytes: response.body,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TileDefaults;
    use crate::provider::MockHttpClient;
    use crate::provider::HttpResponse;
    use bytes::Bytes;

    fn session_key() -> SessionKey {
        SessionKey::normalized(
            Some("satellite"),
            Some("en-US"),
            Some("US"),
            &TileDefaults::default(),
        )
    }

    #[tokio::test]
    async fn test_create_session_parses_token_and_expiry() {
        let mock = MockHttpClient::ok_json(
            r#"{"session": "abc123", "expiry": "2030-01-01T00:00:00Z", "tileWidth": 256}"#,
        );
        let client = GoogleMapsClient::new(mock, "key", 600);

        let credentials = client.create_session(&session_key()).await.unwrap();
        assert_eq!(credentials.token, "abc123");
        assert_eq!(
            credentials.expires_at,
            parse_expiry("2030-01-01T00:00:00Z").unwrap()
        );
    }

    #[tokio::test]
    async fn test_create_session_falls_back_when_expiry_missing() {
        let mock = MockHttpClient::ok_json(r#"{"session": "abc123"}"#);
        let client = GoogleMapsClient::new(mock, "key", 600);

        let before = Utc::now();
        let credentials = client.create_session(&session_key()).await.unwrap();
        let ttl = credentials.expires_at - before;
        assert!(ttl >= Duration::seconds(599) && ttl <= Duration::seconds(601));
    }

    #[tokio::test]
    async fn test_create_session_rejects_missing_token() {
        let mock = MockHttpClient::ok_json(r#"{"expiry": "2030-01-01T00:00:00Z"}"#);
        let client = GoogleMapsClient::new(mock, "key", 600);

        match client.create_session(&session_key()).await {
            Err(ProviderError::InvalidResponse(_)) => {}
            other => panic!("expected InvalidResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_session_surfaces_upstream_status() {
        let mock = MockHttpClient::replaying(Ok(HttpResponse {
            status: 400,
            content_type: None,
            body: Bytes::from_static(b"{}"),
        }));
        let client = GoogleMapsClient::new(mock, "bad-key", 600);

        assert_eq!(
            client.create_session(&session_key()).await.unwrap_err(),
            ProviderError::Status { status: 400 }
        );
    }

    #[tokio::test]
    async fn test_tile_url_construction() {
        let mock = MockHttpClient::replaying(Ok(HttpResponse {
            status: 200,
            content_type: Some("image/png".to_string()),
            body: Bytes::from_static(b"tile-bytes"),
        }));
        let client = GoogleMapsClient::new(mock, "test_key", 600);

        let tile = client
            .fetch_tile(TileCoord::new(10, 200, 100), "token123")
            .await
            .unwrap();
        assert_eq!(tile.bytes, Bytes::from_static(b"tile-bytes"));
        assert_eq!(tile.content_type, "image/png");

        let requests = client.http.requests.lock().unwrap();
        assert_eq!(
            requests[0],
            "https://tile.googleapis.com/v1/2dtiles/10/200/100?session=token123&key=test_key"
        );
    }

    #[tokio::test]
    async fn test_tile_content_type_fallback() {
        let mock = MockHttpClient::replaying(Ok(HttpResponse {
            status: 200,
            content_type: None,
            body: Bytes::from_static(b"tile"),
        }));
        let client = GoogleMapsClient::new(mock, "key", 600);

        let tile = client
            .fetch_tile(TileCoord::new(1, 0, 0), "token")
            .await
            .unwrap();
        assert_eq!(tile.content_type, "image/png");
    }

    #[tokio::test]
    async fn test_tile_auth_rejection_is_detectable() {
        let mock = MockHttpClient::replaying(Ok(HttpResponse {
            status: 403,
            content_type: None,
            body: Bytes::new(),
        }));
        let client = GoogleMapsClient::new(mock, "key", 600);

        let error = client
            .fetch_tile(TileCoord::new(1, 0, 0), "expired-token")
            .await
            .unwrap_err();
        assert!(error.is_auth_failure());
    }

    #[test]
    fn test_parse_expiry_variants() {
        assert!(parse_expiry("2030-01-01T00:00:00Z").is_some());
        assert!(parse_expiry("2030-01-01T09:00:00+09:00").is_some());
        assert!(parse_expiry("not a timestamp").is_none());
    }
}
