//! Tile proxy handler.

use crate::error::ServerError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::header::{self, HeaderMap, HeaderValue};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use clearway::coord::TileCoord;
use clearway::session::SessionKey;
use serde::Deserialize;
use std::sync::Arc;

/// Tile style query parameters.
#[derive(Debug, Deserialize)]
pub struct TileQuery {
    pub lang: Option<String>,
    pub region: Option<String>,
    #[serde(rename = "mapType")]
    pub map_type: Option<String>,
}

/// `GET /tiles/{z}/{x}/{y}.png`
///
/// Serves a proxied tile with cache directives and a cache-status
/// header. Style parameters are normalized; anything malformed falls
/// back to the configured defaults.
pub async fn tile(
    State(state): State<Arc<AppState>>,
    Path((z, x, y)): Path<(u8, u32, String)>,
    Query(query): Query<TileQuery>,
) -> Result<impl IntoResponse, ServerError> {
    // The final path segment carries the image extension.
    let y: u32 = y
        .strip_suffix(".png")
        .unwrap_or(&y)
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("invalid tile y index: {y:?}")))?;

    let session = SessionKey::normalized(
        query.map_type.as_deref(),
        query.lang.as_deref(),
        query.region.as_deref(),
        &state.settings.tile_defaults,
    );

    let response = state.tiles.fetch(TileCoord::new(z, x, y), &session).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&response.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_str(&format!(
            "public, max-age={}",
            state.tiles.cache_ttl().as_secs()
        ))
        .unwrap_or_else(|_| HeaderValue::from_static("no-cache")),
    );
    insert_str(&mut headers, "x-tile-proxy", "clearway");
    insert_str(&mut headers, "x-tile-language", session.language());
    insert_str(&mut headers, "x-tile-region", session.region());
    insert_str(&mut headers, "x-cache", response.cache.as_header_value());

    Ok((StatusCode::OK, headers, response.bytes))
}

fn insert_str(headers: &mut HeaderMap, name: &'static str, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_png_suffix_stripping() {
        assert_eq!("123.png".strip_suffix(".png"), Some("123"));
        assert_eq!("123".strip_suffix(".png"), None);
    }
}
