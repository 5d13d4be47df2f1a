//! Walking directions handlers.

use crate::error::ServerError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use clearway::coord::Coordinate;
use clearway::route::{Destination, RankedDirections};
use serde::Deserialize;
use std::sync::Arc;

fn default_avoid_obstacles() -> bool {
    true
}

/// `POST /directions/walking` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkingRequest {
    pub origin_lat: f64,
    pub origin_lon: f64,
    pub dest_lat: f64,
    pub dest_lon: f64,
    #[serde(default = "default_avoid_obstacles")]
    pub avoid_obstacles: bool,
    pub language: Option<String>,
}

/// `POST /directions/walking/place` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkingToPlaceRequest {
    pub origin_lat: f64,
    pub origin_lon: f64,
    pub destination_place_id: String,
    #[serde(default = "default_avoid_obstacles")]
    pub avoid_obstacles: bool,
    pub language: Option<String>,
}

/// Walking directions between two coordinates, annotated and ranked by
/// obstacle accessibility.
pub async fn walking(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WalkingRequest>,
) -> Result<Json<RankedDirections>, ServerError> {
    let language = request
        .language
        .unwrap_or_else(|| state.settings.matching.default_language.clone());

    let ranked = state
        .directions
        .walking(
            Coordinate::new(request.origin_lat, request.origin_lon),
            Destination::Point(Coordinate::new(request.dest_lat, request.dest_lon)),
            request.avoid_obstacles,
            &language,
        )
        .await?;

    Ok(Json(ranked))
}

/// Walking directions to an upstream place id.
pub async fn walking_to_place(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WalkingToPlaceRequest>,
) -> Result<Json<RankedDirections>, ServerError> {
    let language = request
        .language
        .unwrap_or_else(|| state.settings.matching.default_language.clone());

    let ranked = state
        .directions
        .walking(
            Coordinate::new(request.origin_lat, request.origin_lon),
            Destination::PlaceId(request.destination_place_id),
            request.avoid_obstacles,
            &language,
        )
        .await?;

    Ok(Json(ranked))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request: WalkingRequest = serde_json::from_str(
            r#"{
                "originLat": 37.5663,
                "originLon": 126.9779,
                "destLat": 37.5759,
                "destLon": 126.9768
            }"#,
        )
        .unwrap();
        assert!(request.avoid_obstacles, "avoidance defaults on");
        assert!(request.language.is_none());
    }

    #[test]
    fn test_avoidance_can_be_disabled() {
        let request: WalkingRequest = serde_json::from_str(
            r#"{
                "originLat": 0.0,
                "originLon": 0.0,
                "destLat": 1.0,
                "destLon": 1.0,
                "avoidObstacles": false,
                "language": "en"
            }"#,
        )
        .unwrap();
        assert!(!request.avoid_obstacles);
        assert_eq!(request.language.as_deref(), Some("en"));
    }
}
