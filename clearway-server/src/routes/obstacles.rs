//! Obstacle report handlers.
//!
//! Thin plumbing over the [`ObstacleStore`] contract; the interesting
//! consumers of this data are the directions handlers.

use crate::error::ServerError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use clearway::coord::LatLngBounds;
use clearway::obstacle::aggregate::{cluster_by_cell, DEFAULT_CELL_DEG};
use clearway::obstacle::{NewObstacle, Obstacle, ObstacleStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// `GET /obstacles` query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundsParams {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    #[serde(default)]
    pub clustered: bool,
}

#[derive(Debug, Serialize)]
pub struct ObstacleListResponse {
    pub count: usize,
    pub obstacles: Vec<Obstacle>,
}

/// Report a new obstacle.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(report): Json<NewObstacle>,
) -> Result<impl IntoResponse, ServerError> {
    let obstacle = state.store.insert(report).await?;
    Ok((StatusCode::CREATED, Json(obstacle)))
}

/// List obstacles inside a bounding box, optionally clustered by
/// location cell and kind.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BoundsParams>,
) -> Result<axum::response::Response, ServerError> {
    let bounds = LatLngBounds::new(
        params.min_lat,
        params.max_lat,
        params.min_lon,
        params.max_lon,
    );
    let obstacles = state.store.find_by_bounds(&bounds).await?;

    if params.clustered {
        let clusters = cluster_by_cell(&obstacles, DEFAULT_CELL_DEG);
        return Ok(Json(serde_json::json!({
            "count": clusters.len(),
            "clusters": clusters,
        }))
        .into_response());
    }

    Ok(Json(ObstacleListResponse {
        count: obstacles.len(),
        obstacles,
    })
    .into_response())
}

/// Point lookup by report id.
pub async fn by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Obstacle>, ServerError> {
    let obstacle = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("obstacle {id} not found")))?;
    Ok(Json(obstacle))
}
