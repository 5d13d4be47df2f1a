//! HTTP route handlers and router configuration.

mod directions;
mod obstacles;
mod places;
mod tiles;

use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health))
        // Tile proxy; the /maps prefix is kept for older clients
        .route("/tiles/:z/:x/:y", get(tiles::tile))
        .route("/maps/tiles/:z/:x/:y", get(tiles::tile))
        // Walking directions
        .route("/directions/walking", post(directions::walking))
        .route(
            "/directions/walking/place",
            post(directions::walking_to_place),
        )
        // Place search
        .route("/places/search/text", post(places::text_search))
        .route("/places/search/nearby", post(places::nearby_search))
        .route("/places/autocomplete", get(places::autocomplete))
        .route("/places/details/:place_id", get(places::details))
        // Obstacle reports
        .route(
            "/obstacles",
            get(obstacles::list).post(obstacles::create),
        )
        .route("/obstacles/:id", get(obstacles::by_id))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
