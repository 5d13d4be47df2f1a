//! Place search handlers.

use crate::error::ServerError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use clearway::provider::{
    NearbySearchQuery, PlaceDetails, PlacePrediction, PlaceSummary, TextSearchQuery,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

fn default_nearby_radius() -> u32 {
    1000
}

/// `POST /places/search/text` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSearchRequest {
    pub query: String,
    /// Optional `lat,lng` bias point
    pub location: Option<String>,
    pub radius: Option<u32>,
    pub language: Option<String>,
}

/// `POST /places/search/nearby` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySearchRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_nearby_radius")]
    pub radius: u32,
    pub keyword: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub language: Option<String>,
}

/// `GET /places/autocomplete` query parameters.
#[derive(Debug, Deserialize)]
pub struct AutocompleteParams {
    pub input: String,
    pub location: Option<String>,
    pub radius: Option<u32>,
    pub language: Option<String>,
}

/// `GET /places/details/{place_id}` query parameters.
#[derive(Debug, Deserialize)]
pub struct DetailsParams {
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub count: usize,
    pub results: Vec<PlaceSummary>,
}

#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub count: usize,
    pub predictions: Vec<PlacePrediction>,
}

#[derive(Debug, Serialize)]
pub struct DetailsResponse {
    pub place: PlaceDetails,
}

fn language_or_default(state: &AppState, language: Option<String>) -> String {
    language.unwrap_or_else(|| state.settings.matching.default_language.clone())
}

/// Free-text place search.
pub async fn text_search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextSearchRequest>,
) -> Result<Json<SearchResponse>, ServerError> {
    let results = state
        .places
        .text_search(&TextSearchQuery {
            query: request.query,
            location: request.location,
            radius: request.radius,
            language: language_or_default(&state, request.language),
        })
        .await?;

    Ok(Json(SearchResponse {
        count: results.len(),
        results,
    }))
}

/// Radius search around a point.
pub async fn nearby_search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NearbySearchRequest>,
) -> Result<Json<SearchResponse>, ServerError> {
    let results = state
        .places
        .nearby_search(&NearbySearchQuery {
            latitude: request.latitude,
            longitude: request.longitude,
            radius: request.radius,
            keyword: request.keyword,
            kind: request.kind,
            language: language_or_default(&state, request.language),
        })
        .await?;

    Ok(Json(SearchResponse {
        count: results.len(),
        results,
    }))
}

/// Autocomplete predictions for a partial input.
pub async fn autocomplete(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AutocompleteParams>,
) -> Result<Json<AutocompleteResponse>, ServerError> {
    let language = language_or_default(&state, params.language);
    let predictions = state
        .places
        .autocomplete(
            &params.input,
            params.location.as_deref(),
            params.radius,
            &language,
            Some("country:kr"),
        )
        .await?;

    Ok(Json(AutocompleteResponse {
        count: predictions.len(),
        predictions,
    }))
}

/// Detail lookup by place id.
pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(place_id): Path<String>,
    Query(params): Query<DetailsParams>,
) -> Result<Json<DetailsResponse>, ServerError> {
    let language = language_or_default(&state, params.language);
    let place = state
        .places
        .details(&place_id, &language)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("place {place_id} not found")))?;

    Ok(Json(DetailsResponse { place }))
}
