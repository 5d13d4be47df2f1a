//! Place search client.
//!
//! Wraps the provider's place endpoints: text search, nearby search,
//! autocomplete, and place details. Responses are flattened into the
//! shapes this service returns to clients.

use super::http::AsyncHttpClient;
use super::types::ProviderError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Base URL of the place API.
pub const PLACES_API_BASE: &str = "https://maps.googleapis.com/maps/api/place";

/// Client for the provider's place endpoints.
#[derive(Clone)]
pub struct GooglePlacesClient<C> {
    http: C,
    api_key: String,
}

/// Text search parameters.
#[derive(Debug, Clone)]
pub struct TextSearchQuery {
    pub query: String,
    /// Optional `lat,lng` bias point
    pub location: Option<String>,
    /// Optional bias radius in metres
    pub radius: Option<u32>,
    pub language: String,
}

/// Nearby search parameters.
#[derive(Debug, Clone)]
pub struct NearbySearchQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: u32,
    pub keyword: Option<String>,
    pub kind: Option<String>,
    pub language: String,
}

/// A place returned by a search.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSummary {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub types: Vec<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    pub open_now: Option<bool>,
}

/// An autocomplete prediction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacePrediction {
    pub place_id: Option<String>,
    pub description: Option<String>,
    pub main_text: Option<String>,
    pub secondary_text: Option<String>,
    pub types: Vec<String>,
}

/// Detailed place record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub types: Vec<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    pub opening_hours: Option<Vec<String>>,
    pub open_now: Option<bool>,
    pub website: Option<String>,
    pub maps_url: Option<String>,
}

// ---------------------------------------------------------------------
// Raw upstream shapes
// ---------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawLocation {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Default, Deserialize)]
struct RawGeometry {
    location: Option<RawLocation>,
}

#[derive(Debug, Default, Deserialize)]
struct RawOpeningHours {
    open_now: Option<bool>,
    weekday_text: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    place_id: Option<String>,
    name: Option<String>,
    formatted_address: Option<String>,
    vicinity: Option<String>,
    #[serde(default)]
    geometry: RawGeometry,
    #[serde(default)]
    types: Vec<String>,
    rating: Option<f64>,
    user_ratings_total: Option<u64>,
    #[serde(default)]
    opening_hours: RawOpeningHours,
    formatted_phone_number: Option<String>,
    website: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStructuredFormatting {
    main_text: Option<String>,
    secondary_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    place_id: Option<String>,
    description: Option<String>,
    #[serde(default)]
    structured_formatting: RawStructuredFormatting,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawSearchPayload {
    status: String,
    #[serde(default)]
    results: Vec<RawPlace>,
    #[serde(default)]
    predictions: Vec<RawPrediction>,
    result: Option<RawPlace>,
    error_message: Option<String>,
}

impl RawPlace {
    fn into_summary(self) -> PlaceSummary {
        let (latitude, longitude) = match self.geometry.location {
            Some(location) => (Some(location.lat), Some(location.lng)),
            None => (None, None),
        };
        PlaceSummary {
            place_id: self.place_id,
            name: self.name,
            address: self.formatted_address.or(self.vicinity),
            latitude,
            longitude,
            types: self.types,
            rating: self.rating,
            user_ratings_total: self.user_ratings_total,
            open_now: self.opening_hours.open_now,
        }
    }

    fn into_details(self) -> PlaceDetails {
        let (latitude, longitude) = match self.geometry.location {
            Some(location) => (Some(location.lat), Some(location.lng)),
            None => (None, None),
        };
        PlaceDetails {
            place_id: self.place_id,
            name: self.name,
            address: self.formatted_address,
            phone: self.formatted_phone_number,
            latitude,
            longitude,
            types: self.types,
            rating: self.rating,
            user_ratings_total: self.user_ratings_total,
            opening_hours: self.opening_hours.weekday_text,
            open_now: self.opening_hours.open_now,
            website: self.website,
            maps_url: self.url,
        }
    }
}

/// Body-level statuses that must fail the request. Anything else
/// (including `ZERO_RESULTS`) returns its possibly-empty result set.
fn check_status(status: &str, error_message: Option<String>) -> Result<(), ProviderError> {
    match status {
        "REQUEST_DENIED" | "OVER_QUERY_LIMIT" | "INVALID_REQUEST" => {
            if let Some(message) = error_message {
                warn!(status, message, "place request rejected");
            }
            Err(ProviderError::Api {
                status: status.to_string(),
            })
        }
        _ => Ok(()),
    }
}

impl<C: AsyncHttpClient> GooglePlacesClient<C> {
    /// Create a client with the given API key.
    pub fn new(http: C, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
        }
    }

    async fn request(
        &self,
        endpoint: &str,
        params: Vec<(&str, String)>,
    ) -> Result<RawSearchPayload, ProviderError> {
        let mut params = params;
        params.push(("key", self.api_key.clone()));

        let url = reqwest::Url::parse_with_params(
            &format!("{PLACES_API_BASE}/{endpoint}/json"),
            &params,
        )
        .map_err(|e| ProviderError::Internal(format!("place URL: {e}")))?;

        let response = self.http.get(url.as_str()).await?.error_for_status()?;
        let payload: RawSearchPayload = serde_json::from_slice(&response.body)
            .map_err(|e| ProviderError::InvalidResponse(format!("place payload: {e}")))?;

        check_status(&payload.status, payload.error_message.clone())?;
        Ok(payload)
    }

    /// Free-text place search.
    pub async fn text_search(
        &self,
        query: &TextSearchQuery,
    ) -> Result<Vec<PlaceSummary>, ProviderError> {
        let mut params = vec![
            ("query", query.query.clone()),
            ("language", query.language.clone()),
        ];
        if let Some(location) = &query.location {
            params.push(("location", location.clone()));
        }
        if let Some(radius) = query.radius {
            params.push(("radius", radius.to_string()));
        }

        let payload = self.request("textsearch", params).await?;
        Ok(payload
            .results
            .into_iter()
            .map(RawPlace::into_summary)
            .collect())
    }

    /// Radius search around a point.
    pub async fn nearby_search(
        &self,
        query: &NearbySearchQuery,
    ) -> Result<Vec<PlaceSummary>, ProviderError> {
        let mut params = vec![
            ("location", format!("{},{}", query.latitude, query.longitude)),
            ("radius", query.radius.to_string()),
            ("language", query.language.clone()),
        ];
        if let Some(keyword) = &query.keyword {
            params.push(("keyword", keyword.clone()));
        }
        if let Some(kind) = &query.kind {
            params.push(("type", kind.clone()));
        }

        let payload = self.request("nearbysearch", params).await?;
        Ok(payload
            .results
            .into_iter()
            .map(RawPlace::into_summary)
            .collect())
    }

    /// Autocomplete predictions for a partial input.
    pub async fn autocomplete(
        &self,
        input: &str,
        location: Option<&str>,
        radius: Option<u32>,
        language: &str,
        components: Option<&str>,
    ) -> Result<Vec<PlacePrediction>, ProviderError> {
        let mut params = vec![
            ("input", input.to_string()),
            ("language", language.to_string()),
        ];
        if let Some(components) = components {
            params.push(("components", components.to_string()));
        }
        if let Some(location) = location {
            params.push(("location", location.to_string()));
        }
        if let Some(radius) = radius {
            params.push(("radius", radius.to_string()));
        }

        let payload = self.request("autocomplete", params).await?;
        Ok(payload
            .predictions
            .into_iter()
            .map(|prediction| PlacePrediction {
                place_id: prediction.place_id,
                description: prediction.description,
                main_text: prediction.structured_formatting.main_text,
                secondary_text: prediction.structured_formatting.secondary_text,
                types: prediction.types,
            })
            .collect())
    }

    /// Detail lookup by place id.
    pub async fn details(
        &self,
        place_id: &str,
        language: &str,
    ) -> Result<Option<PlaceDetails>, ProviderError> {
        let params = vec![
            ("place_id", place_id.to_string()),
            ("language", language.to_string()),
            (
                "fields",
                "place_id,name,formatted_address,formatted_phone_number,geometry,types,rating,\
                 user_ratings_total,opening_hours,website,url"
                    .to_string(),
            ),
        ];

        let payload = self.request("details", params).await?;
        Ok(payload.result.map(RawPlace::into_details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockHttpClient;

    const TEXT_SEARCH_BODY: &str = r#"{
        "status": "OK",
        "results": [{
            "place_id": "p1",
            "name": "Seoul Station",
            "formatted_address": "405 Hangang-daero",
            "geometry": {"location": {"lat": 37.5547, "lng": 126.9707}},
            "types": ["train_station"],
            "rating": 4.2,
            "user_ratings_total": 1200,
            "opening_hours": {"open_now": true}
        }]
    }"#;

    #[tokio::test]
    async fn test_text_search_flattens_results() {
        let client = GooglePlacesClient::new(MockHttpClient::ok_json(TEXT_SEARCH_BODY), "k");
        let results = client
            .text_search(&TextSearchQuery {
                query: "Seoul Station".to_string(),
                location: None,
                radius: None,
                language: "ko".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].place_id.as_deref(), Some("p1"));
        assert_eq!(results[0].latitude, Some(37.5547));
        assert_eq!(results[0].open_now, Some(true));
    }

    #[tokio::test]
    async fn test_nearby_search_uses_vicinity_address() {
        let body = r#"{
            "status": "OK",
            "results": [{"place_id": "p2", "name": "Cafe", "vicinity": "12 Mapo-daero"}]
        }"#;
        let client = GooglePlacesClient::new(MockHttpClient::ok_json(body), "k");
        let results = client
            .nearby_search(&NearbySearchQuery {
                latitude: 37.55,
                longitude: 126.97,
                radius: 1000,
                keyword: None,
                kind: None,
                language: "ko".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(results[0].address.as_deref(), Some("12 Mapo-daero"));
    }

    #[tokio::test]
    async fn test_denied_status_fails() {
        let body = r#"{"status": "REQUEST_DENIED", "error_message": "bad key"}"#;
        let client = GooglePlacesClient::new(MockHttpClient::ok_json(body), "k");
        let error = client
            .details("p1", "ko")
            .await
            .unwrap_err();
        assert_eq!(
            error,
            ProviderError::Api {
                status: "REQUEST_DENIED".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_zero_results_is_empty_not_error() {
        let body = r#"{"status": "ZERO_RESULTS", "results": []}"#;
        let client = GooglePlacesClient::new(MockHttpClient::ok_json(body), "k");
        let results = client
            .text_search(&TextSearchQuery {
                query: "nowhere".to_string(),
                location: None,
                radius: None,
                language: "ko".to_string(),
            })
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_autocomplete_predictions() {
        let body = r#"{
            "status": "OK",
            "predictions": [{
                "place_id": "p3",
                "description": "Seoul Station, Hangang-daero",
                "structured_formatting": {"main_text": "Seoul Station", "secondary_text": "Hangang-daero"},
                "types": ["establishment"]
            }]
        }"#;
        let client = GooglePlacesClient::new(MockHttpClient::ok_json(body), "k");
        let predictions = client
            .autocomplete("Seoul", None, None, "ko", Some("country:kr"))
            .await
            .unwrap();
        assert_eq!(predictions[0].main_text.as_deref(), Some("Seoul Station"));

        let requests = client.http.requests.lock().unwrap();
        assert!(requests[0].contains("components=country%3Akr"));
    }
}
