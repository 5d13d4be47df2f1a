//! Route payload types.
//!
//! `Upstream*` structs mirror the provider's directions response and are
//! deserialized straight from its JSON; `AnnotatedRoute` and friends are
//! the shapes this service returns to clients.

use crate::coord::Coordinate;
use crate::obstacle::ObstacleMatch;
use serde::{Deserialize, Serialize};

/// A human-readable quantity with its numeric value, e.g. distance or
/// duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: i64,
}

/// Encoded geometry wrapper as the provider ships it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamPolyline {
    pub points: String,
}

/// One step of an upstream route leg.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamStep {
    #[serde(default)]
    pub html_instructions: Option<String>,
    pub distance: TextValue,
    pub duration: TextValue,
    pub start_location: Coordinate,
    pub end_location: Coordinate,
    pub polyline: UpstreamPolyline,
    #[serde(default)]
    pub maneuver: Option<String>,
}

/// One leg of an upstream route. Walking routes without waypoints have
/// exactly one.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamLeg {
    pub distance: TextValue,
    pub duration: TextValue,
    #[serde(default)]
    pub start_address: Option<String>,
    #[serde(default)]
    pub end_address: Option<String>,
    pub start_location: Coordinate,
    pub end_location: Coordinate,
    pub steps: Vec<UpstreamStep>,
}

/// One upstream route alternative.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamRoute {
    #[serde(default)]
    pub summary: Option<String>,
    pub legs: Vec<UpstreamLeg>,
    pub overview_polyline: UpstreamPolyline,
}

/// One step of a returned route.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStep {
    pub instruction: String,
    pub distance: String,
    pub distance_value: i64,
    pub duration: String,
    pub duration_value: i64,
    pub start_location: Coordinate,
    pub end_location: Coordinate,
    pub polyline: String,
    pub maneuver: String,
}

impl From<UpstreamStep> for RouteStep {
    fn from(step: UpstreamStep) -> Self {
        Self {
            instruction: step.html_instructions.unwrap_or_default(),
            distance: step.distance.text,
            distance_value: step.distance.value,
            duration: step.duration.text,
            duration_value: step.duration.value,
            start_location: step.start_location,
            end_location: step.end_location,
            polyline: step.polyline.points,
            maneuver: step.maneuver.unwrap_or_default(),
        }
    }
}

/// A route alternative annotated with obstacle matches.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedRoute {
    /// Position of the route in the upstream response
    pub route_index: usize,
    pub summary: String,
    pub distance: String,
    pub distance_value: i64,
    pub duration: String,
    pub duration_value: i64,
    pub start_address: String,
    pub end_address: String,
    pub start_location: Coordinate,
    pub end_location: Coordinate,
    pub steps: Vec<RouteStep>,
    pub overview_polyline: String,
    pub obstacles: Vec<ObstacleMatch>,
    pub obstacle_count: usize,
    pub is_accessible: bool,
}

/// Ranked directions response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedDirections {
    pub recommended_route: Option<AnnotatedRoute>,
    pub alternative_routes: Vec<AnnotatedRoute>,
    pub total_routes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Trimmed-down directions payload in the provider's shape.
    const SAMPLE_ROUTE: &str = r#"{
        "summary": "Sejong-daero",
        "legs": [{
            "distance": {"text": "1.2 km", "value": 1200},
            "duration": {"text": "15 mins", "value": 900},
            "start_address": "Seoul City Hall",
            "end_address": "Gwanghwamun",
            "start_location": {"lat": 37.5663, "lng": 126.9779},
            "end_location": {"lat": 37.5759, "lng": 126.9768},
            "steps": [{
                "html_instructions": "Head <b>north</b>",
                "distance": {"text": "0.4 km", "value": 400},
                "duration": {"text": "5 mins", "value": 300},
                "start_location": {"lat": 37.5663, "lng": 126.9779},
                "end_location": {"lat": 37.5700, "lng": 126.9775},
                "polyline": {"points": "_p~iF~ps|U"},
                "maneuver": "turn-left"
            }]
        }],
        "overview_polyline": {"points": "_p~iF~ps|U_ulLnnqC"}
    }"#;

    #[test]
    fn test_upstream_route_deserializes() {
        let route: UpstreamRoute = serde_json::from_str(SAMPLE_ROUTE).unwrap();
        assert_eq!(route.summary.as_deref(), Some("Sejong-daero"));
        assert_eq!(route.legs.len(), 1);
        assert_eq!(route.legs[0].duration.value, 900);
        assert_eq!(route.legs[0].steps[0].maneuver.as_deref(), Some("turn-left"));
        assert_eq!(route.overview_polyline.points, "_p~iF~ps|U_ulLnnqC");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let route: UpstreamRoute = serde_json::from_str(
            r#"{
                "legs": [{
                    "distance": {"text": "1 m", "value": 1},
                    "duration": {"text": "1 min", "value": 60},
                    "start_location": {"lat": 0.0, "lng": 0.0},
                    "end_location": {"lat": 0.0, "lng": 0.0},
                    "steps": []
                }],
                "overview_polyline": {"points": ""}
            }"#,
        )
        .unwrap();
        assert!(route.summary.is_none());
        assert!(route.legs[0].start_address.is_none());
    }

    #[test]
    fn test_route_step_conversion() {
        let route: UpstreamRoute = serde_json::from_str(SAMPLE_ROUTE).unwrap();
        let step = RouteStep::from(route.legs[0].steps[0].clone());
        assert_eq!(step.instruction, "Head <b>north</b>");
        assert_eq!(step.distance_value, 400);
        assert_eq!(step.polyline, "_p~iF~ps|U");
    }

    #[test]
    fn test_annotated_route_wire_format() {
        let route = AnnotatedRoute {
            route_index: 0,
            summary: String::new(),
            distance: "1 km".to_string(),
            distance_value: 1000,
            duration: "12 mins".to_string(),
            duration_value: 720,
            start_address: String::new(),
            end_address: String::new(),
            start_location: Coordinate::new(0.0, 0.0),
            end_location: Coordinate::new(0.0, 0.0),
            steps: Vec::new(),
            overview_polyline: String::new(),
            obstacles: Vec::new(),
            obstacle_count: 0,
            is_accessible: true,
        };
        let json = serde_json::to_string(&route).unwrap();
        assert!(json.contains("\"obstacleCount\":0"));
        assert!(json.contains("\"isAccessible\":true"));
        assert!(json.contains("\"routeIndex\":0"));
        assert!(json.contains("\"durationValue\":720"));
    }
}
