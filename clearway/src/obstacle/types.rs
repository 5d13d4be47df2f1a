//! Obstacle report types.

use serde::{Deserialize, Serialize};

/// Default kind assigned to a report that does not specify one.
pub const DEFAULT_OBSTACLE_KIND: &str = "obstacle";

/// A user-reported accessibility obstacle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    /// Report category, e.g. `obstacle`, `stairs`, `elevator`
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub description: String,
}

/// A new obstacle report, before the store assigns an id.
#[derive(Debug, Clone, Deserialize)]
pub struct NewObstacle {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    DEFAULT_OBSTACLE_KIND.to_string()
}

/// An obstacle matched against a route.
///
/// `distance_meters` is the distance to the first route segment found
/// within the detection radius, scanning segments in path order; it is
/// not necessarily the minimum distance to the route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleMatch {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub description: String,
    pub distance_meters: f64,
}

impl ObstacleMatch {
    /// Build a match record from a store row and a measured distance.
    pub fn from_obstacle(obstacle: Obstacle, distance_meters: f64) -> Self {
        Self {
            id: obstacle.id,
            latitude: obstacle.latitude,
            longitude: obstacle.longitude,
            kind: obstacle.kind,
            name: obstacle.name,
            description: obstacle.description,
            distance_meters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_obstacle_default_kind() {
        let parsed: NewObstacle = serde_json::from_str(
            r#"{"name": "Broken curb", "latitude": 37.5, "longitude": 127.0, "description": "curb cut missing"}"#,
        )
        .unwrap();
        assert_eq!(parsed.kind, "obstacle");
    }

    #[test]
    fn test_obstacle_kind_serializes_as_type() {
        let obstacle = Obstacle {
            id: 7,
            latitude: 37.5,
            longitude: 127.0,
            kind: "stairs".to_string(),
            name: "Station stairs".to_string(),
            description: "no ramp".to_string(),
        };
        let json = serde_json::to_string(&obstacle).unwrap();
        assert!(json.contains("\"type\":\"stairs\""));
        assert!(!json.contains("kind"));
    }

    #[test]
    fn test_match_wire_format() {
        let matched = ObstacleMatch {
            id: 1,
            latitude: 37.5,
            longitude: 127.0,
            kind: "obstacle".to_string(),
            name: "Pothole".to_string(),
            description: "deep pothole".to_string(),
            distance_meters: 9.5,
        };
        let json = serde_json::to_string(&matched).unwrap();
        assert!(json.contains("\"distanceMeters\":9.5"));
        assert!(json.contains("\"type\":\"obstacle\""));
    }
}
