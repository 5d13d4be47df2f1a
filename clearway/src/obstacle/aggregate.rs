//! Keyed aggregation of co-located obstacle reports.
//!
//! Duplicate reports of the same obstacle land within a few metres of
//! each other. Clustering quantizes coordinates onto a grid and groups
//! reports by (cell, kind). Clusters are keyed through a `BTreeMap`, so
//! output order is defined: ascending by latitude cell, longitude cell,
//! then kind.

use super::types::Obstacle;
use serde::Serialize;
use std::collections::BTreeMap;

/// Default cell edge in degrees (~11 m of latitude).
pub const DEFAULT_CELL_DEG: f64 = 1e-4;

/// A group of co-located reports of the same kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleCluster {
    /// Mean latitude of the member reports
    pub latitude: f64,
    /// Mean longitude of the member reports
    pub longitude: f64,
    #[serde(rename = "type")]
    pub kind: String,
    /// Member report ids, in input order
    pub ids: Vec<i64>,
    pub count: usize,
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct CellKey {
    lat_cell: i64,
    lon_cell: i64,
    kind: String,
}

/// Group obstacles by quantized (latitude, longitude) cell and kind.
pub fn cluster_by_cell(obstacles: &[Obstacle], cell_deg: f64) -> Vec<ObstacleCluster> {
    let mut groups: BTreeMap<CellKey, Vec<&Obstacle>> = BTreeMap::new();

    for obstacle in obstacles {
        let key = CellKey {
            lat_cell: (obstacle.latitude / cell_deg).floor() as i64,
            lon_cell: (obstacle.longitude / cell_deg).floor() as i64,
            kind: obstacle.kind.clone(),
        };
        groups.entry(key).or_default().push(obstacle);
    }

    groups
        .into_iter()
        .map(|(key, members)| {
            let count = members.len();
            let latitude = members.iter().map(|o| o.latitude).sum::<f64>() / count as f64;
            let longitude = members.iter().map(|o| o.longitude).sum::<f64>() / count as f64;
            ObstacleCluster {
                latitude,
                longitude,
                kind: key.kind,
                ids: members.iter().map(|o| o.id).collect(),
                count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(id: i64, lat: f64, lon: f64, kind: &str) -> Obstacle {
        Obstacle {
            id,
            latitude: lat,
            longitude: lon,
            kind: kind.to_string(),
            name: format!("report-{id}"),
            description: String::new(),
        }
    }

    #[test]
    fn test_co_located_same_kind_reports_cluster() {
        let rows = vec![
            obstacle(1, 37.50001, 127.00001, "stairs"),
            obstacle(2, 37.50002, 127.00003, "stairs"),
        ];
        let clusters = cluster_by_cell(&rows, DEFAULT_CELL_DEG);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].ids, vec![1, 2]);
        assert_eq!(clusters[0].count, 2);
        assert!((clusters[0].latitude - 37.500015).abs() < 1e-9);
    }

    #[test]
    fn test_kind_splits_clusters() {
        let rows = vec![
            obstacle(1, 37.50001, 127.00001, "stairs"),
            obstacle(2, 37.50002, 127.00001, "obstacle"),
        ];
        let clusters = cluster_by_cell(&rows, DEFAULT_CELL_DEG);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn test_output_order_is_deterministic() {
        // Insertion order deliberately scrambled; output follows cell order.
        let rows = vec![
            obstacle(3, 37.60, 127.10, "obstacle"),
            obstacle(1, 37.40, 127.00, "obstacle"),
            obstacle(2, 37.50, 127.05, "obstacle"),
        ];
        let clusters = cluster_by_cell(&rows, DEFAULT_CELL_DEG);
        let ids: Vec<_> = clusters.iter().flat_map(|c| c.ids.clone()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_distant_reports_stay_apart() {
        let rows = vec![
            obstacle(1, 37.50, 127.00, "stairs"),
            obstacle(2, 37.51, 127.00, "stairs"),
        ];
        let clusters = cluster_by_cell(&rows, DEFAULT_CELL_DEG);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].count, 1);
    }
}
