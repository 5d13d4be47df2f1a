//! Obstacle store interface.
//!
//! The store is an external collaborator; this module defines the
//! contract the matching engine consumes plus an in-memory
//! implementation used for wiring and tests.

use super::types::{NewObstacle, Obstacle};
use crate::coord::LatLngBounds;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors surfaced by an obstacle store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backing store could not be reached or answered abnormally
    #[error("obstacle store unavailable: {0}")]
    Unavailable(String),
}

/// Contract for the geospatial obstacle store.
pub trait ObstacleStore: Send + Sync {
    /// All obstacles whose coordinates fall inside `bounds` (inclusive).
    fn find_by_bounds(
        &self,
        bounds: &LatLngBounds,
    ) -> impl Future<Output = Result<Vec<Obstacle>, StoreError>> + Send;

    /// Point lookup by report id.
    fn find_by_id(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<Obstacle>, StoreError>> + Send;

    /// Persist a new report, assigning it an id.
    fn insert(
        &self,
        report: NewObstacle,
    ) -> impl Future<Output = Result<Obstacle, StoreError>> + Send;
}

impl<S: ObstacleStore> ObstacleStore for Arc<S> {
    fn find_by_bounds(
        &self,
        bounds: &LatLngBounds,
    ) -> impl Future<Output = Result<Vec<Obstacle>, StoreError>> + Send {
        (**self).find_by_bounds(bounds)
    }

    fn find_by_id(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<Obstacle>, StoreError>> + Send {
        (**self).find_by_id(id)
    }

    fn insert(
        &self,
        report: NewObstacle,
    ) -> impl Future<Output = Result<Obstacle, StoreError>> + Send {
        (**self).insert(report)
    }
}

/// In-memory obstacle store.
#[derive(Debug, Default)]
pub struct MemoryObstacleStore {
    inner: RwLock<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    next_id: i64,
    rows: Vec<Obstacle>,
}

impl MemoryObstacleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reports.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    /// Whether the store holds no reports.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.rows.is_empty()
    }
}

impl ObstacleStore for MemoryObstacleStore {
    async fn find_by_bounds(&self, bounds: &LatLngBounds) -> Result<Vec<Obstacle>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .iter()
            .filter(|row| {
                bounds.contains(&crate::coord::Coordinate::new(row.latitude, row.longitude))
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Obstacle>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn insert(&self, report: NewObstacle) -> Result<Obstacle, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let obstacle = Obstacle {
            id: inner.next_id,
            latitude: report.latitude,
            longitude: report.longitude,
            kind: report.kind,
            name: report.name,
            description: report.description,
        };
        inner.rows.push(obstacle.clone());
        Ok(obstacle)
    }
}
