//! Obstacle data model, store interface, and route matching.
//!
//! Obstacle reports live in an external geospatial store; this crate
//! consumes them through the [`ObstacleStore`] trait. [`ObstacleMatcher`]
//! finds reports within a detection radius of a decoded route, and
//! [`aggregate`] groups co-located reports for map display.

pub mod aggregate;
mod matcher;
mod store;
mod types;

pub use matcher::ObstacleMatcher;
pub use store::{MemoryObstacleStore, ObstacleStore, StoreError};
pub use types::{NewObstacle, Obstacle, ObstacleMatch};
