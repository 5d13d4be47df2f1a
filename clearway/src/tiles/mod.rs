//! Tile proxying.
//!
//! [`TileProxyOrchestrator`] composes the tile cache, the session token
//! manager, and the upstream fetch into the proxy's read path, including
//! the single authorization-triggered retry.

mod error;
mod orchestrator;

use crate::coord::TileCoord;
use crate::provider::ProviderError;
use bytes::Bytes;
use std::future::Future;

pub use error::TileError;
pub use orchestrator::{TileProxyOrchestrator, TileResponse};

/// A tile payload fetched from the upstream provider.
#[derive(Debug, Clone)]
pub struct FetchedTile {
    pub bytes: Bytes,
    pub content_type: String,
}

/// Upstream tile endpoint.
pub trait TileFetcher: Send + Sync {
    /// Fetch one tile using the given session token.
    ///
    /// A non-success upstream status surfaces as
    /// [`ProviderError::Status`] so callers can distinguish
    /// authorization rejections from other failures.
    fn fetch_tile(
        &self,
        coord: TileCoord,
        token: &str,
    ) -> impl Future<Output = Result<FetchedTile, ProviderError>> + Send;
}
