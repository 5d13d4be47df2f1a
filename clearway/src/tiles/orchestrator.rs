//! Tile proxy read path.

use super::{FetchedTile, TileError, TileFetcher};
use crate::cache::{CacheStatus, TileCache, TileKey};
use crate::coord::TileCoord;
use crate::session::{SessionKey, SessionProvider, SessionTokenManager};
use bytes::Bytes;
use std::time::Duration;
use tracing::{debug, warn};

/// A tile ready to be returned to the client.
#[derive(Debug, Clone)]
pub struct TileResponse {
    pub bytes: Bytes,
    pub content_type: String,
    /// Whether the payload came from cache
    pub cache: CacheStatus,
}

/// Composes cache, session management, and upstream fetch.
///
/// The read path: validate coordinates, consult the cache, resolve a
/// session token, fetch upstream. An upstream authorization rejection
/// (401/403) triggers exactly one forced token refresh and one retried
/// fetch; any further failure surfaces as-is.
pub struct TileProxyOrchestrator<P, F> {
    sessions: SessionTokenManager<P>,
    fetcher: F,
    cache: TileCache,
    max_zoom: u8,
}

impl<P, F> TileProxyOrchestrator<P, F>
where
    P: SessionProvider + Send + Sync + 'static,
    F: TileFetcher,
{
    /// Assemble the orchestrator from its collaborators.
    pub fn new(
        sessions: SessionTokenManager<P>,
        fetcher: F,
        cache: TileCache,
        max_zoom: u8,
    ) -> Self {
        Self {
            sessions,
            fetcher,
            cache,
            max_zoom,
        }
    }

    /// Tile cache TTL, exposed for response cache directives.
    pub fn cache_ttl(&self) -> Duration {
        self.cache.ttl()
    }

    /// Serve one tile.
    ///
    /// # Errors
    ///
    /// [`TileError::InvalidCoordinate`] for out-of-grid requests,
    /// [`TileError::SessionCreation`] when no session token could be
    /// obtained, and [`TileError::Upstream`] / [`TileError::Timeout`] /
    /// [`TileError::Transport`] for upstream fetch failures.
    pub async fn fetch(
        &self,
        coord: TileCoord,
        session: &SessionKey,
    ) -> Result<TileResponse, TileError> {
        coord.validate(self.max_zoom)?;

        let key = TileKey::new(coord, session.clone());
        if let Some((bytes, content_type)) = self.cache.get(&key) {
            debug!(tile = %key, "tile served from cache");
            return Ok(TileResponse {
                bytes,
                content_type,
                cache: CacheStatus::Hit,
            });
        }

        let token = self
            .sessions
            .get(session)
            .await
            .map_err(TileError::SessionCreation)?;

        let fetched = match self.fetcher.fetch_tile(coord, &token).await {
            Ok(tile) => tile,
            Err(error) if error.is_auth_failure() => {
                warn!(tile = %key, %error, "upstream rejected session token, retrying once");
                self.retry_with_fresh_session(coord, session).await?
            }
            Err(error) => return Err(TileError::from_fetch(error)),
        };

        self.cache
            .insert(key, fetched.bytes.clone(), fetched.content_type.clone());

        Ok(TileResponse {
            bytes: fetched.bytes,
            content_type: fetched.content_type,
            cache: CacheStatus::Miss,
        })
    }

    /// Force a session refresh and retry the fetch exactly once.
    async fn retry_with_fresh_session(
        &self,
        coord: TileCoord,
        session: &SessionKey,
    ) -> Result<FetchedTile, TileError> {
        let token = self
            .sessions
            .force_refresh(session)
            .await
            .map_err(TileError::SessionCreation)?;

        self.fetcher
            .fetch_tile(coord, &token)
            .await
            .map_err(TileError::from_fetch)
    }
}
