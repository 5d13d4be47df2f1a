//! Tile proxy error types.

use crate::coord::CoordError;
use crate::provider::ProviderError;
use thiserror::Error;

/// Errors that can occur while serving a proxied tile.
#[derive(Debug, Clone, Error)]
pub enum TileError {
    /// Requested coordinates fall outside the tile grid
    #[error(transparent)]
    InvalidCoordinate(#[from] CoordError),

    /// The upstream session could not be created
    #[error("failed to create upstream session: {0}")]
    SessionCreation(#[source] ProviderError),

    /// The upstream tile request failed with a non-success status
    #[error("upstream tile request failed with HTTP {status}")]
    Upstream { status: u16 },

    /// The upstream tile request exceeded its bounded timeout
    #[error("upstream tile request timed out")]
    Timeout,

    /// Transport-level failure talking to the upstream
    #[error("upstream tile transport error: {0}")]
    Transport(String),
}

impl TileError {
    /// Map a fetch-path provider error onto the tile taxonomy.
    pub(crate) fn from_fetch(error: ProviderError) -> Self {
        match error {
            ProviderError::Timeout => TileError::Timeout,
            ProviderError::Status { status } => TileError::Upstream { status },
            other => TileError::Transport(other.to_string()),
        }
    }
}
