//! Cache key and status types.

use crate::coord::TileCoord;
use crate::session::SessionKey;

/// Cache key uniquely identifying a proxied tile.
///
/// Two requests share a key only when both the grid position and the
/// full style triple (map type, language, region) agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileKey {
    /// Tile grid position
    pub coord: TileCoord,
    /// Style triple the tile was rendered with
    pub session: SessionKey,
}

impl TileKey {
    /// Create a new cache key.
    pub fn new(coord: TileCoord, session: SessionKey) -> Self {
        Self { coord, session }
    }
}

impl std::fmt::Display for TileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.coord, self.session)
    }
}

/// Whether a tile response was served from cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    /// Header value for the `X-Cache` response header.
    pub fn as_header_value(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}
