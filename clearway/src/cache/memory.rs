//! In-memory tile cache with TTL expiry and LRU eviction.

use super::types::TileKey;
use crate::config::TileCacheSettings;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::trace;

/// Entry in the tile cache.
#[derive(Debug, Clone)]
struct CachedTile {
    bytes: Bytes,
    content_type: String,
    /// Insertion time, for TTL expiry
    stored_at: Instant,
    /// Last read time, for LRU eviction
    last_accessed: Instant,
}

/// Bounded, TTL-aware cache of tile payloads.
///
/// Eviction is least-recently-used, keeping hot tiles resident; this
/// deliberately differs from the session cache's soonest-expiry policy.
/// Every operation runs under one exclusive critical section, so a read
/// with its expiry removal and a write with its evictions are each
/// atomic with respect to other cache operations. All sections are
/// in-memory and short.
pub struct TileCache {
    entries: Mutex<HashMap<TileKey, CachedTile>>,
    max_entries: usize,
    ttl: Duration,
}

impl TileCache {
    /// Create a cache from settings.
    pub fn new(settings: &TileCacheSettings) -> Self {
        Self::with_bounds(settings.max_entries, Duration::from_secs(settings.ttl_secs))
    }

    /// Create a cache with an explicit entry bound and TTL.
    pub fn with_bounds(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_entries,
            ttl,
        }
    }

    /// Entry lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a tile.
    ///
    /// An entry older than the TTL reports a miss and is removed. A hit
    /// refreshes the entry's recency.
    pub fn get(&self, key: &TileKey) -> Option<(Bytes, String)> {
        let mut entries = self.entries.lock().unwrap();

        let expired = match entries.get(key) {
            None => return None,
            Some(tile) => tile.stored_at.elapsed() > self.ttl,
        };
        if expired {
            trace!(tile = %key, "cached tile expired");
            entries.remove(key);
            return None;
        }

        let tile = entries.get_mut(key)?;
        tile.last_accessed = Instant::now();
        Some((tile.bytes.clone(), tile.content_type.clone()))
    }

    /// Insert or overwrite a tile, then evict least-recently-used
    /// entries until the cache is within its bound.
    pub fn insert(&self, key: TileKey, bytes: Bytes, content_type: String) {
        let mut entries = self.entries.lock().unwrap();

        // Clear any stale entry for the key first so the overwrite gets
        // fresh timestamps.
        entries.remove(&key);

        let now = Instant::now();
        entries.insert(
            key,
            CachedTile {
                bytes,
                content_type,
                stored_at: now,
                last_accessed: now,
            },
        );

        while entries.len() > self.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, tile)| tile.last_accessed)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    trace!(tile = %key, "evicting least-recently-used tile");
                    entries.remove(&key);
                }
                None => break,
            }
        }
    }

    /// Current number of cached tiles.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}
