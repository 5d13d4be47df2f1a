//! Session token cache and refresh coordination.

use super::types::{SessionEntry, SessionKey, SessionProvider};
use crate::config::SessionSettings;
use crate::provider::ProviderError;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};

/// Caches upstream session tokens per [`SessionKey`].
///
/// `get` serves a cached token lock-free while it is comfortably inside
/// its lifetime; once a token is within the refresh grace of expiry (or
/// past it, or absent) the key's refresh lock is taken, the cache is
/// re-checked, and a single upstream creation call runs for all
/// concurrent callers of that key. Distinct keys never contend.
///
/// When the cache exceeds its bound the entries closest to expiry are
/// evicted first. This differs deliberately from the tile cache's LRU:
/// a near-expired session is about to become useless no matter how
/// recently it was read.
pub struct SessionTokenManager<P> {
    inner: Arc<ManagerInner<P>>,
}

impl<P> Clone for SessionTokenManager<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ManagerInner<P> {
    provider: P,
    entries: DashMap<SessionKey, SessionEntry>,
    /// Registry of per-key refresh locks. Mutated briefly to mint a
    /// lock; the refresh itself runs under the minted lock only.
    refresh_locks: DashMap<SessionKey, Arc<Mutex<()>>>,
    refresh_grace: Duration,
    max_entries: usize,
}

impl<P> SessionTokenManager<P>
where
    P: SessionProvider + Send + Sync + 'static,
{
    /// Create a manager over the given upstream provider.
    pub fn new(provider: P, settings: &SessionSettings) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                provider,
                entries: DashMap::new(),
                refresh_locks: DashMap::new(),
                refresh_grace: Duration::seconds(settings.refresh_grace_secs as i64),
                max_entries: settings.max_entries,
            }),
        }
    }

    /// Resolve a usable token for `key`.
    ///
    /// Never returns a token past `expires_at - refresh_grace`; a stale
    /// or missing entry is refreshed synchronously before returning.
    ///
    /// # Errors
    ///
    /// Propagates the upstream creation failure. No entry is stored for
    /// the key in that case.
    pub async fn get(&self, key: &SessionKey) -> Result<String, ProviderError> {
        if let Some(token) = self.fresh_token(key) {
            return Ok(token);
        }

        let guard = self.refresh_lock(key).lock_owned().await;

        // Double-check: another caller may have refreshed while we
        // waited for the lock.
        if let Some(token) = self.fresh_token(key) {
            return Ok(token);
        }

        debug!(session_key = %key, "refreshing stale session token");
        self.refresh(key.clone(), guard).await
    }

    /// Unconditionally create and store a new token for `key`.
    ///
    /// Used after the upstream rejects a previously valid-looking token.
    pub async fn force_refresh(&self, key: &SessionKey) -> Result<String, ProviderError> {
        let guard = self.refresh_lock(key).lock_owned().await;
        warn!(session_key = %key, "forcing session token refresh");
        self.refresh(key.clone(), guard).await
    }

    /// Number of cached session entries.
    pub fn cached_sessions(&self) -> usize {
        self.inner.entries.len()
    }

    /// Return the cached token if it is still comfortably fresh.
    fn fresh_token(&self, key: &SessionKey) -> Option<String> {
        let entry = self.inner.entries.get(key)?;
        let deadline = entry.expires_at - self.inner.refresh_grace;
        (Utc::now() < deadline).then(|| entry.token.clone())
    }

    /// Fetch or mint the refresh lock for `key`.
    fn refresh_lock(&self, key: &SessionKey) -> Arc<Mutex<()>> {
        self.inner
            .refresh_locks
            .entry(key.clone())
            .or_default()
            .clone()
    }

    /// Create a session upstream and store it, holding `guard` until the
    /// new entry is in place.
    ///
    /// The work runs on its own task: callers waiting on the same lock
    /// rely on the stored result, so a caller whose request is cancelled
    /// must not abort the creation mid-flight.
    async fn refresh(
        &self,
        key: SessionKey,
        guard: OwnedMutexGuard<()>,
    ) -> Result<String, ProviderError> {
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let _guard = guard;
            let credentials = inner.provider.create_session(&key).await?;
            inner.entries.insert(
                key,
                SessionEntry {
                    token: credentials.token.clone(),
                    expires_at: credentials.expires_at,
                },
            );
            inner.trim();
            Ok(credentials.token)
        });

        match task.await {
            Ok(result) => result,
            Err(join_error) => Err(ProviderError::Internal(format!(
                "session refresh task failed: {join_error}"
            ))),
        }
    }
}

impl<P> ManagerInner<P> {
    /// Evict soonest-to-expire entries until within the bound.
    fn trim(&self) {
        let excess = self.entries.len().saturating_sub(self.max_entries);
        if excess == 0 {
            return;
        }

        let mut by_expiry: Vec<(SessionKey, DateTime<Utc>)> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().expires_at))
            .collect();
        by_expiry.sort_by_key(|(_, expires_at)| *expires_at);

        for (key, _) in by_expiry.into_iter().take(excess) {
            self.entries.remove(&key);
        }
    }
}
