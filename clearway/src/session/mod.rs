//! Upstream session credential management.
//!
//! The tile provider requires a short-lived session token per
//! (map type, language, region) combination. [`SessionTokenManager`]
//! caches tokens, refreshes them before expiry, and collapses concurrent
//! refreshes for a key into a single upstream call.

mod manager;
mod types;

pub use manager::SessionTokenManager;
pub use types::{SessionCredentials, SessionEntry, SessionKey, SessionProvider};
