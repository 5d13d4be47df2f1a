//! Session key normalization and entry types.

use crate::config::TileDefaults;
use crate::provider::ProviderError;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::future::Future;
use std::sync::OnceLock;

fn map_type_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(?i)(roadmap|satellite|terrain)$").unwrap())
}

fn language_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z]{2,3}(?:-[A-Za-z0-9]{2,8}){0,2}$").unwrap())
}

fn region_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z]{2}$").unwrap())
}

/// Identity of an upstream session: map type, language, and region.
///
/// Construction normalizes each component and substitutes the configured
/// default for anything malformed, so equal requests always share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    map_type: String,
    language: String,
    region: String,
}

impl SessionKey {
    /// Build a key from raw request parameters.
    ///
    /// Map type is lowercased and must be one of `roadmap`, `satellite`,
    /// `terrain`; language is a BCP-47-style tag with `_` accepted for
    /// `-`; region is a two-letter code, uppercased. Invalid or missing
    /// components fall back to `defaults`.
    pub fn normalized(
        map_type: Option<&str>,
        language: Option<&str>,
        region: Option<&str>,
        defaults: &TileDefaults,
    ) -> Self {
        let map_type = map_type
            .map(|value| value.trim().to_ascii_lowercase())
            .filter(|value| map_type_pattern().is_match(value))
            .unwrap_or_else(|| defaults.map_type.clone());

        let language = language
            .map(|value| value.trim().replace('_', "-"))
            .filter(|value| language_pattern().is_match(value))
            .unwrap_or_else(|| defaults.language.clone());

        let region = region
            .map(|value| value.trim().to_ascii_uppercase())
            .filter(|value| region_pattern().is_match(value))
            .unwrap_or_else(|| defaults.region.clone());

        Self {
            map_type,
            language,
            region,
        }
    }

    pub fn map_type(&self) -> &str {
        &self.map_type
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}|{}", self.map_type, self.language, self.region)
    }
}

/// A freshly created upstream session.
#[derive(Debug, Clone)]
pub struct SessionCredentials {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// A cached session entry.
///
/// Created or replaced only while holding the key's refresh lock.
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Upstream session creation endpoint.
pub trait SessionProvider: Send + Sync {
    /// Create a new session for the given key.
    fn create_session(
        &self,
        key: &SessionKey,
    ) -> impl Future<Output = Result<SessionCredentials, ProviderError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> TileDefaults {
        TileDefaults::default()
    }

    #[test]
    fn test_map_type_lowercased() {
        let key = SessionKey::normalized(Some("Satellite"), None, None, &defaults());
        assert_eq!(key.map_type(), "satellite");
    }

    #[test]
    fn test_invalid_map_type_falls_back() {
        let key = SessionKey::normalized(Some("hybrid"), None, None, &defaults());
        assert_eq!(key.map_type(), "roadmap");
    }

    #[test]
    fn test_language_underscore_normalized() {
        let key = SessionKey::normalized(None, Some("ko_KR"), None, &defaults());
        assert_eq!(key.language(), "ko-KR");
    }

    #[test]
    fn test_invalid_language_falls_back() {
        let key = SessionKey::normalized(None, Some("not a language"), None, &defaults());
        assert_eq!(key.language(), "en-US");
    }

    #[test]
    fn test_region_uppercased() {
        let key = SessionKey::normalized(None, None, Some("kr"), &defaults());
        assert_eq!(key.region(), "KR");
    }

    #[test]
    fn test_invalid_region_falls_back() {
        let key = SessionKey::normalized(None, None, Some("KOR"), &defaults());
        assert_eq!(key.region(), "US");
    }

    #[test]
    fn test_equal_requests_share_a_key() {
        let a = SessionKey::normalized(Some("ROADMAP"), Some("ko_KR"), Some("kr"), &defaults());
        let b = SessionKey::normalized(Some("roadmap"), Some("ko-KR"), Some("KR"), &defaults());
        assert_eq!(a, b);
    }
}
