//! Settings structs, defaults, and environment overrides.

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Default maximum tile zoom level accepted by the proxy.
pub const DEFAULT_MAX_ZOOM: u8 = 22;
/// Default upstream tile/session request timeout in seconds.
pub const DEFAULT_TILE_TIMEOUT_SECS: u64 = 12;
/// Default upstream directions request timeout in seconds.
pub const DEFAULT_DIRECTIONS_TIMEOUT_SECS: u64 = 15;
/// Default upstream place search request timeout in seconds.
pub const DEFAULT_PLACES_TIMEOUT_SECS: u64 = 10;
/// Default session lifetime assumed when the upstream omits an expiry.
pub const DEFAULT_SESSION_FALLBACK_TTL_SECS: u64 = 600;
/// Default safety margin subtracted from a session's expiry.
pub const DEFAULT_SESSION_REFRESH_GRACE_SECS: u64 = 60;
/// Default bound on cached session entries.
pub const DEFAULT_MAX_SESSION_CACHE_SIZE: usize = 128;
/// Default bound on cached tile entries.
pub const DEFAULT_TILE_CACHE_SIZE: usize = 1000;
/// Default tile cache entry lifetime in seconds.
pub const DEFAULT_TILE_CACHE_TTL_SECS: u64 = 3600;
/// Default obstacle detection radius around a route, in metres.
pub const DEFAULT_OBSTACLE_RADIUS_M: f64 = 15.0;
/// Default margin added to a route's bounding box before the store
/// query, in degrees (~200 m).
pub const DEFAULT_BBOX_MARGIN_DEG: f64 = 0.002;

/// Configuration errors raised at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The upstream API key environment variable is missing or empty
    #[error("GOOGLE_MAPS_API_KEY is not configured")]
    MissingApiKey,

    /// An environment override could not be parsed
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Default tile style parameters applied when a request omits them.
#[derive(Debug, Clone)]
pub struct TileDefaults {
    /// Map type: `roadmap`, `satellite`, or `terrain`
    pub map_type: String,
    /// BCP-47 language tag
    pub language: String,
    /// Two-letter region code
    pub region: String,
}

impl Default for TileDefaults {
    fn default() -> Self {
        Self {
            map_type: "roadmap".to_string(),
            language: "en-US".to_string(),
            region: "US".to_string(),
        }
    }
}

/// Session token manager settings.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Lifetime assumed when the upstream response omits an expiry
    pub fallback_ttl_secs: u64,
    /// Margin before expiry at which a token is treated as stale
    pub refresh_grace_secs: u64,
    /// Bound on the number of cached session entries
    pub max_entries: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            fallback_ttl_secs: DEFAULT_SESSION_FALLBACK_TTL_SECS,
            refresh_grace_secs: DEFAULT_SESSION_REFRESH_GRACE_SECS,
            max_entries: DEFAULT_MAX_SESSION_CACHE_SIZE,
        }
    }
}

/// Tile byte cache settings.
#[derive(Debug, Clone)]
pub struct TileCacheSettings {
    /// Bound on the number of cached tiles
    pub max_entries: usize,
    /// Entry lifetime in seconds
    pub ttl_secs: u64,
}

impl Default for TileCacheSettings {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_TILE_CACHE_SIZE,
            ttl_secs: DEFAULT_TILE_CACHE_TTL_SECS,
        }
    }
}

/// Upstream HTTP client timeouts.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Tile and session request timeout in seconds
    pub tile_timeout_secs: u64,
    /// Directions request timeout in seconds
    pub directions_timeout_secs: u64,
    /// Place search request timeout in seconds
    pub places_timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            tile_timeout_secs: DEFAULT_TILE_TIMEOUT_SECS,
            directions_timeout_secs: DEFAULT_DIRECTIONS_TIMEOUT_SECS,
            places_timeout_secs: DEFAULT_PLACES_TIMEOUT_SECS,
        }
    }
}

/// Route obstacle matching settings.
#[derive(Debug, Clone)]
pub struct MatchingSettings {
    /// Detection radius around the route in metres
    pub obstacle_radius_m: f64,
    /// Bounding box margin in degrees for the store query
    pub bbox_margin_deg: f64,
    /// Default directions language when a request omits one
    pub default_language: String,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            obstacle_radius_m: DEFAULT_OBSTACLE_RADIUS_M,
            bbox_margin_deg: DEFAULT_BBOX_MARGIN_DEG,
            default_language: "ko".to_string(),
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Upstream mapping provider API key
    pub api_key: String,
    /// Maximum tile zoom level accepted by the proxy
    pub max_zoom: u8,
    pub tile_defaults: TileDefaults,
    pub session: SessionSettings,
    pub tile_cache: TileCacheSettings,
    pub http: HttpSettings,
    pub matching: MatchingSettings,
}

impl Settings {
    /// Create settings with the given API key and all defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            max_zoom: DEFAULT_MAX_ZOOM,
            tile_defaults: TileDefaults::default(),
            session: SessionSettings::default(),
            tile_cache: TileCacheSettings::default(),
            http: HttpSettings::default(),
            matching: MatchingSettings::default(),
        }
    }

    /// Build settings from the process environment.
    ///
    /// `GOOGLE_MAPS_API_KEY` is required; every other variable falls back
    /// to its default when unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when the key is absent and
    /// [`ConfigError::InvalidValue`] when an override fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("GOOGLE_MAPS_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let mut settings = Self::new(api_key);

        if let Ok(value) = env::var("GOOGLE_MAP_TYPE") {
            settings.tile_defaults.map_type = value;
        }
        if let Ok(value) = env::var("GOOGLE_TILE_LANGUAGE") {
            settings.tile_defaults.language = value;
        }
        if let Ok(value) = env::var("GOOGLE_TILE_REGION") {
            settings.tile_defaults.region = value;
        }

        settings.max_zoom = parse_env("MAX_ZOOM", settings.max_zoom)?;
        settings.http.tile_timeout_secs =
            parse_env("TILE_TIMEOUT_SECONDS", settings.http.tile_timeout_secs)?;
        settings.session.fallback_ttl_secs = parse_env(
            "SESSION_FALLBACK_TTL_SECONDS",
            settings.session.fallback_ttl_secs,
        )?;
        settings.session.refresh_grace_secs = parse_env(
            "SESSION_REFRESH_GRACE_SECONDS",
            settings.session.refresh_grace_secs,
        )?;
        settings.session.max_entries =
            parse_env("MAX_SESSION_CACHE_SIZE", settings.session.max_entries)?;
        settings.tile_cache.max_entries =
            parse_env("TILE_CACHE_SIZE", settings.tile_cache.max_entries)?;
        settings.tile_cache.ttl_secs =
            parse_env("TILE_CACHE_TTL_SECONDS", settings.tile_cache.ttl_secs)?;

        Ok(settings)
    }
}

/// Parse an environment override, keeping `default` when unset.
fn parse_env<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(default),
    }
}
