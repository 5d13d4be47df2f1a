//! ClearWay - accessibility-aware map proxy core
//!
//! This library mediates between client applications and an external
//! mapping provider (tiles, walking directions, place search) and layers
//! user-reported obstacle data on top. The two central subsystems:
//!
//! - [`session`] + [`cache`] + [`tiles`]: short-lived upstream tile
//!   credentials and a bounded, TTL-aware tile byte cache behind a proxy
//!   orchestrator with a single auth-triggered retry.
//! - [`polyline`] + [`geo`] + [`obstacle`] + [`route`]: route geometry
//!   decoding and obstacle-aware ranking of walking route alternatives.
//!
//! # Example
//!
//! ```ignore
//! use clearway::cache::TileCache;
//! use clearway::config::Settings;
//! use clearway::provider::{AsyncReqwestClient, GoogleMapsClient};
//! use clearway::session::SessionTokenManager;
//! use clearway::tiles::TileProxyOrchestrator;
//!
//! let settings = Settings::from_env()?;
//! let http = AsyncReqwestClient::with_timeout(timeout)?;
//! let client = GoogleMapsClient::new(http, &settings.api_key, 600);
//! let sessions = SessionTokenManager::new(client.clone(), &settings.session);
//! let tiles = TileProxyOrchestrator::new(sessions, client, TileCache::new(&settings.tile_cache), 22);
//! ```

pub mod cache;
pub mod config;
pub mod coord;
pub mod geo;
pub mod logging;
pub mod obstacle;
pub mod polyline;
pub mod provider;
pub mod route;
pub mod session;
pub mod tiles;

/// Version of the ClearWay library and server.
///
/// Synchronized across the workspace; injected from `Cargo.toml` at
/// compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
