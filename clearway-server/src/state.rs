//! Shared application state.

use clearway::cache::TileCache;
use clearway::config::Settings;
use clearway::obstacle::{MemoryObstacleStore, ObstacleMatcher};
use clearway::provider::{
    AsyncReqwestClient, GoogleDirectionsClient, GoogleMapsClient, GooglePlacesClient,
    ProviderError,
};
use clearway::route::DirectionsService;
use clearway::session::SessionTokenManager;
use clearway::tiles::TileProxyOrchestrator;
use std::sync::Arc;
use std::time::Duration;

/// Concrete tile proxy wiring: one upstream client acts as both the
/// session provider and the tile fetcher.
pub type TileProxy =
    TileProxyOrchestrator<GoogleMapsClient<AsyncReqwestClient>, GoogleMapsClient<AsyncReqwestClient>>;

/// Concrete directions wiring over the in-memory obstacle store.
pub type WalkingDirections =
    DirectionsService<GoogleDirectionsClient<AsyncReqwestClient>, Arc<MemoryObstacleStore>>;

/// State shared by all request handlers.
pub struct AppState {
    pub settings: Settings,
    pub tiles: TileProxy,
    pub directions: WalkingDirections,
    pub places: GooglePlacesClient<AsyncReqwestClient>,
    pub store: Arc<MemoryObstacleStore>,
}

impl AppState {
    /// Wire up all collaborators from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if an upstream HTTP client cannot be built.
    pub fn from_settings(settings: Settings) -> Result<Self, ProviderError> {
        let tile_http =
            AsyncReqwestClient::with_timeout(Duration::from_secs(settings.http.tile_timeout_secs))?;
        let directions_http = AsyncReqwestClient::with_timeout(Duration::from_secs(
            settings.http.directions_timeout_secs,
        ))?;
        let places_http = AsyncReqwestClient::with_timeout(Duration::from_secs(
            settings.http.places_timeout_secs,
        ))?;

        let maps_client = GoogleMapsClient::new(
            tile_http.clone(),
            settings.api_key.clone(),
            settings.session.fallback_ttl_secs,
        );
        let sessions = SessionTokenManager::new(maps_client.clone(), &settings.session);
        let tiles = TileProxyOrchestrator::new(
            sessions,
            maps_client,
            TileCache::new(&settings.tile_cache),
            settings.max_zoom,
        );

        let store = Arc::new(MemoryObstacleStore::new());
        let matcher = ObstacleMatcher::new(
            Arc::clone(&store),
            settings.matching.obstacle_radius_m,
            settings.matching.bbox_margin_deg,
        );
        let directions = DirectionsService::new(
            GoogleDirectionsClient::new(directions_http, settings.api_key.clone()),
            matcher,
        );

        let places = GooglePlacesClient::new(places_http, settings.api_key.clone());

        Ok(Self {
            settings,
            tiles,
            directions,
            places,
            store,
        })
    }
}
