//! Shared request state

use crate::cache::{Cached, ScopedCache, TtlCache};
use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use lineup_validator::Player;
use nhl_fetcher::{NhlSource, PlayerPoolBuilder, PriceAssigner};
use persistence::TeamStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Cache key of the league-wide player pool
pub const PLAYER_POOL_KEY: &str = "players";

pub type PlayerPool = Arc<Vec<Player>>;

/// Everything a handler needs, cheap to clone per request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub source: Arc<dyn NhlSource>,
    pub store: Arc<dyn TeamStore>,
    pub pool_cache: Arc<dyn ScopedCache<PlayerPool>>,
    pool_build: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        config: GatewayConfig,
        source: Arc<dyn NhlSource>,
        store: Arc<dyn TeamStore>,
        pool_cache: Arc<dyn ScopedCache<PlayerPool>>,
    ) -> Self {
        Self { config: Arc::new(config), source, store, pool_cache, pool_build: Arc::new(Mutex::new(())) }
    }

    /// State with a TTL pool cache sized from `config`
    pub fn with_ttl_cache(
        config: GatewayConfig,
        source: Arc<dyn NhlSource>,
        store: Arc<dyn TeamStore>,
    ) -> Self {
        let cache = TtlCache::new(config.cache.player_pool_ttl());
        Self::new(config, source, store, Arc::new(cache))
    }

    /// Cached player pool, built on a miss
    ///
    /// Concurrent misses wait for a single build.
    pub async fn player_pool(&self) -> GatewayResult<Cached<PlayerPool>> {
        if let Some(hit) = self.pool_cache.get(PLAYER_POOL_KEY).await {
            return Ok(hit);
        }

        let _guard = self.pool_build.lock().await;
        if let Some(hit) = self.pool_cache.get(PLAYER_POOL_KEY).await {
            return Ok(hit);
        }

        let mut pricer = PriceAssigner::new(self.config.fetcher.pricing);
        let players = PlayerPoolBuilder::new(self.source.as_ref(), &self.config.fetcher)
            .build(&mut pricer)
            .await
            .map_err(|e| GatewayError::upstream("Failed to fetch players", e))?;

        info!("Caching player pool of {} players", players.len());
        Ok(self.pool_cache.insert(PLAYER_POOL_KEY, Arc::new(players)).await)
    }

    pub async fn refresh_player_pool(&self) {
        self.pool_cache.invalidate(PLAYER_POOL_KEY).await;
        info!("Player pool cache cleared");
    }
}
