//! REST API server

use anyhow::{Context, Result};
use clap::Parser;
use hockey_gateway::{
    create_routes, initialize_logging, AppState, GatewayConfig, TtlCache, VERSION,
};
use lineup_validator::Player;
use nhl_fetcher::NhlClient;
use persistence::FileTeamStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "rest-server")]
#[command(about = "Fantasy hockey REST API server")]
#[command(version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listening port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = GatewayConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    initialize_logging(&config.logging)?;
    info!("Starting REST API server v{}", VERSION);

    let source = Arc::new(NhlClient::new(&config.fetcher)?);
    info!("Using NHL API at {}", source.base_url());

    let store = Arc::new(FileTeamStore::new(config.storage.clone())?);
    info!("Saved team file: {}", store.path().display());

    let cache: Arc<TtlCache<Arc<Vec<Player>>>> =
        Arc::new(TtlCache::new(config.cache.player_pool_ttl()));
    start_cache_janitor(cache.clone(), config.cache.player_pool_ttl());

    let addr = config.server_addr().context("Invalid server address")?;
    let state = AppState::new(config, source, store, cache);
    let routes = create_routes(state);

    let (bound, server) = warp::serve(routes).try_bind_with_graceful_shutdown(addr, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutdown signal received");
    })?;
    info!("Listening on http://{}", bound);

    server.await;
    info!("REST API server stopped");
    Ok(())
}

/// Periodically drop expired cache entries
fn start_cache_janitor(cache: Arc<TtlCache<Arc<Vec<Player>>>>, every: std::time::Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every.max(std::time::Duration::from_secs(1)));
        loop {
            interval.tick().await;
            let purged = cache.purge_expired().await;
            if purged > 0 {
                debug!("Purged {} expired cache entries", purged);
            }
        }
    });
}
