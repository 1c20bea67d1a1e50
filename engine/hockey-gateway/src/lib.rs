//! HockeyGateway - REST API for the fantasy hockey engine
//!
//! Proxies the public NHL web API, serves the cached league-wide player
//! pool, validates daily lineups, and stores the single budget team.

pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod rest_api;
pub mod state;

pub use cache::{Cached, ScopedCache, TtlCache};
pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use logging::initialize_logging;
pub use rest_api::create_routes;
pub use state::AppState;

/// Version of the HockeyGateway API
pub const VERSION: &str = "0.1.0";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;
