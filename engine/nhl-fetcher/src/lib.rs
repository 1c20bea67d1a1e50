//! NHL Fetcher
//!
//! Reads the public NHL web API (`api-web.nhle.com`) and turns it into the
//! player data the fantasy engine works with: a league-wide priced player
//! pool, the players with a game on a given date, and enriched game details.

pub mod client;
pub mod config;
pub mod daily;
pub mod game;
pub mod models;
pub mod pool;
pub mod pricing;

pub use client::{endpoints, NhlClient, NhlSource};
pub use config::{FetcherConfig, PriceRange};
pub use daily::{daily_players, NO_GAMES_MESSAGE};
pub use game::game_details;
pub use models::*;
pub use pool::{season_stats, sort_pool, PlayerPoolBuilder};
pub use pricing::PriceAssigner;
