//! # Persistence Layer
//!
//! Storage for the one saved fantasy team. The team view reads back exactly
//! what the builder last saved, so the store holds a single
//! [`SavedLineup`](lineup_validator::SavedLineup) that each save overwrites.
//!
//! - **TeamStore**: async trait the gateway is written against
//! - **FileTeamStore**: JSON file under a data directory
//! - **InMemoryTeamStore**: lock-protected slot for tests
//!
//! ## Usage
//!
//! ```rust
//! use persistence::{FileTeamStore, TeamStore};
//! use tempfile::TempDir;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let temp_dir = TempDir::new()?;
//!     let store = FileTeamStore::with_default_config(temp_dir.path())?;
//!     assert!(store.load().await?.is_none());
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;

pub use backend::{FileTeamStore, InMemoryTeamStore, TeamStore};
pub use config::PersistenceConfig;
pub use error::{PersistenceError, Result};
