//! Lineup Validator - Budget and slot lineups for fantasy hockey
//!
//! Two independent flows:
//! - [`BudgetLineup`]: three forwards, two defensemen and one goalie bought
//!   under a salary cap, persisted as a [`SavedLineup`]
//! - [`DailyLineup`]: named slots (`F1`..`F5`, `D1`..`D3`, `G1`) filled from
//!   the players with a game on a chosen date
//!
//! Lineup values are immutable; every transition returns the next state and a
//! refused transition returns the state unchanged.

pub mod budget;
pub mod daily;
pub mod error;
pub mod filter;
pub mod player;
pub mod scheme;
pub mod snapshot;

pub use budget::BudgetLineup;
pub use daily::DailyLineup;
pub use error::LineupRejection;
pub use filter::PlayerFilter;
pub use player::Player;
pub use scheme::{BudgetScheme, DailyScheme, InvalidSlot, SlotId, DEFAULT_BUDGET_CAP};
pub use snapshot::{SavedLineup, ScoredPlayer, TeamSummary};
