//! Fantasy Scoring - Fantasy points and position categories for NHL players
//!
//! This crate holds the pure, stateless pieces the rest of the workspace
//! builds on: raw position codes and the categories lineups are matched on,
//! skater and goalie statistics records, and the weighted scoring table.

pub mod position;
pub mod scoring;
pub mod stats;

pub use position::{normalize, PositionCategory, PositionCode, UnknownPosition};
pub use scoring::{score, GoalieWeights, ScoringTable, SkaterWeights};
pub use stats::{GoalieStatistics, PlayerStats, SkaterStatistics};
