use crate::budget::BudgetLineup;
use crate::player::Player;
use chrono::{DateTime, Utc};
use fantasy_scoring::{PositionCategory, ScoringTable};
use serde::{Deserialize, Serialize};

/// The single persisted team, read back verbatim by the summary view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLineup {
    pub players: Vec<Player>,
    pub total_budget: u32,
    pub remaining_budget: u32,
    pub last_updated: DateTime<Utc>,
}

/// A player annotated with its fantasy points
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredPlayer {
    #[serde(flatten)]
    pub player: Player,
    pub fantasy_points: f64,
}

impl ScoredPlayer {
    pub fn new(player: Player, table: &ScoringTable) -> Self {
        let fantasy_points = player.fantasy_points(table);
        Self { player, fantasy_points }
    }
}

/// Saved team split by category for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub forwards: Vec<ScoredPlayer>,
    pub defense: Vec<ScoredPlayer>,
    pub goalies: Vec<ScoredPlayer>,
    pub total_fantasy_points: f64,
    pub total_budget: u32,
    pub remaining_budget: u32,
    pub last_updated: DateTime<Utc>,
}

impl SavedLineup {
    pub fn from_lineup(lineup: &BudgetLineup, last_updated: DateTime<Utc>) -> Self {
        Self {
            players: lineup.players().to_vec(),
            total_budget: lineup.scheme().cap,
            remaining_budget: lineup.remaining_budget(),
            last_updated,
        }
    }

    pub fn players_in(&self, category: PositionCategory) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.category() == category)
    }

    pub fn summarize(&self, table: &ScoringTable) -> TeamSummary {
        let scored = |category| -> Vec<ScoredPlayer> {
            self.players_in(category).cloned().map(|p| ScoredPlayer::new(p, table)).collect()
        };

        let forwards = scored(PositionCategory::Forward);
        let defense = scored(PositionCategory::Defense);
        let goalies = scored(PositionCategory::Goalie);
        let total_fantasy_points: f64 =
            forwards.iter().chain(&defense).chain(&goalies).map(|p| p.fantasy_points).sum();

        TeamSummary {
            forwards,
            defense,
            goalies,
            total_fantasy_points,
            total_budget: self.total_budget,
            remaining_budget: self.remaining_budget,
            last_updated: self.last_updated,
        }
    }
}
