//! Fantasy point calculation
//!
//! A fixed linear formula over box-score fields. Skaters earn points for
//! goals, assists, penalty minutes, hits, and blocked shots; goalies for
//! saves, wins, and overtime losses, minus goals against.

use crate::position::PositionCategory;
use crate::stats::{GoalieStatistics, PlayerStats, SkaterStatistics};
use serde::{Deserialize, Serialize};

/// Per-stat weights for forwards and defensemen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkaterWeights {
    pub goal: f64,
    pub assist: f64,
    pub penalty_minute: f64,
    pub hit: f64,
    pub blocked_shot: f64,
}

/// Per-stat weights for goalies (`goal_against` is a penalty, so negative)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalieWeights {
    pub save: f64,
    pub win: f64,
    pub overtime_loss: f64,
    pub goal_against: f64,
}

/// Complete weight table used to score every player
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTable {
    pub skater: SkaterWeights,
    pub goalie: GoalieWeights,
}

impl Default for SkaterWeights {
    fn default() -> Self {
        Self { goal: 5.0, assist: 2.0, penalty_minute: 0.5, hit: 0.5, blocked_shot: 0.5 }
    }
}

impl Default for GoalieWeights {
    fn default() -> Self {
        Self { save: 0.2, win: 4.0, overtime_loss: 1.0, goal_against: -1.0 }
    }
}

impl ScoringTable {
    /// Score a stats record for a player of the given category
    ///
    /// Absent stats score zero. A record whose variant does not belong to the
    /// category (skater stats scored as a goalie, or the reverse) has none of
    /// the weighted fields and also scores zero.
    pub fn score(&self, stats: Option<&PlayerStats>, category: PositionCategory) -> f64 {
        let Some(stats) = stats else {
            return 0.0;
        };

        match (category, stats) {
            (PositionCategory::Goalie, PlayerStats::Goalie(goalie)) => self.score_goalie(goalie),
            (PositionCategory::Goalie, PlayerStats::Skater(_)) => 0.0,
            (_, PlayerStats::Skater(skater)) => self.score_skater(skater),
            (_, PlayerStats::Goalie(_)) => 0.0,
        }
    }

    pub fn score_skater(&self, stats: &SkaterStatistics) -> f64 {
        let w = &self.skater;
        f64::from(stats.goals) * w.goal
            + f64::from(stats.assists) * w.assist
            + f64::from(stats.penalty_minutes) * w.penalty_minute
            + f64::from(stats.hits) * w.hit
            + f64::from(stats.blocked_shots) * w.blocked_shot
    }

    pub fn score_goalie(&self, stats: &GoalieStatistics) -> f64 {
        let w = &self.goalie;
        f64::from(stats.saves) * w.save
            + f64::from(stats.wins) * w.win
            + f64::from(stats.overtime_losses) * w.overtime_loss
            + f64::from(stats.goals_against) * w.goal_against
    }
}

/// Score with the default table
pub fn score(stats: Option<&PlayerStats>, category: PositionCategory) -> f64 {
    ScoringTable::default().score(stats, category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skater(goals: u32, assists: u32) -> PlayerStats {
        PlayerStats::Skater(SkaterStatistics { goals, assists, ..Default::default() })
    }

    fn goalie(saves: u32, wins: u32, overtime_losses: u32, goals_against: u32) -> PlayerStats {
        PlayerStats::Goalie(GoalieStatistics {
            saves,
            wins,
            overtime_losses,
            goals_against,
            ..Default::default()
        })
    }

    #[test]
    fn test_absent_stats_score_zero() {
        for category in PositionCategory::ALL {
            assert_eq!(score(None, category), 0.0);
        }
    }

    #[test]
    fn test_forward_goals_and_assists() {
        let stats = skater(2, 1);
        assert_eq!(score(Some(&stats), PositionCategory::Forward), 12.0);
        assert_eq!(score(Some(&stats), PositionCategory::Defense), 12.0);
    }

    #[test]
    fn test_skater_secondary_stats() {
        let stats = PlayerStats::Skater(SkaterStatistics {
            penalty_minutes: 4,
            hits: 6,
            blocked_shots: 2,
            ..Default::default()
        });
        assert_eq!(score(Some(&stats), PositionCategory::Defense), 6.0);
    }

    #[test]
    fn test_goalie_with_goals_against_penalty() {
        let clean = goalie(20, 1, 0, 0);
        assert!((score(Some(&clean), PositionCategory::Goalie) - 8.0).abs() < 1e-9);

        let leaky = goalie(20, 1, 0, 2);
        assert!((score(Some(&leaky), PositionCategory::Goalie) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_goalie_overtime_loss() {
        let stats = goalie(30, 0, 1, 3);
        assert!((score(Some(&stats), PositionCategory::Goalie) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_mismatched_record_scores_zero() {
        assert_eq!(score(Some(&skater(3, 3)), PositionCategory::Goalie), 0.0);
        assert_eq!(score(Some(&goalie(40, 1, 0, 0)), PositionCategory::Forward), 0.0);
    }

    #[test]
    fn test_custom_table() {
        let table = ScoringTable {
            skater: SkaterWeights { goal: 3.0, ..Default::default() },
            ..Default::default()
        };
        assert_eq!(table.score(Some(&skater(2, 1)), PositionCategory::Forward), 8.0);
    }

    #[test]
    fn test_partial_table_deserializes_with_defaults() {
        let table: ScoringTable = serde_json::from_str(
            r#"{"goalie": {"save": 0.1, "win": 5.0, "overtime_loss": 1.0, "goal_against": 0.0}}"#,
        )
        .unwrap();
        assert_eq!(table.skater, SkaterWeights::default());
        assert_eq!(table.goalie.win, 5.0);
    }

    #[test]
    fn test_single_weight_override() {
        let table: ScoringTable = serde_json::from_str(r#"{"skater": {"goal": 3.0}}"#).unwrap();
        assert_eq!(table.skater.goal, 3.0);
        assert_eq!(table.skater.assist, 2.0);
        assert_eq!(table.goalie, GoalieWeights::default());
        assert_eq!(table.score(Some(&skater(2, 1)), PositionCategory::Forward), 8.0);
    }
}
