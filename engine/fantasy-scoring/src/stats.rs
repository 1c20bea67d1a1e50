use crate::position::PositionCode;
use serde::{Deserialize, Serialize};

/// Box-score or season statistics for a forward or defenseman
///
/// Every field defaults to zero when absent from the source JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkaterStatistics {
    pub goals: u32,
    pub assists: u32,
    pub points: u32,
    pub games_played: u32,
    #[serde(rename = "pim", alias = "penaltyMinutes")]
    pub penalty_minutes: u32,
    pub hits: u32,
    #[serde(alias = "blocked")]
    pub blocked_shots: u32,
    pub plus_minus: i32,
}

/// Box-score or season statistics for a goalie
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalieStatistics {
    pub games_played: u32,
    pub saves: u32,
    pub wins: u32,
    pub losses: u32,
    #[serde(rename = "otLosses", alias = "overtimeLosses")]
    pub overtime_losses: u32,
    pub goals_against: u32,
    #[serde(rename = "goalsAgainstAvg")]
    pub goals_against_average: f64,
    #[serde(alias = "savePctg")]
    pub save_percentage: f64,
    pub shutouts: u32,
}

/// Statistics record attached to a player
///
/// Serialized without a tag so the wire shape is the flat stats object the
/// NHL API and the client both use; the player's position decides which
/// variant a record is read back into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlayerStats {
    Skater(SkaterStatistics),
    Goalie(GoalieStatistics),
}

impl PlayerStats {
    /// All-zero record of the variant matching `position`
    pub fn zeroed(position: PositionCode) -> Self {
        if position.is_goalie() {
            PlayerStats::Goalie(GoalieStatistics::default())
        } else {
            PlayerStats::Skater(SkaterStatistics::default())
        }
    }

    pub fn as_skater(&self) -> Option<&SkaterStatistics> {
        match self {
            PlayerStats::Skater(stats) => Some(stats),
            PlayerStats::Goalie(_) => None,
        }
    }

    pub fn as_goalie(&self) -> Option<&GoalieStatistics> {
        match self {
            PlayerStats::Goalie(stats) => Some(stats),
            PlayerStats::Skater(_) => None,
        }
    }

    /// Read a flat stats object into the variant matching `position`
    ///
    /// `null` reads as a zero record.
    pub fn from_json(
        position: PositionCode,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        if value.is_null() {
            return Ok(Self::zeroed(position));
        }
        if position.is_goalie() {
            serde_json::from_value(value).map(PlayerStats::Goalie)
        } else {
            serde_json::from_value(value).map(PlayerStats::Skater)
        }
    }

    /// Skater points, zero for goalies
    pub fn points(&self) -> u32 {
        self.as_skater().map(|s| s.points).unwrap_or(0)
    }

    /// Goalie wins, zero for skaters
    pub fn wins(&self) -> u32 {
        self.as_goalie().map(|g| g.wins).unwrap_or(0)
    }

    pub fn games_played(&self) -> u32 {
        match self {
            PlayerStats::Skater(s) => s.games_played,
            PlayerStats::Goalie(g) => g.games_played,
        }
    }
}

impl From<SkaterStatistics> for PlayerStats {
    fn from(stats: SkaterStatistics) -> Self {
        PlayerStats::Skater(stats)
    }
}

impl From<GoalieStatistics> for PlayerStats {
    fn from(stats: GoalieStatistics) -> Self {
        PlayerStats::Goalie(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_zero() {
        let stats: SkaterStatistics = serde_json::from_str(r#"{"goals": 4}"#).unwrap();
        assert_eq!(stats.goals, 4);
        assert_eq!(stats.assists, 0);
        assert_eq!(stats.blocked_shots, 0);
    }

    #[test]
    fn test_box_score_field_names() {
        let stats: SkaterStatistics =
            serde_json::from_str(r#"{"pim": 2, "hits": 3, "blockedShots": 1}"#).unwrap();
        assert_eq!(stats.penalty_minutes, 2);
        assert_eq!(stats.hits, 3);
        assert_eq!(stats.blocked_shots, 1);

        let legacy: SkaterStatistics = serde_json::from_str(r#"{"blocked": 5}"#).unwrap();
        assert_eq!(legacy.blocked_shots, 5);
    }

    #[test]
    fn test_goalie_field_names() {
        let stats: GoalieStatistics = serde_json::from_str(
            r#"{"wins": 30, "otLosses": 4, "savePctg": 0.915, "goalsAgainstAvg": 2.5}"#,
        )
        .unwrap();
        assert_eq!(stats.wins, 30);
        assert_eq!(stats.overtime_losses, 4);
        assert!((stats.save_percentage - 0.915).abs() < f64::EPSILON);
        assert!((stats.goals_against_average - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zeroed_matches_position() {
        assert!(PlayerStats::zeroed(PositionCode::Goalie).as_goalie().is_some());
        assert!(PlayerStats::zeroed(PositionCode::Center).as_skater().is_some());
        assert_eq!(PlayerStats::zeroed(PositionCode::Defense).points(), 0);
    }

    #[test]
    fn test_from_json_picks_variant_by_position() {
        let value = serde_json::json!({"wins": 3, "saves": 90});
        let goalie = PlayerStats::from_json(PositionCode::Goalie, value.clone()).unwrap();
        assert_eq!(goalie.wins(), 3);

        let skater = PlayerStats::from_json(PositionCode::Center, value).unwrap();
        assert_eq!(skater, PlayerStats::Skater(SkaterStatistics::default()));

        let null = PlayerStats::from_json(PositionCode::Goalie, serde_json::Value::Null).unwrap();
        assert_eq!(null, PlayerStats::zeroed(PositionCode::Goalie));
    }

    #[test]
    fn test_untagged_serialization_is_flat() {
        let stats = PlayerStats::Skater(SkaterStatistics { goals: 1, ..Default::default() });
        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(value["goals"], 1);
        assert!(value.get("Skater").is_none());
    }
}
