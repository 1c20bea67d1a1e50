use fantasy_scoring::{PlayerStats, PositionCategory, PositionCode, ScoringTable};
use serde::{Deserialize, Serialize};

/// A selectable NHL player with a salary-cap price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlayerRecord", rename_all = "camelCase")]
pub struct Player {
    /// NHL player ID
    pub id: u64,

    /// Display name (e.g., "Connor McDavid")
    pub name: String,

    /// Raw NHL position code
    pub position: PositionCode,

    /// Team abbreviation or display name
    pub team: String,

    /// Salary-cap cost
    pub price: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headshot: Option<String>,

    pub stats: PlayerStats,
}

/// Wire shape read before the stats record is typed by position
#[derive(Deserialize)]
struct PlayerRecord {
    id: u64,
    name: String,
    position: PositionCode,
    #[serde(default)]
    team: String,
    #[serde(default)]
    price: u32,
    #[serde(default)]
    headshot: Option<String>,
    #[serde(default)]
    stats: serde_json::Value,
}

impl TryFrom<PlayerRecord> for Player {
    type Error = serde_json::Error;

    fn try_from(record: PlayerRecord) -> Result<Self, Self::Error> {
        let stats = PlayerStats::from_json(record.position, record.stats)?;
        Ok(Self {
            id: record.id,
            name: record.name,
            position: record.position,
            team: record.team,
            price: record.price,
            headshot: record.headshot,
            stats,
        })
    }
}

impl Player {
    pub fn category(&self) -> PositionCategory {
        self.position.category()
    }

    pub fn fantasy_points(&self, table: &ScoringTable) -> f64 {
        table.score(Some(&self.stats), self.category())
    }
}
