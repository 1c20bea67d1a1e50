use lineup_validator::Player;
use serde::{Deserialize, Serialize};

/// Localized string as the NHL API sends it (`{"default": "..."}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    #[serde(default)]
    pub default: String,
}

/// One row of `/v1/standings/now`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsEntry {
    pub team_abbrev: LocalizedName,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingsResponse {
    #[serde(default)]
    pub standings: Vec<StandingsEntry>,
}

/// Player entry in `/v1/roster/{team}/current`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPlayer {
    pub id: u64,
    #[serde(default)]
    pub first_name: LocalizedName,
    #[serde(default)]
    pub last_name: LocalizedName,
    #[serde(default)]
    pub position_code: String,
    #[serde(default)]
    pub headshot: Option<String>,
}

impl RosterPlayer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.default, self.last_name.default).trim().to_string()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Roster {
    pub forwards: Vec<RosterPlayer>,
    pub defensemen: Vec<RosterPlayer>,
    pub goalies: Vec<RosterPlayer>,
}

impl Roster {
    /// Forwards, then defensemen, then goalies
    pub fn all(&self) -> impl Iterator<Item = &RosterPlayer> {
        self.forwards.iter().chain(&self.defensemen).chain(&self.goalies)
    }

    pub fn skaters(&self) -> impl Iterator<Item = &RosterPlayer> {
        self.forwards.iter().chain(&self.defensemen)
    }
}

/// Subset of `/v1/player/{id}/landing`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerLanding {
    pub headshot: Option<String>,
    pub featured_stats: Option<FeaturedStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturedStats {
    pub season: Option<u32>,
    pub regular_season: Option<RegularSeason>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegularSeason {
    pub sub_season: serde_json::Value,
}

impl PlayerLanding {
    /// Regular-season stats object, only when it belongs to `season`
    pub fn season_stats(&self, season: u32) -> Option<&serde_json::Value> {
        let featured = self.featured_stats.as_ref()?;
        if featured.season != Some(season) {
            return None;
        }
        featured.regular_season.as_ref().map(|r| &r.sub_season).filter(|v| !v.is_null())
    }
}

/// Team side of a scheduled game in `/v1/score/{date}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameTeam {
    pub abbrev: String,
    pub name: LocalizedName,
}

impl GameTeam {
    /// Display name, falling back to the abbreviation
    pub fn display_name(&self) -> &str {
        if self.name.default.is_empty() {
            &self.abbrev
        } else {
            &self.name.default
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledGame {
    pub id: u64,
    #[serde(default, rename = "startTimeUTC")]
    pub start_time_utc: Option<String>,
    #[serde(default)]
    pub game_state: Option<String>,
    pub away_team: GameTeam,
    pub home_team: GameTeam,
}

/// A player with a game on the selected date
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlayer {
    #[serde(flatten)]
    pub player: Player,
    pub opponent: String,
    pub is_home: bool,
    pub game_time: Option<String>,
    pub game_id: u64,
}

/// Response for the daily player list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySlate {
    pub games: Vec<serde_json::Value>,
    pub players: Vec<DailyPlayer>,
    pub message: String,
}

/// Skater card shown on the preview of a game that has not started
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSkater {
    pub id: u64,
    pub first_name: LocalizedName,
    pub last_name: LocalizedName,
    pub position: String,
    pub headshot: Option<String>,
    pub games_played: u32,
    pub goals: u32,
    pub assists: u32,
    pub points: u32,
    pub plus_minus: i32,
}
