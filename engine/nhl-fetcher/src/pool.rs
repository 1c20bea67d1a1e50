//! League-wide player pool
//!
//! standings -> every team roster -> every player's landing page, with the
//! landing fetches running concurrently up to the configured limit.

use crate::client::NhlSource;
use crate::config::FetcherConfig;
use crate::models::{PlayerLanding, RosterPlayer};
use crate::pricing::PriceAssigner;
use anyhow::{Context, Result};
use fantasy_scoring::{PlayerStats, PositionCode};
use futures::stream::{self, StreamExt};
use lineup_validator::Player;
use std::cmp::Ordering;
use tracing::{info, warn};

/// Fetch landing pages for `ids` in order, `None` where a fetch failed
pub(crate) async fn fetch_landings<S>(
    source: &S,
    ids: Vec<u64>,
    max_concurrent: usize,
) -> Vec<Option<PlayerLanding>>
where
    S: NhlSource + ?Sized,
{
    stream::iter(ids)
        .map(|id| async move {
            match source.player_landing(id).await {
                Ok(landing) => Some(landing),
                Err(e) => {
                    warn!(player_id = id, "Failed to fetch player stats: {:#}", e);
                    None
                }
            }
        })
        .buffered(max_concurrent.max(1))
        .collect()
        .await
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Season stats for a player, or a zero record of the right variant
///
/// Stats count only when the landing's featured season is `season`.
pub fn season_stats(
    landing: Option<&PlayerLanding>,
    position: PositionCode,
    season: u32,
) -> PlayerStats {
    let Some(value) = landing.and_then(|l| l.season_stats(season)) else {
        return PlayerStats::zeroed(position);
    };

    match PlayerStats::from_json(position, value.clone()) {
        Ok(PlayerStats::Goalie(mut goalie)) => {
            goalie.goals_against_average = round_to(goalie.goals_against_average, 2);
            goalie.save_percentage = round_to(goalie.save_percentage, 3);
            PlayerStats::Goalie(goalie)
        }
        Ok(stats) => stats,
        Err(e) => {
            warn!("Unreadable season stats, using zeros: {}", e);
            PlayerStats::zeroed(position)
        }
    }
}

/// Assemble a pool player from its roster entry and landing page
///
/// Returns `None` for an unknown position code.
pub fn build_player(
    entry: &RosterPlayer,
    team: &str,
    landing: Option<&PlayerLanding>,
    season: u32,
    price: u32,
) -> Option<Player> {
    let position = match entry.position_code.parse::<PositionCode>() {
        Ok(position) => position,
        Err(e) => {
            warn!(player_id = entry.id, "Skipping player: {}", e);
            return None;
        }
    };

    let headshot = landing.and_then(|l| l.headshot.clone()).or_else(|| entry.headshot.clone());

    Some(Player {
        id: entry.id,
        name: entry.full_name(),
        position,
        team: team.to_string(),
        price,
        headshot,
        stats: season_stats(landing, position, season),
    })
}

/// Skaters by points descending, then goalies by wins descending
pub fn sort_pool(players: &mut [Player]) {
    players.sort_by(|a, b| match (a.position.is_goalie(), b.position.is_goalie()) {
        (true, true) => b.stats.wins().cmp(&a.stats.wins()),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.stats.points().cmp(&a.stats.points()),
    });
}

pub struct PlayerPoolBuilder<'a, S: NhlSource + ?Sized> {
    source: &'a S,
    season: u32,
    max_concurrent: usize,
}

impl<'a, S: NhlSource + ?Sized> PlayerPoolBuilder<'a, S> {
    pub fn new(source: &'a S, config: &FetcherConfig) -> Self {
        Self { source, season: config.season, max_concurrent: config.max_concurrent_requests }
    }

    /// Every rostered player with season stats and a random price, sorted
    ///
    /// A team whose roster cannot be fetched is skipped; a player whose stats
    /// cannot be fetched gets a zero record.
    pub async fn build(&self, pricer: &mut PriceAssigner) -> Result<Vec<Player>> {
        let teams =
            self.source.team_abbrevs().await.context("Failed to load teams from standings")?;
        info!("Building player pool for {} teams", teams.len());

        let mut entries: Vec<(String, RosterPlayer)> = Vec::new();
        for team in &teams {
            match self.source.roster(team).await {
                Ok(roster) => entries.extend(roster.all().cloned().map(|p| (team.clone(), p))),
                Err(e) => warn!(team = %team, "Skipping team, roster unavailable: {:#}", e),
            }
        }

        let ids = entries.iter().map(|(_, p)| p.id).collect();
        let landings = fetch_landings(self.source, ids, self.max_concurrent).await;

        let mut players: Vec<Player> = entries
            .iter()
            .zip(&landings)
            .filter_map(|((team, entry), landing)| {
                build_player(entry, team, landing.as_ref(), self.season, pricer.next_price())
            })
            .collect();
        sort_pool(&mut players);

        let failed = landings.iter().filter(|l| l.is_none()).count();
        info!("Built player pool: {} players ({} without stats)", players.len(), failed);
        Ok(players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::stub::StubSource;
    use crate::config::PriceRange;
    use serde_json::{json, Value};

    fn roster_entry(id: u64, first: &str, last: &str, code: &str) -> Value {
        json!({
            "id": id,
            "firstName": {"default": first},
            "lastName": {"default": last},
            "positionCode": code,
            "headshot": format!("https://assets.nhle.com/mugs/{id}.png")
        })
    }

    fn landing(season: u32, sub_season: Value) -> Value {
        json!({
            "headshot": "https://assets.nhle.com/landing.png",
            "featuredStats": {"season": season, "regularSeason": {"subSeason": sub_season}}
        })
    }

    fn league() -> StubSource {
        StubSource::new()
            .with(
                "/v1/standings/now",
                json!({"standings": [
                    {"teamAbbrev": {"default": "EDM"}},
                    {"teamAbbrev": {"default": "XXX"}}
                ]}),
            )
            .with(
                "/v1/roster/EDM/current",
                json!({
                    "forwards": [
                        roster_entry(1, "Zach", "Hyman", "L"),
                        roster_entry(2, "Connor", "McDavid", "C")
                    ],
                    "defensemen": [roster_entry(3, "Evan", "Bouchard", "D")],
                    "goalies": [
                        roster_entry(4, "Calvin", "Pickard", "G"),
                        roster_entry(5, "Stuart", "Skinner", "G")
                    ]
                }),
            )
            .with("/v1/player/1/landing", landing(20242025, json!({"goals": 20, "points": 35})))
            .with(
                "/v1/player/2/landing",
                landing(20242025, json!({"goals": 30, "assists": 70, "points": 100})),
            )
            .with("/v1/player/3/landing", landing(20232024, json!({"points": 80})))
            .with("/v1/player/4/landing", landing(20242025, json!({"wins": 12})))
            .with(
                "/v1/player/5/landing",
                landing(
                    20242025,
                    json!({"wins": 30, "goalsAgainstAvg": 2.6789, "savePctg": 0.90456}),
                ),
            )
    }

    #[tokio::test]
    async fn test_build_pool_sorted_and_priced() {
        let source = league();
        let config = FetcherConfig::default();
        let mut pricer = PriceAssigner::with_seed(PriceRange::default(), 42);

        let pool = PlayerPoolBuilder::new(&source, &config).build(&mut pricer).await.unwrap();

        let ids: Vec<u64> = pool.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1, 3, 5, 4]);
        assert!(pool.iter().all(|p| (20..50).contains(&p.price)));
        assert!(pool.iter().all(|p| p.team == "EDM"));
        assert_eq!(pool[0].name, "Connor McDavid");
        assert_eq!(pool[0].headshot.as_deref(), Some("https://assets.nhle.com/landing.png"));
    }

    #[tokio::test]
    async fn test_old_season_stats_are_zeroed() {
        let source = league();
        let mut pricer = PriceAssigner::with_seed(PriceRange::default(), 1);
        let pool = PlayerPoolBuilder::new(&source, &FetcherConfig::default())
            .build(&mut pricer)
            .await
            .unwrap();

        let bouchard = pool.iter().find(|p| p.id == 3).unwrap();
        assert_eq!(bouchard.stats, PlayerStats::zeroed(PositionCode::Defense));
    }

    #[tokio::test]
    async fn test_failed_player_fetch_gets_zero_record() {
        let source = league().with("/v1/roster/EDM/current", json!({
            "forwards": [roster_entry(99, "No", "Landing", "C")]
        }));
        let mut pricer = PriceAssigner::with_seed(PriceRange::default(), 1);
        let pool = PlayerPoolBuilder::new(&source, &FetcherConfig::default())
            .build(&mut pricer)
            .await
            .unwrap();

        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].stats, PlayerStats::zeroed(PositionCode::Center));
        assert_eq!(pool[0].headshot.as_deref(), Some("https://assets.nhle.com/mugs/99.png"));
    }

    #[tokio::test]
    async fn test_missing_standings_is_an_error() {
        let source = StubSource::new();
        let mut pricer = PriceAssigner::new(PriceRange::default());
        let result =
            PlayerPoolBuilder::new(&source, &FetcherConfig::default()).build(&mut pricer).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_goalie_rates_are_rounded() {
        let landing: PlayerLanding = serde_json::from_value(landing(
            20242025,
            json!({"wins": 30, "goalsAgainstAvg": 2.6789, "savePctg": 0.90456}),
        ))
        .unwrap();

        let stats = season_stats(Some(&landing), PositionCode::Goalie, 20242025);
        let goalie = stats.as_goalie().unwrap();
        assert!((goalie.goals_against_average - 2.68).abs() < 1e-9);
        assert!((goalie.save_percentage - 0.905).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_position_is_skipped() {
        let entry: RosterPlayer =
            serde_json::from_value(roster_entry(7, "Mystery", "Player", "X")).unwrap();
        assert!(build_player(&entry, "EDM", None, 20242025, 30).is_none());
    }
}
