//! Game center details
//!
//! The landing payload is passed through as-is and enriched by game state:
//! live and finished games get the per-player boxscore, upcoming games get a
//! preview of each side's leading skaters. Enrichment failures are logged and
//! the plain landing is returned.

use crate::client::NhlSource;
use crate::config::FetcherConfig;
use crate::models::{PreviewSkater, Roster};
use crate::pool::fetch_landings;
use anyhow::{Context, Result};
use fantasy_scoring::SkaterStatistics;
use serde_json::{json, Map, Value};
use std::cmp::Reverse;
use tracing::warn;

/// Roster skaters considered for an upcoming-game preview, per side
pub const PREVIEW_ROSTER_SIZE: usize = 12;

const SIDES: [&str; 2] = ["awayTeam", "homeTeam"];

pub async fn game_details<S>(source: &S, game_id: u64, config: &FetcherConfig) -> Result<Value>
where
    S: NhlSource + ?Sized,
{
    let mut game = source.game_landing(game_id).await.context("Failed to fetch game details")?;
    let state = game.get("gameState").and_then(Value::as_str).unwrap_or_default().to_string();

    match state.as_str() {
        "LIVE" | "FINAL" | "OFF" => match source.boxscore(game_id).await {
            Ok(boxscore) => attach_boxscore(&mut game, &boxscore),
            Err(e) => warn!(game_id, "Error fetching boxscore: {:#}", e),
        },
        "FUT" | "PRE" => {
            if let Err(e) = attach_previews(source, &mut game, config).await {
                warn!(game_id, "Error fetching rosters/stats: {:#}", e);
            }
        }
        _ => {}
    }

    Ok(game)
}

/// Add a `boxscore` section holding both teams with their player stats
pub fn attach_boxscore(game: &mut Value, boxscore: &Value) {
    let mut section = Map::new();
    for side in SIDES {
        let mut team = game.get(side).cloned().unwrap_or_else(|| json!({}));
        if let Some(team) = team.as_object_mut() {
            let players =
                boxscore.pointer(&format!("/playerByGameStats/{side}")).cloned().unwrap_or(Value::Null);
            team.insert("players".to_string(), players);
        }
        section.insert(side.to_string(), team);
    }
    section.insert(
        "situation".to_string(),
        boxscore.get("situation").cloned().unwrap_or(Value::Null),
    );
    section.insert("summary".to_string(), boxscore.get("summary").cloned().unwrap_or_else(|| json!({})));

    if let Some(game) = game.as_object_mut() {
        game.insert("boxscore".to_string(), Value::Object(section));
    }
}

fn team_abbrev(game: &Value, side: &str) -> Result<String> {
    game.get(side)
        .and_then(|team| team.get("abbrev"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .with_context(|| format!("Game has no {side} abbreviation"))
}

async fn attach_previews<S>(source: &S, game: &mut Value, config: &FetcherConfig) -> Result<()>
where
    S: NhlSource + ?Sized,
{
    let away = team_abbrev(game, "awayTeam")?;
    let home = team_abbrev(game, "homeTeam")?;
    let (away_roster, home_roster) = tokio::try_join!(source.roster(&away), source.roster(&home))?;

    for (side, roster) in SIDES.into_iter().zip([&away_roster, &home_roster]) {
        let skaters = preview_skaters(source, roster, config).await;
        if let Some(team) = game.get_mut(side).and_then(Value::as_object_mut) {
            team.insert("players".to_string(), serde_json::to_value(skaters)?);
        }
    }

    Ok(())
}

/// First skaters on the roster with season stats, sorted by points descending
pub async fn preview_skaters<S>(
    source: &S,
    roster: &Roster,
    config: &FetcherConfig,
) -> Vec<PreviewSkater>
where
    S: NhlSource + ?Sized,
{
    let entries: Vec<_> = roster.skaters().take(PREVIEW_ROSTER_SIZE).collect();
    let ids = entries.iter().map(|p| p.id).collect();
    let landings = fetch_landings(source, ids, config.max_concurrent_requests).await;

    let mut skaters: Vec<PreviewSkater> = entries
        .into_iter()
        .zip(landings)
        .map(|(entry, landing)| {
            let stats: SkaterStatistics = landing
                .as_ref()
                .and_then(|l| l.season_stats(config.season))
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .unwrap_or_default();

            PreviewSkater {
                id: entry.id,
                first_name: entry.first_name.clone(),
                last_name: entry.last_name.clone(),
                position: entry.position_code.clone(),
                headshot: entry.headshot.clone(),
                games_played: stats.games_played,
                goals: stats.goals,
                assists: stats.assists,
                points: stats.points,
                plus_minus: stats.plus_minus,
            }
        })
        .collect();

    skaters.sort_by_key(|s| Reverse(s.points));
    skaters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::stub::StubSource;

    fn skater(id: u64) -> Value {
        json!({
            "id": id,
            "firstName": {"default": "Player"},
            "lastName": {"default": id.to_string()},
            "positionCode": "C"
        })
    }

    #[tokio::test]
    async fn test_final_game_gets_boxscore() {
        let source = StubSource::new()
            .with(
                "/v1/gamecenter/10/landing",
                json!({"id": 10, "gameState": "FINAL", "awayTeam": {"abbrev": "EDM"}, "homeTeam": {"abbrev": "BOS"}}),
            )
            .with(
                "/v1/gamecenter/10/boxscore",
                json!({"playerByGameStats": {"awayTeam": {"forwards": [1]}, "homeTeam": {"forwards": [2]}}}),
            );

        let game = game_details(&source, 10, &FetcherConfig::default()).await.unwrap();
        assert_eq!(game["boxscore"]["awayTeam"]["abbrev"], "EDM");
        assert_eq!(game["boxscore"]["awayTeam"]["players"]["forwards"][0], 1);
        assert_eq!(game["boxscore"]["homeTeam"]["players"]["forwards"][0], 2);
        assert_eq!(game["boxscore"]["summary"], json!({}));
    }

    #[tokio::test]
    async fn test_boxscore_failure_returns_plain_landing() {
        let source = StubSource::new().with(
            "/v1/gamecenter/11/landing",
            json!({"id": 11, "gameState": "LIVE", "awayTeam": {"abbrev": "EDM"}, "homeTeam": {"abbrev": "BOS"}}),
        );

        let game = game_details(&source, 11, &FetcherConfig::default()).await.unwrap();
        assert_eq!(game["id"], 11);
        assert!(game.get("boxscore").is_none());
    }

    #[tokio::test]
    async fn test_future_game_gets_top_skaters() {
        let forwards: Vec<Value> = (1..=14).map(skater).collect();
        let mut source = StubSource::new()
            .with(
                "/v1/gamecenter/12/landing",
                json!({"id": 12, "gameState": "FUT", "awayTeam": {"abbrev": "EDM"}, "homeTeam": {"abbrev": "BOS"}}),
            )
            .with("/v1/roster/EDM/current", json!({"forwards": forwards}))
            .with("/v1/roster/BOS/current", json!({"defensemen": [skater(50)]}));
        for id in 1..=14u64 {
            source = source.with(
                format!("/v1/player/{id}/landing"),
                json!({"featuredStats": {"season": 20242025, "regularSeason": {"subSeason": {"points": id}}}}),
            );
        }

        let game = game_details(&source, 12, &FetcherConfig::default()).await.unwrap();

        let away = game["awayTeam"]["players"].as_array().unwrap();
        assert_eq!(away.len(), PREVIEW_ROSTER_SIZE);
        assert_eq!(away[0]["points"], 12);
        assert_eq!(away[11]["points"], 1);
        assert!(!source.requests().contains(&"/v1/player/13/landing".to_string()));

        let home = game["homeTeam"]["players"].as_array().unwrap();
        assert_eq!(home.len(), 1);
        assert_eq!(home[0]["points"], 0);
        assert_eq!(home[0]["lastName"]["default"], "50");
    }

    #[tokio::test]
    async fn test_missing_landing_is_an_error() {
        let source = StubSource::new();
        assert!(game_details(&source, 99, &FetcherConfig::default()).await.is_err());
    }
}
