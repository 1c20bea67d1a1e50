use crate::client::NhlSource;
use crate::config::FetcherConfig;
use crate::models::{DailyPlayer, DailySlate, GameTeam, Roster, ScheduledGame};
use crate::pool::{build_player, fetch_landings};
use crate::pricing::PriceAssigner;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{info, warn};

pub const NO_GAMES_MESSAGE: &str = "No games scheduled for this date";

/// Players from both rosters of every game on `date`
///
/// A game whose rosters cannot be fetched is left out of the player list but
/// still listed under `games`.
pub async fn daily_players<S>(
    source: &S,
    date: NaiveDate,
    config: &FetcherConfig,
    pricer: &mut PriceAssigner,
) -> Result<DailySlate>
where
    S: NhlSource + ?Sized,
{
    let score = source.score(date).await.context("Failed to fetch games for date")?;
    let games: Vec<Value> = score.get("games").and_then(Value::as_array).cloned().unwrap_or_default();

    if games.is_empty() {
        info!("No games on {}", date);
        return Ok(DailySlate { games, players: Vec::new(), message: NO_GAMES_MESSAGE.to_string() });
    }

    let mut players = Vec::new();
    for raw in &games {
        let game: ScheduledGame = match serde_json::from_value(raw.clone()) {
            Ok(game) => game,
            Err(e) => {
                warn!("Skipping unreadable game entry: {}", e);
                continue;
            }
        };

        match game_players(source, &game, config, pricer).await {
            Ok(mut found) => players.append(&mut found),
            Err(e) => warn!(game_id = game.id, "Error processing game: {:#}", e),
        }
    }

    let message = format!("Found {} players in {} games", players.len(), games.len());
    info!("{}", message);
    Ok(DailySlate { games, players, message })
}

async fn game_players<S>(
    source: &S,
    game: &ScheduledGame,
    config: &FetcherConfig,
    pricer: &mut PriceAssigner,
) -> Result<Vec<DailyPlayer>>
where
    S: NhlSource + ?Sized,
{
    let (away, home) = tokio::try_join!(
        source.roster(&game.away_team.abbrev),
        source.roster(&game.home_team.abbrev)
    )?;

    let mut players = side_players(source, game, &away, false, config, pricer).await;
    players.extend(side_players(source, game, &home, true, config, pricer).await);
    Ok(players)
}

async fn side_players<S>(
    source: &S,
    game: &ScheduledGame,
    roster: &Roster,
    is_home: bool,
    config: &FetcherConfig,
    pricer: &mut PriceAssigner,
) -> Vec<DailyPlayer>
where
    S: NhlSource + ?Sized,
{
    let (team, opponent): (&GameTeam, &GameTeam) = if is_home {
        (&game.home_team, &game.away_team)
    } else {
        (&game.away_team, &game.home_team)
    };

    let entries: Vec<_> = roster.all().collect();
    let ids = entries.iter().map(|p| p.id).collect();
    let landings = fetch_landings(source, ids, config.max_concurrent_requests).await;

    entries
        .into_iter()
        .zip(&landings)
        .filter_map(|(entry, landing)| {
            let price = pricer.next_price();
            build_player(entry, team.display_name(), landing.as_ref(), config.season, price)
        })
        .map(|player| DailyPlayer {
            player,
            opponent: opponent.display_name().to_string(),
            is_home,
            game_time: game.start_time_utc.clone(),
            game_id: game.id,
        })
        .collect()
}
