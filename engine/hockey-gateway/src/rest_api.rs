//! REST API endpoints for the fantasy hockey gateway

use crate::error::{handle_rejection, GatewayError, GatewayResult};
use crate::state::AppState;
use chrono::{NaiveDate, Utc};
use lineup_validator::{
    BudgetLineup, DailyLineup, Player, PlayerFilter, SavedLineup, ScoredPlayer, SlotId,
};
use nhl_fetcher::{daily_players, game_details, NhlSource, PriceAssigner};
use persistence::TeamStore;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::convert::Infallible;
use tracing::info;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

const INVALID_DATE: &str = "Invalid date format. Use YYYY-MM-DD";

/// `?date=` query parameter
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// Daily lineup submitted for validation
#[derive(Debug, Deserialize)]
pub struct LineupRequest {
    #[serde(default)]
    pub date: Option<String>,
    pub players: BTreeMap<SlotId, Option<Player>>,
}

/// A complete, valid daily lineup with its point total
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupResponse {
    pub valid: bool,
    pub date: Option<String>,
    pub total_fantasy_points: f64,
    pub total_price: u64,
    pub slots: BTreeMap<SlotId, ScoredPlayer>,
}

/// Budget team to persist
#[derive(Debug, Deserialize)]
pub struct SaveTeamRequest {
    pub players: Vec<Player>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Parse a strict `YYYY-MM-DD` date
pub fn parse_date(raw: &str) -> GatewayResult<NaiveDate> {
    let invalid = || GatewayError::BadRequest(INVALID_DATE.to_string());
    if raw.len() != 10 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())
}

/// `If-None-Match` check: `*`, or any listed tag equal to `etag` (weak tags compare by value)
fn etag_matches(header: &str, etag: &str) -> bool {
    header
        .split(',')
        .map(str::trim)
        .any(|tag| tag == "*" || tag.trim_start_matches("W/") == etag)
}

fn proxy(result: anyhow::Result<Value>, context: &str) -> Result<warp::reply::Json, Rejection> {
    let value = result.map_err(|e| GatewayError::upstream(context, e))?;
    Ok(warp::reply::json(&value))
}

/// Score feed for a date, today (UTC) when none is given
pub async fn get_games(query: DateQuery, state: AppState) -> Result<impl Reply, Rejection> {
    let date = match query.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => Utc::now().date_naive(),
    };
    proxy(state.source.score(date).await, "Failed to fetch games")
}

pub async fn get_game(game_id: u64, state: AppState) -> Result<impl Reply, Rejection> {
    proxy(
        game_details(state.source.as_ref(), game_id, &state.config.fetcher).await,
        "Failed to fetch game details",
    )
}

pub async fn get_boxscore(game_id: u64, state: AppState) -> Result<impl Reply, Rejection> {
    proxy(state.source.boxscore(game_id).await, "Failed to fetch boxscore")
}

pub async fn get_play_by_play(game_id: u64, state: AppState) -> Result<impl Reply, Rejection> {
    proxy(state.source.play_by_play(game_id).await, "Failed to fetch play-by-play")
}

pub async fn get_schedule_calendar(state: AppState) -> Result<impl Reply, Rejection> {
    proxy(state.source.schedule_calendar().await, "Failed to fetch schedule calendar")
}

pub async fn get_standings(state: AppState) -> Result<impl Reply, Rejection> {
    proxy(state.source.standings().await, "Failed to fetch standings")
}

pub async fn get_team_stats(team: String, state: AppState) -> Result<impl Reply, Rejection> {
    proxy(state.source.club_stats(&team).await, "Failed to fetch team stats")
}

pub async fn get_team_roster(team: String, state: AppState) -> Result<impl Reply, Rejection> {
    proxy(state.source.roster_json(&team).await, "Failed to fetch team roster")
}

/// Cached player pool, filtered and scored
///
/// The ETag is the build time of the cached pool, so it changes only when
/// the pool is rebuilt.
pub async fn get_players(
    filter: PlayerFilter,
    if_none_match: Option<String>,
    state: AppState,
) -> Result<Response, Rejection> {
    let pool = state.player_pool().await?;
    let etag = format!("\"{}\"", pool.cached_at.timestamp_millis());
    let cache_control = format!("private, max-age={}", state.config.cache.player_pool_ttl_secs);

    if if_none_match.as_deref().is_some_and(|header| etag_matches(header, &etag)) {
        let reply = warp::reply::with_status(warp::reply(), StatusCode::NOT_MODIFIED);
        let reply = warp::reply::with_header(reply, "cache-control", cache_control);
        return Ok(warp::reply::with_header(reply, "etag", etag).into_response());
    }

    let table = state.config.scoring;
    let players: Vec<ScoredPlayer> = filter
        .apply(&pool.value)
        .into_iter()
        .map(|p| ScoredPlayer::new(p.clone(), &table))
        .collect();

    let reply = warp::reply::json(&players);
    let reply = warp::reply::with_header(reply, "cache-control", cache_control);
    Ok(warp::reply::with_header(reply, "etag", etag).into_response())
}

pub async fn refresh_players(state: AppState) -> Result<impl Reply, Rejection> {
    state.refresh_player_pool().await;
    Ok(warp::reply::json(&json!({ "message": "Cache cleared successfully" })))
}

/// Players from every game on a required date
pub async fn get_daily_players(query: DateQuery, state: AppState) -> Result<impl Reply, Rejection> {
    let raw = query
        .date
        .as_deref()
        .ok_or_else(|| GatewayError::BadRequest(INVALID_DATE.to_string()))?;
    let date = parse_date(raw)?;

    let mut pricer = PriceAssigner::new(state.config.fetcher.pricing);
    let slate = daily_players(state.source.as_ref(), date, &state.config.fetcher, &mut pricer)
        .await
        .map_err(|e| GatewayError::upstream("Failed to fetch daily players", e))?;

    info!("Daily players for {}: {}", date, slate.message);
    Ok(warp::reply::json(&slate))
}

/// Validate a daily lineup; nothing is stored
pub async fn validate_lineup(
    request: LineupRequest,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    if let Some(raw) = request.date.as_deref() {
        parse_date(raw)?;
    }

    let lineup = DailyLineup::from_assignments(state.config.lineups.daily, &request.players)
        .map_err(GatewayError::from)?;
    lineup.check_complete().map_err(GatewayError::from)?;

    let table = state.config.scoring;
    let slots = lineup
        .slots()
        .filter_map(|(slot, player)| player.map(|p| (slot, ScoredPlayer::new(p.clone(), &table))))
        .collect();

    let response = LineupResponse {
        valid: true,
        date: request.date,
        total_fantasy_points: lineup.fantasy_points(&table),
        total_price: lineup.total_price(),
        slots,
    };
    info!("Validated daily lineup worth {:.1} points", response.total_fantasy_points);
    Ok(warp::reply::json(&response))
}

pub async fn get_my_team(state: AppState) -> Result<impl Reply, Rejection> {
    let saved = state
        .store
        .load()
        .await
        .map_err(GatewayError::from)?
        .ok_or_else(|| GatewayError::NotFound("No team saved yet".to_string()))?;
    Ok(warp::reply::json(&saved.summarize(&state.config.scoring)))
}

/// Validate and persist the budget team, replacing any previous one
pub async fn save_my_team(
    request: SaveTeamRequest,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let lineup = BudgetLineup::from_players(state.config.lineups.budget, &request.players)
        .map_err(GatewayError::from)?;
    lineup.check_complete().map_err(GatewayError::from)?;

    let saved = SavedLineup::from_lineup(&lineup, Utc::now());
    state.store.save(&saved).await.map_err(GatewayError::from)?;

    info!(
        "Saved team of {} players, {} remaining",
        saved.players.len(),
        saved.remaining_budget
    );
    Ok(warp::reply::json(&saved))
}

pub async fn health_check() -> Result<impl Reply, Infallible> {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    Ok(warp::reply::json(&response))
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn json_body<T>(max_bytes: u64) -> impl Filter<Extract = (T,), Error = Rejection> + Clone
where
    T: serde::de::DeserializeOwned + Send,
{
    warp::body::content_length_limit(max_bytes).and(warp::body::json())
}

/// Create all REST API routes
pub fn create_routes(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    let max_body = state.config.server.max_body_bytes;
    let state_filter = with_state(state);

    // NHL proxy endpoints
    let games = warp::path("api")
        .and(warp::path("games"))
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<DateQuery>())
        .and(state_filter.clone())
        .and_then(get_games);

    let game = warp::path("api")
        .and(warp::path("games"))
        .and(warp::path::param::<u64>())
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_game);

    let boxscore = warp::path("api")
        .and(warp::path("games"))
        .and(warp::path::param::<u64>())
        .and(warp::path("boxscore"))
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_boxscore);

    let play_by_play = warp::path("api")
        .and(warp::path("games"))
        .and(warp::path::param::<u64>())
        .and(warp::path("play-by-play"))
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_play_by_play);

    let schedule = warp::path("api")
        .and(warp::path("schedule"))
        .and(warp::path("calendar"))
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_schedule_calendar);

    let standings = warp::path("api")
        .and(warp::path("standings"))
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_standings);

    let team_stats = warp::path("api")
        .and(warp::path("teams"))
        .and(warp::path::param::<String>())
        .and(warp::path("stats"))
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_team_stats);

    let team_roster = warp::path("api")
        .and(warp::path("teams"))
        .and(warp::path::param::<String>())
        .and(warp::path("roster"))
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_team_roster);

    // Player pool endpoints
    let players = warp::path("api")
        .and(warp::path("players"))
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<PlayerFilter>())
        .and(warp::header::optional::<String>("if-none-match"))
        .and(state_filter.clone())
        .and_then(get_players);

    let refresh = warp::path("api")
        .and(warp::path("players"))
        .and(warp::path("refresh"))
        .and(warp::path::end())
        .and(warp::post())
        .and(state_filter.clone())
        .and_then(refresh_players);

    let daily = warp::path("api")
        .and(warp::path("daily-players"))
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<DateQuery>())
        .and(state_filter.clone())
        .and_then(get_daily_players);

    // Lineup endpoints
    let lineups = warp::path("api")
        .and(warp::path("lineups"))
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body::<LineupRequest>(max_body))
        .and(state_filter.clone())
        .and_then(validate_lineup);

    let my_team = warp::path("api")
        .and(warp::path("my-team"))
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_my_team);

    let save_team = warp::path("api")
        .and(warp::path("my-team"))
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body::<SaveTeamRequest>(max_body))
        .and(state_filter.clone())
        .and_then(save_my_team);

    // Health check endpoint
    let health = warp::path("health").and(warp::path::end()).and(warp::get()).and_then(health_check);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type", "if-none-match"])
        .allow_methods(vec!["GET", "POST", "OPTIONS"]);

    games
        .or(game)
        .or(boxscore)
        .or(play_by_play)
        .or(schedule)
        .or(standings)
        .or(team_stats)
        .or(team_roster)
        .or(players)
        .or(refresh)
        .or(daily)
        .or(lineups)
        .or(my_team)
        .or(save_team)
        .or(health)
        .with(cors)
        .recover(handle_rejection)
        .with(warp::trace::request())
}
