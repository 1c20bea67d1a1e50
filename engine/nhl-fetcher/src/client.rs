//! NHL web API access
//!
//! [`NhlSource`] has one required method, [`NhlSource::fetch_json`], which
//! fetches a path under the API root. Every typed call is a provided method on
//! top of it, so the gateway and the pool builder run unchanged against the
//! live [`NhlClient`] or a canned source in tests.

use crate::config::FetcherConfig;
use crate::models::{PlayerLanding, Roster, StandingsResponse};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Upstream paths
pub mod endpoints {
    use chrono::NaiveDate;

    pub fn score(date: NaiveDate) -> String {
        format!("/v1/score/{}", date.format("%Y-%m-%d"))
    }

    pub fn game_landing(game_id: u64) -> String {
        format!("/v1/gamecenter/{game_id}/landing")
    }

    pub fn boxscore(game_id: u64) -> String {
        format!("/v1/gamecenter/{game_id}/boxscore")
    }

    pub fn play_by_play(game_id: u64) -> String {
        format!("/v1/gamecenter/{game_id}/play-by-play")
    }

    pub fn schedule_calendar() -> String {
        "/v1/schedule-calendar/now".to_string()
    }

    pub fn standings() -> String {
        "/v1/standings/now".to_string()
    }

    pub fn club_stats(team: &str) -> String {
        format!("/v1/club-stats/{team}/now")
    }

    pub fn roster(team: &str) -> String {
        format!("/v1/roster/{team}/current")
    }

    pub fn player_landing(player_id: u64) -> String {
        format!("/v1/player/{player_id}/landing")
    }
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T> {
    serde_json::from_value(value).with_context(|| format!("Failed to parse {what} JSON"))
}

#[async_trait::async_trait]
pub trait NhlSource: Send + Sync {
    /// GET `path` relative to the API root and return the JSON body
    async fn fetch_json(&self, path: &str) -> Result<Value>;

    async fn score(&self, date: NaiveDate) -> Result<Value> {
        self.fetch_json(&endpoints::score(date)).await
    }

    async fn game_landing(&self, game_id: u64) -> Result<Value> {
        self.fetch_json(&endpoints::game_landing(game_id)).await
    }

    async fn boxscore(&self, game_id: u64) -> Result<Value> {
        self.fetch_json(&endpoints::boxscore(game_id)).await
    }

    async fn play_by_play(&self, game_id: u64) -> Result<Value> {
        self.fetch_json(&endpoints::play_by_play(game_id)).await
    }

    async fn schedule_calendar(&self) -> Result<Value> {
        self.fetch_json(&endpoints::schedule_calendar()).await
    }

    async fn standings(&self) -> Result<Value> {
        self.fetch_json(&endpoints::standings()).await
    }

    async fn club_stats(&self, team: &str) -> Result<Value> {
        self.fetch_json(&endpoints::club_stats(team)).await
    }

    async fn roster_json(&self, team: &str) -> Result<Value> {
        self.fetch_json(&endpoints::roster(team)).await
    }

    async fn roster(&self, team: &str) -> Result<Roster> {
        let value = self.roster_json(team).await?;
        decode(value, "roster")
    }

    async fn player_landing(&self, player_id: u64) -> Result<PlayerLanding> {
        let value = self.fetch_json(&endpoints::player_landing(player_id)).await?;
        decode(value, "player landing")
    }

    /// Abbreviations of every team in the league standings
    async fn team_abbrevs(&self) -> Result<Vec<String>> {
        let standings: StandingsResponse = decode(self.standings().await?, "standings")?;
        Ok(standings
            .standings
            .into_iter()
            .map(|entry| entry.team_abbrev.default)
            .filter(|abbrev| !abbrev.is_empty())
            .collect())
    }
}

/// Live HTTP client for the NHL web API
#[derive(Clone)]
pub struct NhlClient {
    client: Client,
    base_url: String,
}

impl NhlClient {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl NhlSource for NhlClient {
    async fn fetch_json(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {path}"))?;

        if !response.status().is_success() {
            anyhow::bail!("API request {} failed with status: {}", path, response.status());
        }

        let body = response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON from {path}"))?;

        info!("Fetched {}", path);
        Ok(body)
    }
}


#[cfg(test)]
mod tests {
    use super::stub::StubSource;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_paths() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(endpoints::score(date), "/v1/score/2025-01-05");
        assert_eq!(endpoints::roster("EDM"), "/v1/roster/EDM/current");
        assert_eq!(endpoints::player_landing(8478402), "/v1/player/8478402/landing");
        assert_eq!(endpoints::play_by_play(1), "/v1/gamecenter/1/play-by-play");
    }

    #[test]
    fn test_client_trims_base_url() {
        let config =
            FetcherConfig { base_url: "http://localhost:9000/".to_string(), ..Default::default() };
        let client = NhlClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
    }

    #[tokio::test]
    async fn test_team_abbrevs_from_standings() {
        let source = StubSource::new().with(
            "/v1/standings/now",
            json!({"standings": [
                {"teamAbbrev": {"default": "WPG"}},
                {"teamAbbrev": {"default": "WSH"}}
            ]}),
        );

        assert_eq!(source.team_abbrevs().await.unwrap(), vec!["WPG", "WSH"]);
        assert_eq!(source.requests(), vec!["/v1/standings/now"]);
    }

    #[tokio::test]
    async fn test_missing_response_is_an_error() {
        let source = StubSource::new();
        assert!(source.roster("EDM").await.is_err());
    }
}
