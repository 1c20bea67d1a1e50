//! Configuration for the hockey gateway

use anyhow::{Context, Result};
use fantasy_scoring::ScoringTable;
use lineup_validator::{BudgetScheme, DailyScheme};
use nhl_fetcher::FetcherConfig;
use persistence::PersistenceConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration for the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Player pool cache configuration
    pub cache: CacheConfig,

    /// Saved team storage
    pub storage: PersistenceConfig,

    /// NHL API access
    pub fetcher: FetcherConfig,

    /// Fantasy point weights
    pub scoring: ScoringTable,

    /// Roster rules for both lineup flows
    pub lineups: LineupConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Maximum accepted request body in bytes
    pub max_body_bytes: u64,
}

/// Player pool cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a built player pool is served before rebuilding
    pub player_pool_ttl_secs: u64,
}

/// Roster rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LineupConfig {
    /// Saved team: capacities and salary cap
    pub budget: BudgetScheme,

    /// Daily lineup: slot layout and optional cap
    pub daily: DailyScheme,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: crate::DEFAULT_PORT,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { player_pool_ttl_secs: 3600 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl CacheConfig {
    pub fn player_pool_ttl(&self) -> Duration {
        Duration::from_secs(self.player_pool_ttl_secs)
    }
}

impl GatewayConfig {
    /// Get the server address
    pub fn server_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| format!("Invalid server address {}:{}", self.server.host, self.server.port))
    }

    /// Load configuration: optional TOML file, then `.env`, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                tracing::debug!("Loading configuration from file: {:?}", path);
                Self::load_from_file(path)?
            }
            Some(path) => anyhow::bail!("Configuration file not found: {:?}", path),
            None => Self::default(),
        };

        dotenv::dotenv().ok();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {path:?}"))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration TOML")
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Override fields from `PORT`, `HOCKEY_*` and `NHL_*` variables looked up through `var`
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(port) = var("PORT") {
            self.server.port = port.parse().with_context(|| format!("Invalid PORT: {port}"))?;
        }

        if let Some(host) = var("HOCKEY_HOST") {
            self.server.host = host;
        }

        if let Some(data_dir) = var("HOCKEY_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(data_dir);
        }

        if let Some(ttl) = var("HOCKEY_CACHE_TTL_SECS") {
            self.cache.player_pool_ttl_secs = ttl.parse().unwrap_or(3600);
        }

        if let Some(level) = var("HOCKEY_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(format) = var("HOCKEY_LOG_FORMAT") {
            self.logging.format = format;
        }

        self.fetcher.apply_env(var)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.cache.player_pool_ttl_secs == 0 {
            anyhow::bail!("Player pool cache TTL must be greater than 0");
        }

        if self.lineups.budget.roster_size() == 0 {
            anyhow::bail!("Budget lineup must have at least one position");
        }

        if !matches!(self.logging.format.as_str(), "json" | "pretty" | "compact") {
            anyhow::bail!("Unknown log format: {}", self.logging.format);
        }

        self.storage.validate().map_err(|e| anyhow::anyhow!("Invalid storage config: {e}"))?;
        self.fetcher.validate()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = GatewayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.cache.player_pool_ttl(), Duration::from_secs(3600));
        assert_eq!(config.scoring, ScoringTable::default());
        assert_eq!(config.lineups.budget.cap, 200);
        assert_eq!(config.lineups.daily.budget_cap, None);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = GatewayConfig::default();
        config
            .apply_env(env(&[
                ("PORT", "8088"),
                ("HOCKEY_DATA_DIR", "/tmp/hockey"),
                ("HOCKEY_LOG_FORMAT", "json"),
                ("NHL_SEASON", "20252026"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/hockey"));
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.fetcher.season, 20252026);
        assert_eq!(config.server_addr().unwrap().port(), 8088);
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut config = GatewayConfig::default();
        assert!(config.apply_env(env(&[("PORT", "eighty")])).is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config = GatewayConfig::from_toml(
            r#"
            [server]
            port = 9000

            [cache]
            player_pool_ttl_secs = 60

            [scoring.goalie]
            save = 0.1
            win = 5.0
            overtime_loss = 2.0
            goal_against = -0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.cache.player_pool_ttl_secs, 60);
        assert_eq!(config.scoring.goalie.win, 5.0);
        assert_eq!(config.scoring.skater.goal, 5.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_single_scoring_weight_override() {
        let config = GatewayConfig::from_toml(
            r#"
            [scoring.skater]
            goal = 3.0
            "#,
        )
        .unwrap();

        assert_eq!(config.scoring.skater.goal, 3.0);
        assert_eq!(config.scoring.skater.hit, 0.5);
        assert_eq!(config.scoring.goalie, ScoringTable::default().goalie);
    }

    #[test]
    fn test_save_and_load_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("gateway.toml");

        let mut config = GatewayConfig::default();
        config.server.port = 7000;
        config.save_to_file(&path).unwrap();

        assert_eq!(GatewayConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let mut config = GatewayConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }
}
