use serde::{Deserialize, Serialize};

/// Configuration for the NHL fetcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// NHL web API base URL
    pub base_url: String,

    /// Season whose stats count, as the API encodes it (e.g. 20242025)
    pub season: u32,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Upper bound on in-flight player stat requests
    pub max_concurrent_requests: usize,

    /// Random price range
    pub pricing: PriceRange,
}

/// Half-open price range `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self { min: 20, max: 50 }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-web.nhle.com".to_string(),
            season: 20242025,
            request_timeout_secs: 30,
            max_concurrent_requests: 16,
            pricing: PriceRange::default(),
        }
    }
}

impl FetcherConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `NHL_*` variables looked up through `var`
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(base_url) = var("NHL_API_BASE_URL") {
            self.base_url = base_url;
        }

        if let Some(season) = var("NHL_SEASON") {
            self.season =
                season.parse().map_err(|_| anyhow::anyhow!("Invalid NHL_SEASON: {}", season))?;
        }

        if let Some(timeout) = var("NHL_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = timeout.parse().unwrap_or(30);
        }

        if let Some(limit) = var("NHL_MAX_CONCURRENT_REQUESTS") {
            self.max_concurrent_requests = limit.parse().unwrap_or(16);
        }

        if let Some(min) = var("NHL_MIN_PRICE") {
            self.pricing.min = min.parse().unwrap_or(20);
        }

        if let Some(max) = var("NHL_MAX_PRICE") {
            self.pricing.max = max.parse().unwrap_or(50);
        }

        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("NHL API base URL cannot be empty");
        }

        if self.max_concurrent_requests == 0 {
            anyhow::bail!("max_concurrent_requests must be greater than 0");
        }

        if self.pricing.min >= self.pricing.max {
            anyhow::bail!(
                "Price range is empty: min {} must be below max {}",
                self.pricing.min,
                self.pricing.max
            );
        }

        Ok(())
    }
}
