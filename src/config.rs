use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Jikan API base URL
    #[serde(default = "default_jikan_api_url")]
    pub jikan_api_url: String,

    /// Fixed delay between outbound API calls, in milliseconds
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,

    /// Outbound HTTP request timeout, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Number of hits requested from the search endpoint
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,

    /// Number of titles recommended when the caller doesn't ask for a count
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    /// Upper bound on genre queries issued per recommendation request
    #[serde(default = "default_max_genre_queries")]
    pub max_genre_queries: usize,

    /// Titles requested per genre query
    #[serde(default = "default_candidates_per_genre")]
    pub candidates_per_genre: u32,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_jikan_api_url() -> String {
    "https://api.jikan.moe/v4".to_string()
}

fn default_pacing_ms() -> u64 {
    1000
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_search_limit() -> u32 {
    10
}

fn default_recommendation_limit() -> usize {
    5
}

fn default_max_genre_queries() -> usize {
    7
}

fn default_candidates_per_genre() -> u32 {
    25
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jikan_api_url: default_jikan_api_url(),
            pacing_ms: default_pacing_ms(),
            http_timeout_secs: default_http_timeout_secs(),
            search_limit: default_search_limit(),
            recommendation_limit: default_recommendation_limit(),
            max_genre_queries: default_max_genre_queries(),
            candidates_per_genre: default_candidates_per_genre(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
