use std::env;
use std::time::Duration;

/// Explicit runtime configuration handed to each component's constructor.
#[derive(Debug, Clone)]
pub struct MinerConfig {
    pub api_base_url: String,
    pub web_base_url: String,
    pub raw_base_url: String,
    /// The search API returns at most 1000 results (100 per page).
    pub api_page_limit: u32,
    /// The code search returns at most 1000 results (10 per page).
    pub crawl_page_limit: u32,
    pub per_page: u32,
    /// Pause between code search pages; GitHub is restrictive with
    /// requests per minute to the search page.
    pub crawl_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            web_base_url: "https://github.com".to_string(),
            raw_base_url: "https://raw.githubusercontent.com".to_string(),
            api_page_limit: 10,
            crawl_page_limit: 100,
            per_page: 100,
            crawl_delay: Duration::from_secs(2),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl MinerConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(delay_ms) = env::var("CRAWL_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.crawl_delay = Duration::from_millis(delay_ms);
        }

        if let Some(timeout_secs) = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.request_timeout = Duration::from_secs(timeout_secs);
        }

        config
    }
}
