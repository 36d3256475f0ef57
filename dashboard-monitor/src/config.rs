use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    // Backend
    pub api_base_url: String,

    // Service
    pub poll_interval: Duration,
    pub recent_limit: usize,

    // Map provider credential, passed through to the map layer untouched
    pub maps_api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let api_base_url = env("API_BASE_URL", "http://localhost:8000");
        let poll_interval = humantime::parse_duration(&env("POLL_INTERVAL", "30s"))
            .context("POLL_INTERVAL parse")?;
        let recent_limit: usize = env("RECENT_LIMIT", "10")
            .parse()
            .context("RECENT_LIMIT parse")?;
        let maps_api_key = env("MAPS_API_KEY", "");

        Ok(Self {
            api_base_url,
            poll_interval,
            recent_limit,
            maps_api_key,
        })
    }
}

fn env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
