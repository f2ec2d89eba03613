use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use listing_search::SearchConfig;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub openai_api_key: String,
    pub openai_model: String,
    pub search: SearchConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let mut search = SearchConfig::default();
        if let Ok(raw) = env::var("MAX_LISTINGS") {
            search = search.with_max_listings(
                raw.parse().context("MAX_LISTINGS must be a valid number")?,
            );
        }
        if let Ok(raw) = env::var("SHOWN_LISTINGS") {
            search = search.with_shown_listings(
                raw.parse().context("SHOWN_LISTINGS must be a valid number")?,
            );
        }
        if let Ok(raw) = env::var("MAX_WORKERS") {
            search = search.with_max_workers(
                raw.parse().context("MAX_WORKERS must be a valid number")?,
            );
        }

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            openai_api_key: env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY must be set")?,
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            search,
        })
    }
}
