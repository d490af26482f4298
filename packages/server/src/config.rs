use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables.
///
/// Provider credentials are optional here: a missing key never stops the
/// server from starting, it fails the requests that need it.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub specter_api_key: Option<String>,
    pub specter_base_url: Option<String>,
    pub brightdata_api_key: Option<String>,
    pub brightdata_dataset_id: Option<String>,
    pub brightdata_base_url: Option<String>,
    pub poll_interval: Duration,
    pub poll_max_wait: Duration,
    pub founder_limit: usize,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            openai_api_key: None,
            openai_model: openai_client::DEFAULT_MODEL.to_string(),
            openai_base_url: None,
            specter_api_key: None,
            specter_base_url: None,
            brightdata_api_key: None,
            brightdata_dataset_id: None,
            brightdata_base_url: None,
            poll_interval: Duration::from_secs(5),
            poll_max_wait: Duration::from_secs(90),
            founder_limit: 3,
            allowed_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Ok(Self {
            port: parse_or(get("PORT"), defaults.port).context("PORT must be a valid number")?,
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: get("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_base_url: get("OPENAI_BASE_URL"),
            specter_api_key: get("SPECTER_API_KEY"),
            specter_base_url: get("SPECTER_BASE_URL"),
            brightdata_api_key: get("BRIGHTDATA_API_KEY"),
            brightdata_dataset_id: get("BRIGHTDATA_DATASET_ID"),
            brightdata_base_url: get("BRIGHTDATA_BASE_URL"),
            poll_interval: Duration::from_secs(
                parse_or(get("BRIGHTDATA_POLL_INTERVAL_SECS"), 5u64)
                    .context("BRIGHTDATA_POLL_INTERVAL_SECS must be a number of seconds")?,
            ),
            poll_max_wait: Duration::from_secs(
                parse_or(get("BRIGHTDATA_MAX_WAIT_SECS"), 90u64)
                    .context("BRIGHTDATA_MAX_WAIT_SECS must be a number of seconds")?,
            ),
            founder_limit: parse_or(get("FOUNDER_LIMIT"), defaults.founder_limit)
                .context("FOUNDER_LIMIT must be a valid number")?,
            allowed_origins: get("ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Bright Data needs both the key and the dataset to be usable.
    pub fn brightdata_credentials(&self) -> Option<(&str, &str)> {
        match (&self.brightdata_api_key, &self.brightdata_dataset_id) {
            (Some(key), Some(dataset)) => Some((key, dataset)),
            _ => None,
        }
    }
}

fn parse_or<T>(value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(v) => Ok(v.parse()?),
        None => Ok(default),
    }
}
