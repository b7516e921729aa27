//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local use.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://prod.zh.igpsport.com/service/";

/// Rows requested per list page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Overall deadline applied to every HTTP call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Account login (phone number or email)
    pub username: String,
    /// Account password
    pub password: String,
    /// API root; every endpoint path is joined onto it
    pub base_url: String,
    /// Page size used when walking the activity list
    pub page_size: u32,
    /// Per-call HTTP deadline
    pub request_timeout: Duration,
    /// Worker count for concurrent downloads (0 = default)
    pub max_concurrency: i64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            username: "test_user".to_string(),
            password: "test_password".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_concurrency: 0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let page_size = parse_var("IGPSPORT_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError::Invalid("IGPSPORT_PAGE_SIZE"));
        }

        Ok(Self {
            username: env::var("IGPSPORT_USERNAME")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("IGPSPORT_USERNAME"))?,
            password: env::var("IGPSPORT_PASSWORD")
                .map_err(|_| ConfigError::Missing("IGPSPORT_PASSWORD"))?,
            base_url: env::var("IGPSPORT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            page_size,
            request_timeout: Duration::from_secs(parse_var(
                "IGPSPORT_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            max_concurrency: parse_var("IGPSPORT_MAX_CONCURRENCY", 0)?,
        })
    }

    /// Config pointing at a mock server, used by tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Read an optional numeric variable, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
