//! Runtime configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_STORAGE_PATH: &str = "cart-storage.json";
pub const DEFAULT_MAILBOX_SIZE: usize = 32;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings of a cart session.
#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    /// Base URL of the stock/catalog backend.
    pub api_url: String,
    /// File backing the persistent key-value store.
    pub storage_path: PathBuf,
    /// Capacity of the cart actor's mailbox.
    pub mailbox_size: usize,
    /// Per-request timeout for backend calls. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            mailbox_size: DEFAULT_MAILBOX_SIZE,
            request_timeout: None,
        }
    }
}

impl CartConfig {
    /// Reads `CART_API_URL`, `CART_STORAGE_PATH`, `CART_MAILBOX_SIZE` and
    /// `CART_REQUEST_TIMEOUT_MS`, loading a `.env` file first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source; unset keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("CART_API_URL") {
            reqwest::Url::parse(&url).map_err(|e| ConfigError::InvalidValue {
                key: "CART_API_URL",
                value: url.clone(),
                reason: e.to_string(),
            })?;
            config.api_url = url;
        }
        if let Some(path) = lookup("CART_STORAGE_PATH") {
            config.storage_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup("CART_MAILBOX_SIZE") {
            config.mailbox_size = parse_positive("CART_MAILBOX_SIZE", &raw)? as usize;
        }
        if let Some(raw) = lookup("CART_REQUEST_TIMEOUT_MS") {
            let millis = parse_positive("CART_REQUEST_TIMEOUT_MS", &raw)?;
            config.request_timeout = Some(Duration::from_millis(millis));
        }

        Ok(config)
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
        reason,
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero".to_string())),
        Ok(n) => Ok(n),
        Err(e) => Err(invalid(e.to_string())),
    }
}
