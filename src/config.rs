// src/config.rs
use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::error::{CheckError, Result};

// --- 常量 ---
pub const BASE_URL_ENV_VAR: &str = "BANCHOO_BASE_URL";
pub const STARTUP_TIMEOUT_ENV_VAR: &str = "BANCHOO_STARTUP_TIMEOUT_SECS";
pub const DEFAULT_BASE_URL: &str = "http://localhost:18080";
pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(5);
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Everything the checks need to know about the target server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: Url,
    pub startup_timeout: Duration,
    pub poll_interval: Duration,
}

impl Config {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Config {
            base_url: parse_base_url(base_url)?,
            startup_timeout: DEFAULT_STARTUP_TIMEOUT,
            poll_interval: POLL_INTERVAL,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = get(BASE_URL_ENV_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Config::new(&base_url)?;

        if let Some(raw) = get(STARTUP_TIMEOUT_ENV_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                CheckError::Config(format!("{STARTUP_TIMEOUT_ENV_VAR} must be a whole number of seconds, got `{raw}`"))
            })?;
            if secs == 0 {
                return Err(CheckError::Config(format!("{STARTUP_TIMEOUT_ENV_VAR} must be greater than zero")));
            }
            config.startup_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout = timeout;
        self
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| CheckError::Config(format!("base URL `{raw}` is not valid: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(CheckError::Config(format!("base URL `{raw}` must use http or https")));
    }
    if url.cannot_be_a_base() || url.host().is_none() {
        return Err(CheckError::Config(format!("base URL `{raw}` has no host")));
    }

    // join() 会丢掉最后一段路径, 所以统一补上结尾的 '/'
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
