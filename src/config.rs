// config.rs
use std::ops::RangeInclusive;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

/// Results shown per search page by the listings site.
pub const RESULTS_PER_PAGE: usize = 120;

#[derive(Debug, Error)]
#[error("Invalid value for {key}: '{value}' ({reason})")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub user_agent: String,
    pub timeout: Duration,
    /// Seconds to wait before each results page.
    pub page_delay_secs: RangeInclusive<u64>,
    /// Seconds to wait before each detail page.
    pub detail_delay_secs: RangeInclusive<u64>,
    pub page_size: usize,
    pub max_consecutive_failures: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            page_delay_secs: 2..=4,
            detail_delay_secs: 1..=2,
            page_size: RESULTS_PER_PAGE,
            max_consecutive_failures: 3,
        }
    }
}

impl ScrapeConfig {
    /// Defaults, overridden by `CL_*` environment variables when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(ua) = lookup("CL_USER_AGENT") {
            cfg.user_agent = ua;
        }

        if let Some(raw) = lookup("CL_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError {
                key: "CL_TIMEOUT_SECS",
                value: raw.clone(),
                reason: e.to_string(),
            })?;
            cfg.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("CL_PAGE_DELAY_SECS") {
            cfg.page_delay_secs = parse_range("CL_PAGE_DELAY_SECS", &raw)?;
        }

        if let Some(raw) = lookup("CL_DETAIL_DELAY_SECS") {
            cfg.detail_delay_secs = parse_range("CL_DETAIL_DELAY_SECS", &raw)?;
        }

        Ok(cfg)
    }

    /// No pacing at all; for tests and local fixtures.
    #[cfg(test)]
    pub fn without_delays() -> Self {
        Self {
            page_delay_secs: 0..=0,
            detail_delay_secs: 0..=0,
            ..Self::default()
        }
    }
}

/// Parses "2-4" (or a single "3") into an inclusive range.
fn parse_range(key: &'static str, raw: &str) -> Result<RangeInclusive<u64>, ConfigError> {
    let err = |reason: &str| ConfigError {
        key,
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let (lo, hi) = match raw.split_once('-') {
        Some((lo, hi)) => (lo.trim(), hi.trim()),
        None => (raw.trim(), raw.trim()),
    };

    let lo: u64 = lo.parse().map_err(|_| err("expected an integer"))?;
    let hi: u64 = hi.parse().map_err(|_| err("expected an integer"))?;

    if lo > hi {
        return Err(err("min is greater than max"));
    }

    Ok(lo..=hi)
}
