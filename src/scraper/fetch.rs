// fetch.rs
use crate::config::ScrapeConfig;
use crate::scraper::models::FetchedPage;
use crate::scraper::ScraperError;
use rand::Rng;
use reqwest::blocking::Client;
use std::ops::RangeInclusive;
use std::time::Duration;
use tracing::debug;

/// Blocking GET. Non-200 statuses come back as pages, not errors;
/// callers decide what a bad status means for them.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<FetchedPage, ScraperError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        let start = std::time::Instant::now();

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        debug!(url, status, elapsed = ?start.elapsed(), "fetched");

        Ok(FetchedPage {
            url: url.to_string(),
            status,
            body,
        })
    }
}

/// Randomized pause between requests, in whole seconds.
#[derive(Debug, Clone)]
pub struct Pacer {
    secs: RangeInclusive<u64>,
}

impl Pacer {
    pub fn new(secs: RangeInclusive<u64>) -> Self {
        Self { secs }
    }

    pub fn next_delay(&self) -> Duration {
        let (lo, hi) = (*self.secs.start(), *self.secs.end());
        if hi == 0 || lo > hi {
            return Duration::ZERO;
        }
        Duration::from_secs(rand::thread_rng().gen_range(lo..=hi))
    }

    pub fn wait(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}
