// scraper.rs
use crate::config::ScrapeConfig;
use crate::domain::listing::ListingTable;
use crate::scraper::amenities::fetch_post_details;
use crate::scraper::fetch::{Fetch, HttpFetcher, Pacer};
use crate::scraper::models::FetchedPage;
use crate::scraper::page::{parse_listing_page, parse_total_count};
use crate::scraper::paginate::results_urls;
use crate::scraper::ScraperError;
use tracing::{info, warn};

/// Two-level scrape: results pages, then each listing's detail page.
pub struct ListingsScraper<F: Fetch> {
    fetcher: F,
    config: ScrapeConfig,
    page_pacer: Pacer,
    detail_pacer: Pacer,
}

impl ListingsScraper<HttpFetcher> {
    pub fn from_config(config: ScrapeConfig) -> Result<Self, ScraperError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::new(fetcher, config))
    }
}

impl<F: Fetch> ListingsScraper<F> {
    pub fn new(fetcher: F, config: ScrapeConfig) -> Self {
        let page_pacer = Pacer::new(config.page_delay_secs.clone());
        let detail_pacer = Pacer::new(config.detail_delay_secs.clone());

        Self {
            fetcher,
            config,
            page_pacer,
            detail_pacer,
        }
    }

    #[cfg(test)]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn fetch_ok(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        let page = self.fetcher.get(url)?;
        if !page.is_success() {
            warn!(url = %page.url, status = page.status, "results page returned non-200");
            return Err(ScraperError::HttpStatus {
                url: page.url,
                status: page.status,
            });
        }
        Ok(page)
    }

    /// One results page plus a detail fetch for each of its rows.
    pub fn full_page_scrape(&self, url: &str) -> Result<ListingTable, ScraperError> {
        let page = self.fetch_ok(url)?;
        let parsed = parse_listing_page(&page.body)?;

        let links = parsed.table.links();
        let details = fetch_post_details(&self.fetcher, &self.detail_pacer, &links);

        Ok(parsed.table.merge_details(details))
    }

    /// Every results page for a search, concatenated in page order.
    ///
    /// A page that fails is logged and skipped. After
    /// `max_consecutive_failures` failures in a row the scrape stops early
    /// and returns what it has.
    pub fn full_listings_scrape(&self, start_url: &str) -> Result<ListingTable, ScraperError> {
        let first = self.fetch_ok(start_url)?;
        let total = parse_total_count(&first.body)?;
        let urls = results_urls(start_url, total, self.config.page_size)?;
        let total_pages = urls.len();

        info!(total, total_pages, "search results found");

        let mut tables = Vec::with_capacity(total_pages);
        let mut consecutive_failures = 0;

        for (i, url) in urls.iter().enumerate() {
            let page_no = i + 1;
            self.page_pacer.wait();

            info!("Scraping page {page_no} of {total_pages}...");

            match self.full_page_scrape(url) {
                Ok(table) => {
                    info!(rows = table.len(), "Page {page_no} of {total_pages} scrape complete");
                    tables.push(table);
                    consecutive_failures = 0;
                }
                Err(e) => {
                    consecutive_failures += 1;
                    warn!("Page {page_no} failed (attempt {consecutive_failures}): {e}");

                    if consecutive_failures >= self.config.max_consecutive_failures {
                        warn!("Too many consecutive failures, stopping scrape");
                        break;
                    }
                }
            }
        }

        Ok(ListingTable::concat(tables))
    }
}
