pub mod amenities;
pub mod fetch;
pub mod listing;
pub mod models;
pub mod page;
pub mod paginate;
mod scraper;
mod scraper_error;

pub use fetch::{Fetch, HttpFetcher};
pub use scraper::ListingsScraper;
pub use scraper_error::ScraperError;

use ::scraper::Selector;

pub(crate) fn selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|_| ScraperError::InvalidSelector(css.to_string()))
}
