// page.rs
use crate::domain::listing::ListingTable;
use crate::scraper::listing::{element_text, extract_listing};
use crate::scraper::{selector, ScraperError};
use scraper::Html;
use tracing::{info, warn};

/// Outcome of parsing one results page.
#[derive(Debug)]
pub struct PageListings {
    pub table: ListingTable,
    pub skipped: usize,
}

/// Runs the listing extractor over every `li.result-row` on a results page.
/// Rows missing a required field are logged and skipped.
pub fn parse_listing_page(html: &str) -> Result<PageListings, ScraperError> {
    let document = Html::parse_document(html);
    let row_sel = selector("li.result-row")?;

    let mut table = ListingTable::new();
    let mut skipped = 0;

    for (i, row) in document.select(&row_sel).enumerate() {
        match extract_listing(row) {
            Ok(listing) => table.push(listing),
            Err(e) => {
                skipped += 1;
                warn!(row = i, "skipping listing row: {e}");
            }
        }
    }

    info!(scraped = table.len(), skipped, "listing page scrape complete");

    Ok(PageListings { table, skipped })
}

/// Total number of search results, from `span.totalcount`.
pub fn parse_total_count(html: &str) -> Result<usize, ScraperError> {
    let document = Html::parse_document(html);
    let count_sel = selector("span.totalcount")?;

    let text = document
        .select(&count_sel)
        .next()
        .map(element_text)
        .ok_or(ScraperError::MissingTotalCount)?;

    text.replace(',', "")
        .parse::<usize>()
        .map_err(|_| ScraperError::MissingTotalCount)
}
