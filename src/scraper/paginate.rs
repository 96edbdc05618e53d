// paginate.rs
use crate::scraper::ScraperError;
use url::Url;

/// One URL per results page, offsets `0, page_size, ...` below `total`.
///
/// The offset goes in the `s` query parameter, replacing any already on
/// `start_url`.
pub fn results_urls(
    start_url: &str,
    total: usize,
    page_size: usize,
) -> Result<Vec<String>, ScraperError> {
    let base = Url::parse(start_url).map_err(|e| ScraperError::InvalidUrl {
        url: start_url.to_string(),
        detail: e.to_string(),
    })?;

    if page_size == 0 {
        return Err(ScraperError::InvalidUrl {
            url: start_url.to_string(),
            detail: "page size must be positive".to_string(),
        });
    }

    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(k, _)| k != "s")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let urls = (0..total)
        .step_by(page_size)
        .map(|offset| {
            let mut url = base.clone();
            url.query_pairs_mut()
                .clear()
                .extend_pairs(kept.iter())
                .append_pair("s", &offset.to_string());
            url.to_string()
        })
        .collect();

    Ok(urls)
}
