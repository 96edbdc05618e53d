// listing.rs
use crate::domain::listing::Listing;
use crate::scraper::{selector, ScraperError};
use scraper::ElementRef;
use tracing::warn;

/// Pulls one `li.result-row` apart into a `Listing`.
///
/// Date, title, link and price must be present. Neighborhood, bedrooms and
/// square footage fall back to `None` when the row doesn't carry them.
/// Detail-page fields are left empty here.
pub fn extract_listing(row: ElementRef<'_>) -> Result<Listing, ScraperError> {
    let date_sel = selector("time.result-date")?;
    let title_sel = selector("a.result-title.hdrlnk")?;
    let price_sel = selector("span.result-price")?;
    let hood_sel = selector("span.result-hood")?;
    let housing_sel = selector("span.housing")?;

    let date = row
        .select(&date_sel)
        .next()
        .map(element_text)
        .ok_or_else(|| ScraperError::malformed("date", "time.result-date missing"))?;

    let title_el = row
        .select(&title_sel)
        .next()
        .ok_or_else(|| ScraperError::malformed("title", "a.result-title missing"))?;
    let title = element_text(title_el);
    let link = title_el
        .value()
        .attr("href")
        .map(str::to_string)
        .ok_or_else(|| ScraperError::malformed("link", "href missing on title anchor"))?;

    let price_text = row
        .select(&price_sel)
        .next()
        .map(element_text)
        .ok_or_else(|| ScraperError::malformed("price", "span.result-price missing"))?;
    let price = parse_price(&price_text)?;

    let neighborhood = row
        .select(&hood_sel)
        .next()
        .map(element_text)
        .and_then(|t| strip_parens(&t));

    let (bedrooms, sqft) = match row.select(&housing_sel).next() {
        Some(el) => parse_housing(&element_text(el)),
        None => (None, None),
    };

    Ok(Listing {
        date,
        title,
        link,
        price,
        bedrooms,
        sqft,
        neighborhood,
        bathrooms: None,
        amenities: None,
    })
}

pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// "$1,895" -> 1895
pub fn parse_price(text: &str) -> Result<i64, ScraperError> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();

    cleaned
        .parse::<i64>()
        .map_err(|e| ScraperError::malformed("price", format!("'{text}': {e}")))
}

/// " (lower haight) " -> "lower haight"
fn strip_parens(text: &str) -> Option<String> {
    let mut chars = text.trim().chars();
    chars.next();
    chars.next_back();
    let inner = chars.as_str().trim();

    if inner.is_empty() {
        None
    } else {
        Some(inner.to_string())
    }
}

/// Splits the combined housing field, e.g. "2br - 850ft2 -".
///
/// With fewer than three tokens only one of the two values is present and
/// the suffix of the first token says which.
pub fn parse_housing(text: &str) -> (Option<u32>, Option<u32>) {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let Some(first) = tokens.first() else {
        return (None, None);
    };

    if tokens.len() < 3 {
        if first.ends_with("br") {
            (parse_bedrooms(first), None)
        } else {
            (None, parse_sqft(first))
        }
    } else {
        (parse_bedrooms(first), parse_sqft(tokens[2]))
    }
}

fn parse_bedrooms(token: &str) -> Option<u32> {
    parse_with_suffix(token, &["br"], "bedrooms")
}

fn parse_sqft(token: &str) -> Option<u32> {
    parse_with_suffix(token, &["ft2", "ft²", "sqft"], "sqft")
}

fn parse_with_suffix(token: &str, suffixes: &[&str], field: &str) -> Option<u32> {
    let digits = suffixes
        .iter()
        .find_map(|s| token.strip_suffix(s))
        .unwrap_or(token);

    match digits.parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!(field, token, "unparseable housing token, treating as missing");
            None
        }
    }
}
