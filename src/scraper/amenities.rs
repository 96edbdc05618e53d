// amenities.rs
use crate::scraper::fetch::{Fetch, Pacer};
use crate::scraper::listing::element_text;
use crate::scraper::models::PostDetails;
use crate::scraper::{selector, ScraperError};
use scraper::{ElementRef, Html};
use tracing::{info, warn};

/// Reads bathroom count and amenities from a listing's detail page.
///
/// Each post has up to three `p.attrgroup` blocks, none of them required:
/// bed/bath info, open house dates, then amenities. Which block holds what
/// is inferred from how many there are.
pub fn parse_post_details(html: &str) -> Result<PostDetails, ScraperError> {
    let document = Html::parse_document(html);
    let group_sel = selector("p.attrgroup")?;

    let groups: Vec<Vec<String>> = document
        .select(&group_sel)
        .map(group_items)
        .collect::<Result<_, _>>()?;

    let details = match groups.len() {
        0 => PostDetails::default(),
        1 => {
            let items = &groups[0];
            match bathrooms_from(items) {
                Some(bath) => PostDetails {
                    bathrooms: Some(bath),
                    amenities: None,
                },
                None => PostDetails {
                    bathrooms: None,
                    amenities: non_empty(items.clone()),
                },
            }
        }
        n => {
            // With three groups the middle one is open house dates.
            let amenities = if n == 2 { &groups[1] } else { &groups[2] };
            PostDetails {
                bathrooms: bathrooms_from(&groups[0]),
                amenities: non_empty(amenities.clone()),
            }
        }
    };

    Ok(details)
}

/// Items of one attribute group: one per `<span>`, or one per non-blank line
/// when the group has no spans.
fn group_items(group: ElementRef<'_>) -> Result<Vec<String>, ScraperError> {
    let span_sel = selector("span")?;

    let spans: Vec<String> = group
        .select(&span_sel)
        .map(element_text)
        .filter(|s| !s.is_empty())
        .collect();

    if !spans.is_empty() {
        return Ok(spans);
    }

    Ok(group
        .text()
        .collect::<String>()
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}

/// "1BR / 1.5Ba" -> "1.5Ba"
fn bathrooms_from(items: &[String]) -> Option<String> {
    let first = items.first()?;
    if !first.ends_with("Ba") {
        return None;
    }
    first.split(" / ").last().map(|s| s.trim().to_string())
}

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Fetches every detail page in order, pacing each request.
///
/// The result lines up one-to-one with `urls`. A failed or non-200 fetch
/// yields empty details instead of dropping the row.
pub fn fetch_post_details<F: Fetch + ?Sized>(
    fetcher: &F,
    pacer: &Pacer,
    urls: &[String],
) -> Vec<PostDetails> {
    let mut out = Vec::with_capacity(urls.len());

    for url in urls {
        pacer.wait();

        let details = match fetcher.get(url) {
            Ok(page) if page.is_success() => parse_post_details(&page.body).unwrap_or_else(|e| {
                warn!(url = %url, "detail page parse failed: {e}");
                PostDetails::default()
            }),
            Ok(page) => {
                warn!(url = %page.url, status = page.status, "detail page returned non-200");
                PostDetails::default()
            }
            Err(e) => {
                warn!(url = %url, "detail page fetch failed: {e}");
                PostDetails::default()
            }
        };

        out.push(details);
    }

    info!(posts = out.len(), "individual posts scrape complete");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(groups: &[&str]) -> String {
        let body: String = groups
            .iter()
            .map(|g| format!("<p class=\"attrgroup\">{g}</p>"))
            .collect();
        format!("<html><body><section>{body}</section></body></html>")
    }

    const BEDBATH: &str = "<span><b>1BR</b> / <b>1Ba</b></span>\n<span><b>700</b>ft2</span>";
    const OPEN_HOUSE: &str = "<span>open house dates</span>\n<span>saturday 2021-06-05</span>";
    const AMENITIES: &str = "<span>cats are OK - purrr</span>\n<span>w/d in unit</span>";

    #[test]
    fn no_groups_is_all_missing() {
        let d = parse_post_details(&page(&[])).unwrap();
        assert_eq!(d, PostDetails::default());
    }

    #[test]
    fn single_group_with_bathrooms() {
        let d = parse_post_details(&page(&[BEDBATH])).unwrap();
        assert_eq!(d.bathrooms.as_deref(), Some("1Ba"));
        assert_eq!(d.amenities, None);
    }

    #[test]
    fn single_group_of_amenities() {
        let d = parse_post_details(&page(&[AMENITIES])).unwrap();
        assert_eq!(d.bathrooms, None);
        assert_eq!(
            d.amenities,
            Some(vec!["cats are OK - purrr".to_string(), "w/d in unit".to_string()])
        );
    }

    #[test]
    fn two_groups_bath_then_amenities() {
        let d = parse_post_details(&page(&[BEDBATH, AMENITIES])).unwrap();
        assert_eq!(d.bathrooms.as_deref(), Some("1Ba"));
        assert_eq!(d.amenities.unwrap().len(), 2);
    }

    #[test]
    fn three_groups_skip_open_house() {
        let d = parse_post_details(&page(&[BEDBATH, OPEN_HOUSE, AMENITIES])).unwrap();
        assert_eq!(d.bathrooms.as_deref(), Some("1Ba"));
        assert_eq!(d.amenities.unwrap()[1], "w/d in unit");
    }

    #[test]
    fn two_groups_without_bathrooms() {
        let d = parse_post_details(&page(&["<span>available jun 1</span>", AMENITIES])).unwrap();
        assert_eq!(d.bathrooms, None);
        assert!(d.amenities.is_some());
    }

    #[test]
    fn plain_text_group_splits_on_lines() {
        let d = parse_post_details(&page(&["\nlaundry on site\n\n  street parking \n"])).unwrap();
        assert_eq!(
            d.amenities,
            Some(vec!["laundry on site".to_string(), "street parking".to_string()])
        );
    }
}
