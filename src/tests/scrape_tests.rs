use super::utils::{detail_page, results_page, FakeFetcher, Row};
use crate::config::ScrapeConfig;
use crate::scraper::listing::extract_listing;
use crate::scraper::page::parse_listing_page;
use crate::scraper::{ListingsScraper, ScraperError};
use scraper::{Html, Selector};

const START: &str = "https://city.example.org/search/apa?max_price=4000";

fn page_url(offset: usize) -> String {
    format!("{START}&s={offset}")
}

fn link(n: usize) -> String {
    format!("https://city.example.org/apa/d/{n}.html")
}

fn first_row(html: &str) -> Result<crate::domain::listing::Listing, ScraperError> {
    let doc = Html::parse_document(html);
    let sel = Selector::parse("li.result-row").unwrap();
    let row = doc.select(&sel).next().expect("fixture has a row");
    extract_listing(row)
}

#[test]
fn row_with_every_field_is_recovered_exactly() {
    let l = link(1);
    let row = Row {
        date: "Jun  3",
        title: "Sunny 2br near park",
        link: &l,
        price: Some("$3,150"),
        hood: Some("inner sunset"),
        housing: Some("2br -\n  850ft2 -"),
    };

    let listing = first_row(&results_page(&[row], None)).unwrap();

    assert_eq!(listing.date, "Jun  3");
    assert_eq!(listing.title, "Sunny 2br near park");
    assert_eq!(listing.link, l);
    assert_eq!(listing.price, 3150);
    assert_eq!(listing.bedrooms, Some(2));
    assert_eq!(listing.sqft, Some(850));
    assert_eq!(listing.neighborhood.as_deref(), Some("inner sunset"));
    assert_eq!(listing.bathrooms, None);
    assert_eq!(listing.amenities, None);
}

#[test]
fn row_missing_optional_fields_gets_missing_markers() {
    let l = link(2);
    let listing = first_row(&results_page(&[Row::new(&l)], None)).unwrap();

    assert_eq!(listing.price, 2450);
    assert_eq!(listing.neighborhood, None);
    assert_eq!(listing.bedrooms, None);
    assert_eq!(listing.sqft, None);
}

#[test]
fn single_housing_value_is_disambiguated_by_suffix() {
    let l = link(3);

    let brs_only = Row {
        housing: Some("1br -"),
        ..Row::new(&l)
    };
    let listing = first_row(&results_page(&[brs_only], None)).unwrap();
    assert_eq!((listing.bedrooms, listing.sqft), (Some(1), None));

    let sqft_only = Row {
        housing: Some("500ft2 -"),
        ..Row::new(&l)
    };
    let listing = first_row(&results_page(&[sqft_only], None)).unwrap();
    assert_eq!((listing.bedrooms, listing.sqft), (None, Some(500)));
}

#[test]
fn row_without_price_is_malformed() {
    let l = link(4);
    let row = Row {
        price: None,
        ..Row::new(&l)
    };
    let err = first_row(&results_page(&[row], None)).unwrap_err();
    assert!(matches!(
        err,
        ScraperError::MalformedListing { field: "price", .. }
    ));
}

#[test]
fn page_aggregator_skips_malformed_rows_and_counts_the_rest() {
    let (l1, l2, l3) = (link(1), link(2), link(3));
    let rows = [
        Row::new(&l1),
        Row {
            price: None,
            ..Row::new(&l2)
        },
        Row::new(&l3),
    ];

    let parsed = parse_listing_page(&results_page(&rows, None)).unwrap();
    assert_eq!(parsed.table.len(), 2);
    assert_eq!(parsed.skipped, 1);
    assert_eq!(parsed.table.links(), vec![l1, l3]);
}

#[test]
fn full_page_scrape_merges_detail_pages() {
    let (l1, l2, l3) = (link(1), link(2), link(3));
    let url = page_url(0);

    let fetcher = FakeFetcher::new()
        .with_page(
            &url,
            200,
            results_page(&[Row::new(&l1), Row::new(&l2), Row::new(&l3)], None),
        )
        .with_page(
            &l1,
            200,
            detail_page(&[
                &["1BR / 1Ba", "available jun 1"],
                &["open house dates", "saturday 2021-06-05"],
                &["cats are OK - purrr", "w/d in unit"],
            ]),
        )
        .with_page(&l2, 404, "gone")
        .with_page(&l3, 200, detail_page(&[]));

    let scraper = ListingsScraper::new(fetcher, ScrapeConfig::without_delays());
    let table = scraper.full_page_scrape(&url).unwrap();

    assert_eq!(table.len(), 3);
    let rows = table.rows();

    assert_eq!(rows[0].bathrooms.as_deref(), Some("1Ba"));
    assert_eq!(
        rows[0].amenities,
        Some(vec!["cats are OK - purrr".to_string(), "w/d in unit".to_string()])
    );
    // 404 detail page keeps the row with missing markers
    assert_eq!(rows[1].link, l2);
    assert_eq!(rows[1].bathrooms, None);
    assert_eq!(rows[1].amenities, None);
    assert_eq!(rows[2].amenities, None);
}

#[test]
fn unreachable_detail_page_keeps_the_row() {
    let (l1, l2) = (link(1), link(2));
    let url = page_url(0);

    // l2 has no canned page, so its fetch fails at the transport level
    let fetcher = FakeFetcher::new()
        .with_page(&url, 200, results_page(&[Row::new(&l1), Row::new(&l2)], None))
        .with_page(&l1, 200, detail_page(&[&["1BR / 1Ba"], &["w/d in unit"]]));

    let scraper = ListingsScraper::new(fetcher, ScrapeConfig::without_delays());
    let table = scraper.full_page_scrape(&url).unwrap();

    assert_eq!(table.len(), 2);
    let rows = table.rows();
    assert_eq!(rows[0].bathrooms.as_deref(), Some("1Ba"));
    assert_eq!(rows[1].link, l2);
    assert_eq!(rows[1].price, 2450);
    assert_eq!(rows[1].bathrooms, None);
    assert_eq!(rows[1].amenities, None);
    assert!(scraper.fetcher().requests().contains(&l2));
}

#[test]
fn non_200_results_page_is_an_error() {
    let url = page_url(0);
    let fetcher = FakeFetcher::new().with_page(&url, 503, "busy");
    let scraper = ListingsScraper::new(fetcher, ScrapeConfig::without_delays());

    assert!(matches!(
        scraper.full_page_scrape(&url),
        Err(ScraperError::HttpStatus { status: 503, .. })
    ));
}

#[test]
fn full_listings_scrape_walks_every_results_page() {
    let (l1, l2, l3) = (link(1), link(2), link(3));

    let fetcher = FakeFetcher::new()
        .with_page(START, 200, results_page(&[], Some(250)))
        .with_page(&page_url(0), 200, results_page(&[Row::new(&l1)], Some(250)))
        .with_page(&page_url(120), 200, results_page(&[Row::new(&l2)], Some(250)))
        .with_page(&page_url(240), 200, results_page(&[Row::new(&l3)], Some(250)))
        .with_page(&l1, 200, detail_page(&[&["1BR / 1Ba"]]))
        .with_page(&l2, 200, detail_page(&[&["laundry on site"]]))
        .with_page(&l3, 200, detail_page(&[]));

    let scraper = ListingsScraper::new(fetcher, ScrapeConfig::without_delays());
    let table = scraper.full_listings_scrape(START).unwrap();

    assert_eq!(table.links(), vec![l1, l2, l3]);
    assert_eq!(table.rows()[0].bathrooms.as_deref(), Some("1Ba"));
    assert_eq!(
        table.rows()[1].amenities,
        Some(vec!["laundry on site".to_string()])
    );
}

#[test]
fn failing_pages_are_skipped_then_scrape_stops() {
    let l1 = link(1);
    // 5 pages; page 1 works, pages 2-4 fail, page 5 is never reached
    let fetcher = FakeFetcher::new()
        .with_page(START, 200, results_page(&[], Some(600)))
        .with_page(&page_url(0), 200, results_page(&[Row::new(&l1)], None))
        .with_page(&page_url(120), 500, "")
        .with_page(&page_url(240), 500, "")
        .with_page(&page_url(360), 500, "")
        .with_page(&page_url(480), 200, results_page(&[Row::new(&link(9))], None))
        .with_page(&l1, 200, detail_page(&[]));

    let scraper = ListingsScraper::new(fetcher, ScrapeConfig::without_delays());
    let table = scraper.full_listings_scrape(START).unwrap();

    assert_eq!(table.links(), vec![l1]);
}

#[test]
fn detail_pages_are_requested_in_row_order() {
    let (l1, l2) = (link(1), link(2));
    let url = page_url(0);
    let fetcher = FakeFetcher::new()
        .with_page(&url, 200, results_page(&[Row::new(&l2), Row::new(&l1)], None))
        .with_page(&l1, 200, detail_page(&[]))
        .with_page(&l2, 200, detail_page(&[]));

    let scraper = ListingsScraper::new(fetcher, ScrapeConfig::without_delays());
    scraper.full_page_scrape(&url).unwrap();

    assert_eq!(scraper.fetcher().requests(), vec![url, l2, l1]);
}
