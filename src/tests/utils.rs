use crate::scraper::models::FetchedPage;
use crate::scraper::{Fetch, ScraperError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory `Fetch`: canned `(status, body)` per URL, records every request.
/// Unknown URLs fail like a dropped connection.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, (u16, String)>,
    pub requested: RefCell<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, status: u16, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), (status, body.into()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl Fetch for FakeFetcher {
    fn get(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        self.requested.borrow_mut().push(url.to_string());

        match self.pages.get(url) {
            Some((status, body)) => Ok(FetchedPage {
                url: url.to_string(),
                status: *status,
                body: body.clone(),
            }),
            None => Err(ScraperError::Network(format!("connection refused: {url}"))),
        }
    }
}

pub struct Row<'a> {
    pub date: &'a str,
    pub title: &'a str,
    pub link: &'a str,
    pub price: Option<&'a str>,
    pub hood: Option<&'a str>,
    pub housing: Option<&'a str>,
}

impl<'a> Row<'a> {
    pub fn new(link: &'a str) -> Self {
        Self {
            date: "Jun  3",
            title: "Charming flat",
            link,
            price: Some("$2,450"),
            hood: None,
            housing: None,
        }
    }

    pub fn to_html(&self) -> String {
        let price = self
            .price
            .map(|p| format!(r#"<span class="result-price">{p}</span>"#))
            .unwrap_or_default();
        let housing = self
            .housing
            .map(|h| format!("<span class=\"housing\">\n  {h}\n</span>"))
            .unwrap_or_default();
        let hood = self
            .hood
            .map(|h| format!(r#"<span class="result-hood"> ({h})</span>"#))
            .unwrap_or_default();

        format!(
            r#"<li class="result-row" data-pid="1">
  <div class="result-info">
    <time class="result-date" datetime="2021-06-03 12:00" title="Thu 03 Jun">{date}</time>
    <h3 class="result-heading">
      <a href="{link}" class="result-title hdrlnk">{title}</a>
    </h3>
    <span class="result-meta">
      {price}
      {housing}
      {hood}
    </span>
  </div>
</li>"#,
            date = self.date,
            link = self.link,
            title = self.title,
        )
    }
}

/// Results page markup; `total` fills `span.totalcount` when given.
pub fn results_page(rows: &[Row<'_>], total: Option<usize>) -> String {
    let count = total
        .map(|t| format!(r#"<span class="totalcount">{t}</span>"#))
        .unwrap_or_default();
    let items: String = rows.iter().map(Row::to_html).collect();

    format!(
        r#"<html><body>
<div class="search-legend">{count}</div>
<ul class="rows">{items}</ul>
</body></html>"#
    )
}

pub fn detail_page(groups: &[&[&str]]) -> String {
    let body: String = groups
        .iter()
        .map(|items| {
            let spans: String = items
                .iter()
                .map(|i| format!("<span>{i}</span><br>\n"))
                .collect();
            format!("<p class=\"attrgroup\">\n{spans}</p>\n")
        })
        .collect();

    format!("<html><body><section class=\"userbody\">{body}</section></body></html>")
}
