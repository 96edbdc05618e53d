// src/domain/listing.rs

use crate::scraper::models::PostDetails;
use serde::Serialize;

/// Column order of every listing table, exports included.
pub const COLUMNS: [&str; 9] = [
    "date",
    "title",
    "link",
    "price",
    "brs",
    "sqft",
    "hood",
    "bath",
    "amenities",
];

/// One apartment listing. `None` marks a value the source markup did not carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub date: String,
    pub title: String,
    pub link: String,
    pub price: i64,

    pub bedrooms: Option<u32>,
    pub sqft: Option<u32>,
    pub neighborhood: Option<String>,

    // Filled in from the detail page
    pub bathrooms: Option<String>,
    pub amenities: Option<Vec<String>>,
}

impl Listing {
    /// Returns a copy of this listing carrying the detail-page fields.
    pub fn with_details(self, details: PostDetails) -> Listing {
        Listing {
            bathrooms: details.bathrooms,
            amenities: details.amenities,
            ..self
        }
    }

    /// Cells in `COLUMNS` order; missing values render empty.
    pub fn cells(&self) -> [String; 9] {
        fn opt<T: ToString>(v: &Option<T>) -> String {
            v.as_ref().map(|x| x.to_string()).unwrap_or_default()
        }

        [
            self.date.clone(),
            self.title.clone(),
            self.link.clone(),
            self.price.to_string(),
            opt(&self.bedrooms),
            opt(&self.sqft),
            opt(&self.neighborhood),
            opt(&self.bathrooms),
            self.amenities
                .as_ref()
                .map(|a| a.join(", "))
                .unwrap_or_default(),
        ]
    }
}

/// Row-oriented table of listings.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ListingTable {
    rows: Vec<Listing>,
}

impl ListingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, listing: Listing) {
        self.rows.push(listing);
    }

    /// Appends every row of `other`, keeping order.
    pub fn append(&mut self, other: ListingTable) {
        self.rows.extend(other.rows);
    }

    pub fn concat(tables: impl IntoIterator<Item = ListingTable>) -> ListingTable {
        let mut out = ListingTable::new();
        for t in tables {
            out.append(t);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Listing] {
        &self.rows
    }

    pub fn links(&self) -> Vec<String> {
        self.rows.iter().map(|l| l.link.clone()).collect()
    }

    /// Zips detail-page results onto rows by position.
    /// Rows past the end of `details` keep their missing markers.
    pub fn merge_details(self, details: Vec<PostDetails>) -> ListingTable {
        let mut details = details.into_iter();
        let rows = self
            .rows
            .into_iter()
            .map(|l| match details.next() {
                Some(d) => l.with_details(d),
                None => l,
            })
            .collect();
        ListingTable { rows }
    }
}

impl FromIterator<Listing> for ListingTable {
    fn from_iter<I: IntoIterator<Item = Listing>>(iter: I) -> Self {
        ListingTable {
            rows: iter.into_iter().collect(),
        }
    }
}
