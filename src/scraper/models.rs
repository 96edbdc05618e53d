// Detail page
//  └── p.attrgroup (0..n)
//       ├── group 0: "1BR / 1Ba", sqft, availability
//       ├── group 1: open house dates (only when 3 groups)
//       └── group 2: amenities

/// Bathroom count and amenities recovered from one listing's detail page.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PostDetails {
    pub bathrooms: Option<String>,
    pub amenities: Option<Vec<String>>,
}

/// Raw response from a `Fetch` implementation.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}
