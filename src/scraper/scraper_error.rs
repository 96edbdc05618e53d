use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid selector '{0}'")]
    InvalidSelector(String),

    /// A listing row without one of its required fields.
    #[error("Malformed listing: {field} ({detail})")]
    MalformedListing { field: &'static str, detail: String },

    #[error("Total result count not found on results page")]
    MissingTotalCount,

    #[error("Invalid URL '{url}': {detail}")]
    InvalidUrl { url: String, detail: String },
}

impl ScraperError {
    pub fn malformed(field: &'static str, detail: impl Into<String>) -> Self {
        ScraperError::MalformedListing {
            field,
            detail: detail.into(),
        }
    }
}
