pub mod json;
pub mod xlsx;

pub use json::export_listings_json;
pub use xlsx::export_listings_xlsx;
