pub mod connection;
pub mod listings;
pub mod scrapes;

pub use connection::{init_db, Database};
pub use listings::save_listings;
