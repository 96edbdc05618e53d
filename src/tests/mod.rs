mod scrape_tests;
mod utils;
