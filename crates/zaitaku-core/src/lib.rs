pub mod config;
pub mod error;
pub mod filter;
pub mod keywords;
pub mod models;
pub mod output;
pub mod politeness;
pub mod retry;
pub mod scrape;
pub mod traits;

#[cfg(test)]
pub mod testutil;

pub use config::ScraperConfig;
pub use error::AppError;
pub use models::{JobRecord, ParsedPage, RunOutput, Source};
pub use scrape::ScrapeService;
pub use traits::{Fetcher, ListingParser, Sleeper};
