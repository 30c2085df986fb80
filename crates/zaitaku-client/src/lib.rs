pub mod dom;
pub mod fetcher;
pub mod listing;
pub mod parser;
pub mod record;

pub use fetcher::ReqwestFetcher;
pub use parser::HtmlListingParser;
