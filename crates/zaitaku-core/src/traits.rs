use std::future::Future;
use std::time::Duration;

use crate::error::AppError;
use crate::models::ParsedPage;

/// Fetches raw HTML content from a URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Turns a fetched HTML document into job records.
///
/// Implementations must not fail as a whole: a page with nothing
/// recognisable yields an empty [`ParsedPage`], and a malformed listing
/// element shows up as an `Err` outcome for that element only.
pub trait ListingParser: Send + Sync + Clone {
    fn parse(&self, html: &str) -> ParsedPage;
}

/// Blocking-style pause used for backoff and politeness delays.
pub trait Sleeper: Send + Sync + Clone {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Sleeps on the Tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// A Sleeper that returns immediately, for runs where pacing is not wanted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSleeper;

impl Sleeper for NullSleeper {
    async fn sleep(&self, _duration: Duration) {}
}
