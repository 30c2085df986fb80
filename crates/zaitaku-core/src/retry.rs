//! Retry with exponential backoff for page fetches.
//!
//! Wraps any [`Fetcher`] so transient transport failures (timeouts,
//! connection errors, non-2xx statuses) are retried a fixed number of times
//! before giving up with [`AppError::FetchError`].
//!
//! # Example
//!
//! ```rust,no_run
//! use zaitaku_core::retry::{RetryPolicy, RetryingFetcher};
//! use zaitaku_core::traits::TokioSleeper;
//! # use zaitaku_core::traits::Fetcher;
//! # #[derive(Clone)] struct MyFetcher;
//! # impl Fetcher for MyFetcher {
//! #     async fn fetch(&self, _: &str) -> Result<String, zaitaku_core::error::AppError> { todo!() }
//! # }
//!
//! // 3 attempts, sleeping 1s then 2s between them
//! let fetcher = RetryingFetcher::new(MyFetcher, RetryPolicy::default(), TokioSleeper);
//! ```

use std::time::Duration;

use crate::error::AppError;
use crate::traits::{Fetcher, Sleeper};

/// How many times to try a fetch and how long to wait in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,

    /// Delay after the first failed attempt; doubles after each further failure.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Backoff after the failed attempt `attempt` (0-indexed): `base * 2^attempt`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    /// 3 attempts, backoff of 1s then 2s.
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// A [`Fetcher`] wrapper that retries failed fetches with exponential backoff.
#[derive(Clone)]
pub struct RetryingFetcher<F, S> {
    inner: F,
    policy: RetryPolicy,
    sleeper: S,
}

impl<F: Fetcher, S: Sleeper> RetryingFetcher<F, S> {
    pub fn new(inner: F, policy: RetryPolicy, sleeper: S) -> Self {
        Self {
            inner,
            policy,
            sleeper,
        }
    }
}

impl<F: Fetcher, S: Sleeper> Fetcher for RetryingFetcher<F, S> {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            tracing::info!(%url, "Fetching");
            match self.inner.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    tracing::warn!(
                        %url,
                        error = %e,
                        "Fetch failed (attempt {}/{})",
                        attempt + 1,
                        max_attempts
                    );

                    if attempt + 1 >= max_attempts || !e.is_retryable() {
                        tracing::error!(%url, attempts = attempt + 1, "Giving up");
                        return Err(AppError::FetchError {
                            url: url.to_string(),
                            attempts: attempt + 1,
                            source: Box::new(e),
                        });
                    }

                    let delay = self.policy.delay_for_attempt(attempt);
                    tracing::debug!(sleep_ms = %delay.as_millis(), "Backing off");
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
