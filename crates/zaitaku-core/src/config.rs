use std::time::Duration;

use url::Url;

use crate::error::AppError;
use crate::politeness::PolitenessDelay;
use crate::retry::RetryPolicy;

/// The job board this scraper targets.
pub const DEFAULT_BASE_URL: &str = "https://www.reworker.jp";

/// Runtime configuration for a scrape run.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Page to fetch, and the base that relative listing links resolve against.
    pub base_url: Url,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    pub politeness: PolitenessDelay,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            request_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
            politeness: PolitenessDelay::default(),
        }
    }
}

impl ScraperConfig {
    /// Read configuration from environment variables.
    ///
    /// - `ZAITAKU_BASE_URL` (optional, defaults to https://www.reworker.jp)
    /// - `ZAITAKU_REQUEST_TIMEOUT_SECS` (optional, defaults to 10)
    /// - `ZAITAKU_MAX_ATTEMPTS` (optional, defaults to 3)
    /// - `ZAITAKU_DELAY_MIN_MS` / `ZAITAKU_DELAY_MAX_MS` (optional, default 1000 / 3000)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading values through `lookup`.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, AppError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = match lookup("ZAITAKU_BASE_URL") {
            None => defaults.base_url,
            Some(raw) => Url::parse(&raw).map_err(|e| {
                AppError::ConfigError(format!("Invalid ZAITAKU_BASE_URL '{raw}': {e}"))
            })?,
        };
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AppError::ConfigError(format!(
                "ZAITAKU_BASE_URL scheme '{}' is not allowed (only http/https)",
                base_url.scheme()
            )));
        }

        let request_timeout = match parse_u64(&lookup, "ZAITAKU_REQUEST_TIMEOUT_SECS")? {
            None => defaults.request_timeout,
            Some(0) => {
                return Err(AppError::ConfigError(
                    "ZAITAKU_REQUEST_TIMEOUT_SECS must be at least 1".into(),
                ));
            }
            Some(secs) => Duration::from_secs(secs),
        };

        let retry = match parse_u64(&lookup, "ZAITAKU_MAX_ATTEMPTS")? {
            None => defaults.retry,
            Some(0) => {
                return Err(AppError::ConfigError(
                    "ZAITAKU_MAX_ATTEMPTS must be at least 1".into(),
                ));
            }
            Some(n) => RetryPolicy::new(u32::try_from(n).unwrap_or(u32::MAX)),
        };

        let min = parse_u64(&lookup, "ZAITAKU_DELAY_MIN_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.politeness.min);
        let max = parse_u64(&lookup, "ZAITAKU_DELAY_MAX_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.politeness.max);
        if min > max {
            return Err(AppError::ConfigError(format!(
                "ZAITAKU_DELAY_MIN_MS ({}) exceeds ZAITAKU_DELAY_MAX_MS ({})",
                min.as_millis(),
                max.as_millis()
            )));
        }

        Ok(Self {
            base_url,
            request_timeout,
            retry,
            politeness: PolitenessDelay::new(min, max),
        })
    }
}

fn parse_u64<L>(lookup: &L, key: &str) -> Result<Option<u64>, AppError>
where
    L: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            AppError::ConfigError(format!(
                "Invalid {key} '{raw}': must be a non-negative integer"
            ))
        }),
    }
}
