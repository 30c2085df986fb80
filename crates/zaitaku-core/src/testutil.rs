//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;

use crate::error::AppError;
use crate::models::{JobRecord, ParsedPage, Source};
use crate::traits::{Fetcher, ListingParser, Sleeper};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that returns queued responses.
#[derive(Clone)]
pub struct MockFetcher {
    /// Queue of responses. Each call pops the first element.
    /// If empty, returns a default HTML string.
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
    calls: Arc<Mutex<u32>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self::with_responses(vec![Ok(html.to_string())])
    }

    pub fn with_error(error: AppError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<String, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, AppError> {
        *self.calls.lock().unwrap() += 1;
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("<html><body>default</body></html>".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockParser
// ---------------------------------------------------------------------------

#[derive(Clone)]
enum MockPage {
    Listings(String, Arc<Mutex<Vec<Result<JobRecord, AppError>>>>),
    Links(Vec<JobRecord>),
}

/// Mock parser that ignores its input and returns a canned page once.
#[derive(Clone)]
pub struct MockParser {
    page: MockPage,
    calls: Arc<Mutex<u32>>,
}

impl MockParser {
    pub fn listings(pattern: &str, outcomes: Vec<Result<JobRecord, AppError>>) -> Self {
        Self {
            page: MockPage::Listings(pattern.to_string(), Arc::new(Mutex::new(outcomes))),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn links(records: Vec<JobRecord>) -> Self {
        Self {
            page: MockPage::Links(records),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

impl ListingParser for MockParser {
    fn parse(&self, _html: &str) -> ParsedPage {
        *self.calls.lock().unwrap() += 1;
        match &self.page {
            MockPage::Listings(pattern, outcomes) => ParsedPage::Listings {
                pattern: pattern.clone(),
                outcomes: std::mem::take(&mut *outcomes.lock().unwrap()),
            },
            MockPage::Links(records) => ParsedPage::LinkFallback {
                records: records.clone(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingSleeper
// ---------------------------------------------------------------------------

/// Sleeper that returns immediately and records requested durations.
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    slept: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Create a live-source record with the given title and classification.
pub fn make_test_record(title: &str, is_remote: bool, is_own_pc_ok: bool) -> JobRecord {
    JobRecord {
        title: title.to_string(),
        company: "テスト株式会社".to_string(),
        category: "エンジニア".to_string(),
        description: "在宅勤務".to_string(),
        link: "https://www.reworker.jp/jobs/1".to_string(),
        is_remote,
        is_own_pc_ok,
        scraped_at: Utc::now(),
        source: Source::Reworker,
    }
}
