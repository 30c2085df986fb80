use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Version tag written into every output document.
pub const SCRAPER_VERSION: &str = "1.0.0";

/// Maximum description length (in characters) before truncation.
pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// Appended to descriptions that were cut at [`DESCRIPTION_MAX_CHARS`].
pub const TRUNCATION_MARKER: &str = "...";

pub const TITLE_PLACEHOLDER: &str = "タイトル不明";
pub const COMPANY_PLACEHOLDER: &str = "会社名不明";
pub const CATEGORY_PLACEHOLDER: &str = "カテゴリ不明";

/// Where a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Source {
    /// Scraped from the live job board.
    #[serde(rename = "Reworker")]
    Reworker,
    /// Injected by the low-yield fallback.
    #[serde(rename = "Sample Data")]
    SampleData,
}

/// A single job listing.
///
/// Every field is required, so a record is either fully populated or
/// not constructed at all. Records are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub category: String,
    /// At most 200 characters plus the `...` marker.
    pub description: String,
    /// Absolute URL, or empty when the listing had no link.
    pub link: String,
    pub is_remote: bool,
    /// Result of a permissive heuristic, see [`crate::keywords::classify`].
    pub is_own_pc_ok: bool,
    pub scraped_at: DateTime<Utc>,
    pub source: Source,
}

impl JobRecord {
    /// True when the record qualifies for the output set.
    pub fn is_eligible(&self) -> bool {
        self.is_remote && self.is_own_pc_ok
    }
}

/// Truncate a description to [`DESCRIPTION_MAX_CHARS`] characters, appending
/// [`TRUNCATION_MARKER`] only when something was cut.
pub fn truncate_description(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_MAX_CHARS) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// What a [`ListingParser`](crate::traits::ListingParser) found on a page.
#[derive(Debug)]
pub enum ParsedPage {
    /// Listing elements matched by a structural pattern, one outcome per
    /// element in document order. Failed elements are kept as errors so the
    /// caller can log and skip them.
    Listings {
        pattern: String,
        outcomes: Vec<Result<JobRecord, AppError>>,
    },
    /// No pattern matched; records built from job-like links instead.
    LinkFallback { records: Vec<JobRecord> },
}

/// Run-level metadata written alongside the jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub scraped_at: DateTime<Utc>,
    pub total_jobs: usize,
    pub source_sites: Vec<Source>,
    pub scraper_version: String,
}

/// The complete output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutput {
    pub metadata: RunMetadata,
    pub jobs: Vec<JobRecord>,
}

impl RunOutput {
    pub fn new(jobs: Vec<JobRecord>) -> Self {
        let source_sites: BTreeSet<Source> = jobs.iter().map(|j| j.source).collect();
        Self {
            metadata: RunMetadata {
                scraped_at: Utc::now(),
                total_jobs: jobs.len(),
                source_sites: source_sites.into_iter().collect(),
                scraper_version: SCRAPER_VERSION.to_string(),
            },
            jobs,
        }
    }
}
