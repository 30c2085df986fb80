use std::path::{Path, PathBuf};

use url::Url;

use crate::error::AppError;
use crate::filter::{ensure_minimum, filter_remote};
use crate::models::{JobRecord, ParsedPage};
use crate::output::write_output;
use crate::politeness::PolitenessDelay;
use crate::traits::{Fetcher, ListingParser, Sleeper};

/// Orchestrates a run: fetch → parse → build records → sample top-up → filter → write.
///
/// Generic over all external dependencies via traits, so every stage can be
/// exercised without real HTTP or real waits. All run state lives here; the
/// record list is owned by a single call to [`run`](Self::run).
pub struct ScrapeService<F, P, S>
where
    F: Fetcher,
    P: ListingParser,
    S: Sleeper,
{
    fetcher: F,
    parser: P,
    sleeper: S,
    base_url: Url,
    politeness: PolitenessDelay,
}

impl<F, P, S> ScrapeService<F, P, S>
where
    F: Fetcher,
    P: ListingParser,
    S: Sleeper,
{
    pub fn new(fetcher: F, parser: P, sleeper: S, base_url: Url) -> Self {
        Self {
            fetcher,
            parser,
            sleeper,
            base_url,
            politeness: PolitenessDelay::default(),
        }
    }

    pub fn with_politeness(mut self, politeness: PolitenessDelay) -> Self {
        self.politeness = politeness;
        self
    }

    /// Fetch the listing page and turn it into records.
    ///
    /// Never fails: a fetch failure is logged and yields no records, and a
    /// listing element that cannot be converted is logged and skipped. A
    /// politeness pause follows every processed listing element.
    ///
    /// The parser builds every record (and stamps `scraped_at`) up front,
    /// because the parsed document cannot be held across an await. The pause
    /// therefore spaces out the per-element loop, not the extraction itself;
    /// link-fallback records get no pause.
    pub async fn collect(&self) -> Vec<JobRecord> {
        let url = self.base_url.as_str();
        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch listing page");
                return Vec::new();
            }
        };
        tracing::info!("Fetched main page: {} chars", html.chars().count());

        let mut records = Vec::new();
        match self.parser.parse(&html) {
            ParsedPage::Listings { pattern, outcomes } => {
                tracing::info!(%pattern, count = outcomes.len(), "Found listing elements");
                for outcome in outcomes {
                    match outcome {
                        Ok(record) => records.push(record),
                        Err(e) => tracing::warn!(error = %e, "Skipping listing element"),
                    }
                    self.sleeper.sleep(self.politeness.next_delay()).await;
                }
            }
            ParsedPage::LinkFallback {
                records: link_records,
            } => {
                tracing::info!(count = link_records.len(), "Using job-like links as fallback");
                records = link_records;
            }
        }

        tracing::info!("Scraping complete: {} records collected", records.len());
        records
    }

    /// Run the whole pipeline and write the result to `output_path`.
    ///
    /// Only a failure to write the output fails the run.
    pub async fn run(&self, output_path: &Path) -> Result<PathBuf, AppError> {
        tracing::info!(url = %self.base_url, "Starting remote job scrape");

        let records = ensure_minimum(self.collect().await);
        let retained = filter_remote(records);
        let path = write_output(output_path, retained)?;

        tracing::info!(path = %path.display(), "Run complete");
        Ok(path)
    }
}
