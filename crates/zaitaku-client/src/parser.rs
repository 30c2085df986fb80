use scraper::Html;
use url::Url;
use zaitaku_core::models::ParsedPage;
use zaitaku_core::traits::ListingParser;

use crate::listing::{Listing, extract_listing_elements};
use crate::record::{build_link_record, build_record};

/// [`ListingParser`] backed by the `scraper` crate.
///
/// Relative links are resolved against `base_url`.
#[derive(Debug, Clone)]
pub struct HtmlListingParser {
    base_url: Url,
}

impl HtmlListingParser {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }
}

impl ListingParser for HtmlListingParser {
    fn parse(&self, html: &str) -> ParsedPage {
        let document = Html::parse_document(html);

        match extract_listing_elements(&document) {
            Listing::Primary { pattern, elements } => ParsedPage::Listings {
                pattern: pattern.to_string(),
                outcomes: elements
                    .into_iter()
                    .map(|el| build_record(el, &self.base_url))
                    .collect(),
            },
            Listing::Fallback { anchors } => {
                let records = anchors
                    .into_iter()
                    .filter_map(|anchor| match build_link_record(anchor, &self.base_url) {
                        Ok(record) => Some(record),
                        Err(e) => {
                            tracing::warn!(error = %e, "Skipping job link");
                            None
                        }
                    })
                    .collect();
                ParsedPage::LinkFallback { records }
            }
        }
    }
}
