//! Locating listing elements on a job board page.
//!
//! Structural patterns are tried in a fixed order and the first one that
//! matches anything wins outright; later patterns are never consulted, even
//! if they would match more. When nothing matches, job-like links are used
//! instead.

use scraper::{ElementRef, Html};
use zaitaku_core::keywords::is_job_link_text;

use crate::dom::{class_attr_contains, full_text, has_class};

/// Cap on elements taken from a matching pattern.
pub const MAX_LISTING_ELEMENTS: usize = 30;

/// Cap on links taken by the fallback.
pub const MAX_FALLBACK_LINKS: usize = 20;

/// A named element predicate.
#[derive(Clone, Copy)]
pub struct ListingPattern {
    /// CSS-style description, used in logs.
    pub name: &'static str,
    pub matches: fn(&ElementRef<'_>) -> bool,
}

fn class_has_job(el: &ElementRef<'_>) -> bool {
    class_attr_contains(el, "job")
}

fn class_has_card(el: &ElementRef<'_>) -> bool {
    class_attr_contains(el, "card")
}

fn class_has_item(el: &ElementRef<'_>) -> bool {
    class_attr_contains(el, "item")
}

fn class_has_list(el: &ElementRef<'_>) -> bool {
    class_attr_contains(el, "list")
}

fn is_article(el: &ElementRef<'_>) -> bool {
    el.value().name() == "article"
}

fn is_post(el: &ElementRef<'_>) -> bool {
    has_class(el, "post")
}

fn is_entry(el: &ElementRef<'_>) -> bool {
    has_class(el, "entry")
}

/// Patterns in priority order.
pub const LISTING_PATTERNS: [ListingPattern; 7] = [
    ListingPattern {
        name: r#"[class*="job"]"#,
        matches: class_has_job,
    },
    ListingPattern {
        name: r#"[class*="card"]"#,
        matches: class_has_card,
    },
    ListingPattern {
        name: r#"[class*="item"]"#,
        matches: class_has_item,
    },
    ListingPattern {
        name: r#"[class*="list"]"#,
        matches: class_has_list,
    },
    ListingPattern {
        name: "article",
        matches: is_article,
    },
    ListingPattern {
        name: ".post",
        matches: is_post,
    },
    ListingPattern {
        name: ".entry",
        matches: is_entry,
    },
];

/// Elements chosen for record building.
#[derive(Debug)]
pub enum Listing<'a> {
    Primary {
        pattern: &'static str,
        elements: Vec<ElementRef<'a>>,
    },
    Fallback {
        anchors: Vec<ElementRef<'a>>,
    },
}

/// Every element in the document, root included, in document order.
fn all_elements(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
}

/// First pattern in `patterns` with at least one match, and its matches.
pub fn first_matching<'a>(
    document: &'a Html,
    patterns: &[ListingPattern],
) -> Option<(&'static str, Vec<ElementRef<'a>>)> {
    patterns.iter().find_map(|pattern| {
        let elements: Vec<_> = all_elements(document)
            .filter(|el| (pattern.matches)(el))
            .collect();
        (!elements.is_empty()).then_some((pattern.name, elements))
    })
}

/// `<a href>` elements whose text looks job related, in document order.
pub fn job_links(document: &Html) -> Vec<ElementRef<'_>> {
    all_elements(document)
        .filter(|el| el.value().name() == "a" && el.value().attr("href").is_some())
        .filter(|el| is_job_link_text(&full_text(el)))
        .collect()
}

/// Pick the listing elements of a page.
pub fn extract_listing_elements(document: &Html) -> Listing<'_> {
    match first_matching(document, &LISTING_PATTERNS) {
        Some((pattern, mut elements)) => {
            tracing::debug!(%pattern, count = elements.len(), "Listing pattern matched");
            elements.truncate(MAX_LISTING_ELEMENTS);
            Listing::Primary { pattern, elements }
        }
        None => {
            let mut anchors = job_links(document);
            tracing::debug!(count = anchors.len(), "No listing pattern matched, using links");
            anchors.truncate(MAX_FALLBACK_LINKS);
            Listing::Fallback { anchors }
        }
    }
}
