use chrono::Utc;
use scraper::ElementRef;
use url::Url;
use zaitaku_core::error::AppError;
use zaitaku_core::keywords::classify;
use zaitaku_core::models::{
    CATEGORY_PLACEHOLDER, COMPANY_PLACEHOLDER, JobRecord, Source, TITLE_PLACEHOLDER,
    truncate_description,
};

use crate::dom::{class_token_contains_any, find_first, full_text, stripped_text};

const HEADINGS: &[&str] = &["h2", "h3", "h4"];

/// Build a record from one listing element.
///
/// Each field is located independently among the element's descendants.
/// Fields that cannot be found fall back to placeholders; the only hard
/// failure is a link that cannot be resolved to an absolute URL.
pub fn build_record(element: ElementRef<'_>, base_url: &Url) -> Result<JobRecord, AppError> {
    let title = find_first(element, HEADINGS, |el| {
        class_token_contains_any(el, &["title", "job"])
    })
    .or_else(|| find_first(element, HEADINGS, |_| true))
    .map(|el| stripped_text(&el))
    .filter(|t| !t.is_empty())
    .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string());

    let company = text_of_first(element, &["span", "div", "p"], &["company", "corp"])
        .unwrap_or_else(|| COMPANY_PLACEHOLDER.to_string());

    let link = match find_first(element, &["a"], |el| el.value().attr("href").is_some()) {
        Some(anchor) => resolve_link(anchor, base_url)?,
        None => String::new(),
    };

    let category = text_of_first(element, &["span", "div"], &["category", "tag"])
        .unwrap_or_else(|| CATEGORY_PLACEHOLDER.to_string());

    let description = text_of_first(element, &["p", "div"], &["desc", "summary"])
        .map(|d| truncate_description(&d))
        .unwrap_or_default();

    let classification = classify(&full_text(&element));

    Ok(JobRecord {
        title,
        company,
        category,
        description,
        link,
        is_remote: classification.is_remote,
        is_own_pc_ok: classification.is_own_pc_ok,
        scraped_at: Utc::now(),
        source: Source::Reworker,
    })
}

/// Build a record from a fallback job link.
///
/// No classification is attempted: the board lists remote work only, so
/// both flags are set.
pub fn build_link_record(anchor: ElementRef<'_>, base_url: &Url) -> Result<JobRecord, AppError> {
    let title = Some(stripped_text(&anchor))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string());

    Ok(JobRecord {
        title,
        company: COMPANY_PLACEHOLDER.to_string(),
        category: CATEGORY_PLACEHOLDER.to_string(),
        description: String::new(),
        link: resolve_link(anchor, base_url)?,
        is_remote: true,
        is_own_pc_ok: true,
        scraped_at: Utc::now(),
        source: Source::Reworker,
    })
}

fn text_of_first(element: ElementRef<'_>, tags: &[&str], class_needles: &[&str]) -> Option<String> {
    find_first(element, tags, |el| class_token_contains_any(el, class_needles))
        .map(|el| stripped_text(&el))
}

fn resolve_link(anchor: ElementRef<'_>, base_url: &Url) -> Result<String, AppError> {
    let href = anchor.value().attr("href").unwrap_or_default();
    base_url
        .join(href.trim())
        .map(String::from)
        .map_err(|e| AppError::ExtractionError(format!("Unresolvable link '{href}': {e}")))
}
