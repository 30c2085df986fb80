//! Keyword sets driving listing classification.
//!
//! All matching is substring-based against lower-cased text, so every term
//! here must already be lower case.

/// Terms indicating remote / work-from-home positions.
pub const REMOTE_KEYWORDS: &[&str] = &[
    "在宅",
    "リモート",
    "remote",
    "テレワーク",
    "自宅",
    "フル在宅",
    "完全在宅",
];

/// Terms indicating the worker uses their own computer.
pub const OWN_PC_KEYWORDS: &[&str] = &["自宅pc", "自宅パソコン", "pc持参", "pc環境", "機材貸与なし"];

/// "Loaned / provided" — mentions of company-provided equipment.
pub const LOANER_KEYWORD: &str = "貸与";

/// Anchor-text terms that mark a link as job related (fallback extraction).
pub const JOB_LINK_KEYWORDS: &[&str] = &["求人", "job", "募集", "career", "work"];

/// Outcome of classifying a listing's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_remote: bool,
    pub is_own_pc_ok: bool,
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Classify the full visible text of a listing.
///
/// `is_own_pc_ok` is a loose heuristic: it is true when an own-equipment
/// term appears, but also whenever the text does *not* mention loaned
/// equipment at all. Silence is read as permission, which produces false
/// positives. Treat the flag as a hint, not a guarantee.
pub fn classify(text: &str) -> Classification {
    let text = text.to_lowercase();
    Classification {
        is_remote: contains_any(&text, REMOTE_KEYWORDS),
        is_own_pc_ok: contains_any(&text, OWN_PC_KEYWORDS) || !text.contains(LOANER_KEYWORD),
    }
}

/// True when anchor text looks like it points at a job listing.
pub fn is_job_link_text(text: &str) -> bool {
    contains_any(&text.to_lowercase(), JOB_LINK_KEYWORDS)
}
