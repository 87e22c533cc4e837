//! Keyword-based query classification.
//!
//! Maps a raw query to a [`Category`] by substring membership against
//! fixed keyword lists in priority order. Deliberately coarse: no
//! tokenization or stemming, so a keyword matching inside another word
//! still counts. The trade-off favours simplicity over precision.

use crate::types::Category;

/// Signal words tested in priority order; the first list with any match
/// wins.
const ACADEMIC_KEYWORDS: &[&str] = &["research", "paper", "academic", "study", "model"];
const KNOWLEDGE_KEYWORDS: &[&str] = &["history", "definition", "what is"];
const PRODUCT_KEYWORDS: &[&str] = &["best", "recommend", "laptop", "server", "product"];
const POLICY_KEYWORDS: &[&str] = &[
    "policy",
    "tariff",
    "news",
    "latest",
    "regulations",
    "changes",
    "trade",
];

/// Classify a query into a [`Category`].
///
/// Case-insensitive substring matching; falls back to
/// [`Category::General`] when no signal word matches.
pub fn classify(query: &str) -> Category {
    let query = query.to_lowercase();
    if contains_any(&query, ACADEMIC_KEYWORDS) {
        Category::Academic
    } else if contains_any(&query, KNOWLEDGE_KEYWORDS) {
        Category::Knowledge
    } else if contains_any(&query, PRODUCT_KEYWORDS) {
        Category::Product
    } else if contains_any(&query, POLICY_KEYWORDS) {
        Category::Policy
    } else {
        Category::General
    }
}

fn contains_any(query: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| query.contains(k))
}
