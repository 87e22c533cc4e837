//! # scout
//!
//! Research-query fan-out over public search backends.
//!
//! Scout classifies a free-text query into a coarse intent category,
//! dispatches it to the backends registered for that category (arXiv,
//! Wikipedia, Google Scholar, or a general-web engine), normalizes every
//! hit into a common record, and renders the ranked list as JSON,
//! Markdown or HTML.
//!
//! ## Design
//!
//! - Scrapes public endpoints directly with CSS selectors on HTML
//!   responses — no API keys, no external services
//! - Category routing is a declarative table; adding a category is a
//!   data change, not new control flow
//! - Backends run sequentially and fail independently; one broken
//!   backend never discards results already gathered
//! - Optional qualifier flags compile into a refined query string that
//!   runs as an extra web search alongside the category fan-out
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - No network listeners — requests go out, nothing comes in
//! - Queries are logged only at trace level

pub mod adapters;
pub mod classify;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod excerpt;
pub mod http;
pub mod qualifiers;
pub mod render;
pub mod types;

pub use classify::classify;
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use qualifiers::Qualifiers;
pub use render::OutputFormat;
pub use types::{Category, DateFilter, SearchResult, Source, WebEngine};

/// Order results by snippet length, longest first.
///
/// Snippet length stands in for result richness until a better signal
/// exists. The sort is stable, so backend order breaks ties: two equal
/// snippets keep their dispatch order.
pub fn rank(results: &mut [SearchResult]) {
    results.sort_by(|a, b| {
        b.snippet
            .chars()
            .count()
            .cmp(&a.snippet.chars().count())
    });
}
