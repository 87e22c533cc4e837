//! Core types: the common result record, backend identification,
//! query categories and date filtering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum snippet length in characters. Every adapter clips snippets
/// to this bound before returning them.
pub const SNIPPET_MAX_CHARS: usize = 200;

/// Placeholder title for results whose page exposes none.
pub const NO_TITLE: &str = "No title";
/// Placeholder link for results without a usable URL.
pub const NO_LINK: &str = "No link";
/// Placeholder snippet for results without any summary text.
pub const NO_SUMMARY: &str = "No summary";

/// A single normalized search result, common to all backends.
///
/// All four fields are always populated; backends substitute the
/// placeholder constants when a field is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Which backend produced this result.
    pub source: String,
    /// Display title of the result.
    pub title: String,
    /// Canonical URL or identifier of the result.
    pub link: String,
    /// Short text excerpt, at most [`SNIPPET_MAX_CHARS`] characters.
    pub snippet: String,
}

/// The search backends scout can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// arXiv preprint index, ranked by submission date.
    Arxiv,
    /// Wikipedia title search plus per-title page summaries.
    Wikipedia,
    /// Google Scholar keyword publication search.
    Scholar,
    /// DuckDuckGo HTML-only endpoint.
    DuckDuckGo,
    /// Google web results, URL list with per-URL page fetches.
    Google,
}

impl Source {
    /// Human-readable backend name as it appears in the `source` field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Arxiv => "arXiv",
            Self::Wikipedia => "Wikipedia",
            Self::Scholar => "Google Scholar",
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Google => "Google",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse intent bucket selecting which backends run by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Category {
    /// Research papers: arXiv plus Google Scholar.
    Academic,
    /// Encyclopedic lookups: Wikipedia.
    Knowledge,
    /// Product research: site-restricted web searches.
    Product,
    /// Policy and news: site-restricted web searches.
    Policy,
    /// Everything else: one plain web search.
    General,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Knowledge => "knowledge",
            Self::Product => "product",
            Self::Policy => "policy",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two general-web engines selectable from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum WebEngine {
    /// DuckDuckGo HTML endpoint (engine A).
    Duckduckgo,
    /// Google result-URL scraping with per-URL fetches (engine B).
    Google,
}

/// Optional publication-date bounds applied after a web search.
///
/// Comparison is plain string ordering over `YYYY-MM-DD` forms. A result
/// with no extractable date always passes both bounds; the asymmetry
/// favours inclusion when the date is unknown and is preserved from the
/// original behaviour on purpose.
#[derive(Debug, Clone, Default)]
pub struct DateFilter {
    /// Exclude results dated on or after this `YYYY-MM-DD` string.
    pub before: Option<String>,
    /// Exclude results dated on or before this `YYYY-MM-DD` string.
    pub after: Option<String>,
}

impl DateFilter {
    /// Whether any bound is set. Engines skip date extraction entirely
    /// when the filter is inactive.
    pub fn is_active(&self) -> bool {
        self.before.is_some() || self.after.is_some()
    }

    /// Returns true when `date` fails a configured bound.
    pub fn excludes(&self, date: Option<&str>) -> bool {
        let Some(date) = date else {
            return false;
        };
        if let Some(before) = &self.before {
            if date >= before.as_str() {
                return true;
            }
        }
        if let Some(after) = &self.after {
            if date <= after.as_str() {
                return true;
            }
        }
        false
    }
}

/// Clip a string to at most `max_chars` characters, respecting char
/// boundaries.
pub fn clip_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    text.chars().take(max_chars).collect()
}

/// Clip snippet text to the common snippet bound.
pub fn clip_snippet(text: &str) -> String {
    clip_chars(text, SNIPPET_MAX_CHARS)
}
