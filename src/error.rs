//! Error types for scout.
//!
//! All errors carry stable string messages suitable for display. Backend
//! failures never escape the dispatch flow — they are absorbed into empty
//! result sets at the adapter boundary — so these variants surface only
//! for invalid configuration and for file output.

/// Errors that can occur during a search run.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request to a backend or result page failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A backend response could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Writing the rendered output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for scout results.
pub type Result<T> = std::result::Result<T, SearchError>;
