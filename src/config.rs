//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls request timeouts, the post-batch pause used
//! against Google rate limiting, and the User-Agent sent to backends.

use crate::error::SearchError;

/// Configuration shared by all backend calls in one search run.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Per-request HTTP timeout in seconds for page fetches and
    /// backend calls.
    pub timeout_seconds: u64,
    /// Random pause range in milliseconds `(min, max)` after a Google
    /// result batch. An unconditional politeness pause, not a backoff.
    pub request_delay_ms: (u64, u64),
    /// Custom User-Agent string. If `None`, rotates through a built-in
    /// list of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 5,
            request_delay_ms: (1000, 2000),
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is
    /// invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `request_delay_ms.0` must be <= `request_delay_ms.1`
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.request_delay_ms.0 > self.request_delay_ms.1 {
            return Err(SearchError::Config(
                "request_delay_ms min must be <= max".into(),
            ));
        }
        Ok(())
    }
}
