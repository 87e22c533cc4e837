//! Content excerptor: fetch a result page and extract a short
//! plain-text preview from its paragraph content.
//!
//! Used only when rendering Markdown or HTML output. No caching —
//! every render invocation fetches again.

use crate::config::SearchConfig;
use crate::http;
use crate::types::clip_chars;
use scraper::{Html, Selector};

/// Excerpt length bound in characters.
pub const EXCERPT_MAX_CHARS: usize = 200;

/// Returned when the page yields no paragraph text.
pub const NO_CONTENT: &str = "No content";
/// Returned when the page cannot be fetched or read.
pub const FETCH_FAILED: &str = "Failed to fetch content";

/// Fetch `url` and return up to [`EXCERPT_MAX_CHARS`] characters of its
/// paragraph text. Never fails: fetch or parse problems yield the
/// [`FETCH_FAILED`] placeholder instead.
pub async fn excerpt(url: &str, config: &SearchConfig) -> String {
    tracing::trace!(url, "fetching excerpt");

    let Ok(client) = http::build_client(config) else {
        return FETCH_FAILED.to_owned();
    };

    let body = match client.get(url).send().await {
        Ok(response) => match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(url, error = %e, "excerpt read failed");
                return FETCH_FAILED.to_owned();
            }
        },
        Err(e) => {
            tracing::debug!(url, error = %e, "excerpt fetch failed");
            return FETCH_FAILED.to_owned();
        }
    };

    let text = paragraph_text(&body);
    if text.is_empty() {
        NO_CONTENT.to_owned()
    } else {
        text
    }
}

/// Join the text of all `<p>` elements with single spaces and clip to
/// the excerpt bound.
///
/// Extracted as a separate function for testability with fixture HTML.
pub(crate) fn paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    let joined = document
        .select(&selector)
        .map(|p| p.text().collect::<String>().trim().to_owned())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    clip_chars(&joined, EXCERPT_MAX_CHARS)
}
