//! arXiv adapter — academic preprint index, ranked by submission date.
//!
//! Queries the public Atom API at `export.arxiv.org` and maps feed
//! entries into the common result record. The Atom payload is lenient
//! enough to parse with the same CSS-selector machinery used for the
//! HTML backends.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::types::{clip_snippet, SearchResult, Source, NO_LINK, NO_SUMMARY, NO_TITLE};
use scraper::{Html, Selector};

const API_URL: &str = "https://export.arxiv.org/api/query";

/// Search arXiv, newest submissions first, requesting exactly
/// `max_results` entries.
///
/// # Errors
///
/// Returns [`SearchError::Http`] on request failure or
/// [`SearchError::Parse`] on an unreadable feed. The dispatcher absorbs
/// both into an empty result set.
pub async fn search(
    query: &str,
    max_results: usize,
    config: &SearchConfig,
) -> Result<Vec<SearchResult>, SearchError> {
    tracing::trace!(query, max_results, "arXiv search");

    let client = http::build_client(config)?;
    let search_query = format!("all:{query}");
    let max = max_results.to_string();

    let response = client
        .get(API_URL)
        .query(&[
            ("search_query", search_query.as_str()),
            ("start", "0"),
            ("max_results", max.as_str()),
            ("sortBy", "submittedDate"),
            ("sortOrder", "descending"),
        ])
        .send()
        .await
        .map_err(|e| SearchError::Http(format!("arXiv request failed: {e}")))?
        .error_for_status()
        .map_err(|e| SearchError::Http(format!("arXiv HTTP error: {e}")))?;

    let feed = response
        .text()
        .await
        .map_err(|e| SearchError::Http(format!("arXiv response read failed: {e}")))?;

    tracing::trace!(bytes = feed.len(), "arXiv feed received");

    parse_feed(&feed, max_results)
}

/// Parse an arXiv Atom feed into search results.
///
/// Extracted as a separate function for testability with fixture feeds.
pub(crate) fn parse_feed(
    feed: &str,
    max_results: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let document = Html::parse_document(feed);

    let entry_sel = Selector::parse("entry")
        .map_err(|e| SearchError::Parse(format!("invalid entry selector: {e:?}")))?;
    let title_sel = Selector::parse("title")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let id_sel = Selector::parse("id")
        .map_err(|e| SearchError::Parse(format!("invalid id selector: {e:?}")))?;
    let summary_sel = Selector::parse("summary")
        .map_err(|e| SearchError::Parse(format!("invalid summary selector: {e:?}")))?;

    let mut results = Vec::new();

    for entry in document.select(&entry_sel) {
        let title = entry
            .select(&title_sel)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_owned());

        let link = entry
            .select(&id_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_owned())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| NO_LINK.to_owned());

        let summary = entry
            .select(&summary_sel)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NO_SUMMARY.to_owned());

        results.push(SearchResult {
            source: Source::Arxiv.name().to_owned(),
            title,
            link,
            snippet: clip_snippet(&summary),
        });

        if results.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = results.len(), "arXiv results parsed");
    Ok(results)
}

/// arXiv wraps titles and abstracts across lines; collapse runs of
/// whitespace to single spaces.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
