//! Google Scholar adapter — citation-index publication search.
//!
//! Scrapes the Scholar results page with a dedicated client held to a
//! fixed short timeout so a slow or blocked backend cannot hang the run
//! indefinitely. Any client or request failure degrades the whole
//! adapter to an empty result set at the dispatch boundary, never
//! per-item.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::types::{clip_snippet, SearchResult, Source, NO_LINK, NO_SUMMARY, NO_TITLE};
use scraper::{Html, Selector};

const SEARCH_URL: &str = "https://scholar.google.com/scholar";

/// Fixed request timeout in seconds. Scholar throttles aggressively;
/// waiting longer than this only delays the inevitable empty result.
const SCHOLAR_TIMEOUT_SECS: u64 = 10;

/// Search Google Scholar publications, stopping at `max_results`.
///
/// # Errors
///
/// Returns [`SearchError::Http`] on client construction or request
/// failure, [`SearchError::Parse`] on selector failure. The dispatcher
/// absorbs both into an empty result set.
pub async fn search(
    query: &str,
    max_results: usize,
    config: &SearchConfig,
) -> Result<Vec<SearchResult>, SearchError> {
    tracing::trace!(query, max_results, "Scholar search");

    let client = http::build_client_with_timeout(config, SCHOLAR_TIMEOUT_SECS)?;

    let response = client
        .get(SEARCH_URL)
        .query(&[("q", query), ("hl", "en")])
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| SearchError::Http(format!("Scholar request failed: {e}")))?
        .error_for_status()
        .map_err(|e| SearchError::Http(format!("Scholar HTTP error: {e}")))?;

    let html = response
        .text()
        .await
        .map_err(|e| SearchError::Http(format!("Scholar response read failed: {e}")))?;

    tracing::trace!(bytes = html.len(), "Scholar response received");

    parse_scholar_html(&html, max_results)
}

/// Parse a Scholar results page into search results.
///
/// Extracted as a separate function for testability with fixture HTML.
pub(crate) fn parse_scholar_html(
    html: &str,
    max_results: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse("div.gs_ri")
        .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse("h3.gs_rt")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let link_sel = Selector::parse("h3.gs_rt a")
        .map_err(|e| SearchError::Parse(format!("invalid link selector: {e:?}")))?;
    let snippet_sel = Selector::parse("div.gs_rs")
        .map_err(|e| SearchError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut results = Vec::new();

    for element in document.select(&result_sel) {
        // Early-exit counter: stop scanning once the bound is reached.
        if results.len() >= max_results {
            break;
        }

        let Some(title_el) = element.select(&title_sel).next() else {
            continue;
        };

        let title = {
            let text = title_el.text().collect::<String>().trim().to_owned();
            if text.is_empty() {
                NO_TITLE.to_owned()
            } else {
                text
            }
        };

        let link = element
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_owned)
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| NO_LINK.to_owned());

        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NO_SUMMARY.to_owned());

        results.push(SearchResult {
            source: Source::Scholar.name().to_owned(),
            title,
            link,
            snippet: clip_snippet(&snippet),
        });
    }

    tracing::debug!(count = results.len(), "Scholar results parsed");
    Ok(results)
}
