//! Wikipedia adapter — encyclopedia title search plus per-title
//! summary fetches.
//!
//! Two-step flow against the public MediaWiki APIs: a title search via
//! the action API, then one REST summary fetch per title. A title that
//! resolves to a disambiguation page is retried exactly once with the
//! first article link of that page; unresolved titles are skipped
//! silently rather than failing the batch.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::types::{clip_snippet, SearchResult, Source};
use serde_json::Value;
use url::Url;

const ACTION_API: &str = "https://en.wikipedia.org/w/api.php";
const SUMMARY_API: &str = "https://en.wikipedia.org/api/rest_v1/page/summary/";

/// A parsed page summary, before mapping to the common record.
#[derive(Debug, Clone)]
pub(crate) struct PageSummary {
    pub title: String,
    pub url: String,
    pub extract: String,
    pub is_disambiguation: bool,
}

/// Search Wikipedia: up to `max_results` titles attempted, each mapped
/// through its page summary.
///
/// # Errors
///
/// Returns [`SearchError`] only when the initial title search fails;
/// per-title summary failures skip that title.
pub async fn search(
    query: &str,
    max_results: usize,
    config: &SearchConfig,
) -> Result<Vec<SearchResult>, SearchError> {
    tracing::trace!(query, max_results, "Wikipedia search");

    let client = http::build_client(config)?;
    let limit = max_results.to_string();

    let response = client
        .get(ACTION_API)
        .query(&[
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", limit.as_str()),
            ("format", "json"),
        ])
        .send()
        .await
        .map_err(|e| SearchError::Http(format!("Wikipedia search failed: {e}")))?
        .error_for_status()
        .map_err(|e| SearchError::Http(format!("Wikipedia HTTP error: {e}")))?;

    let body = response
        .text()
        .await
        .map_err(|e| SearchError::Http(format!("Wikipedia response read failed: {e}")))?;

    let titles = parse_search_titles(&body)?;
    tracing::debug!(count = titles.len(), "Wikipedia titles found");

    let mut results = Vec::new();
    for title in titles.iter().take(max_results) {
        match resolve_page(&client, title).await {
            Some(page) => results.push(SearchResult {
                source: Source::Wikipedia.name().to_owned(),
                title: page.title,
                link: page.url,
                snippet: clip_snippet(&page.extract),
            }),
            None => {
                tracing::debug!(title, "Wikipedia title skipped");
            }
        }
    }

    tracing::debug!(count = results.len(), "Wikipedia results collected");
    Ok(results)
}

/// Fetch one page summary, following a disambiguation page to its first
/// article link at most once.
async fn resolve_page(client: &reqwest::Client, title: &str) -> Option<PageSummary> {
    let page = fetch_summary(client, title).await?;
    if !page.is_disambiguation {
        return Some(page);
    }

    tracing::debug!(title, "disambiguation page, trying first link");
    let first = first_article_link(client, title).await?;
    let page = fetch_summary(client, &first).await?;
    if page.is_disambiguation {
        return None;
    }
    Some(page)
}

async fn fetch_summary(client: &reqwest::Client, title: &str) -> Option<PageSummary> {
    let mut url = Url::parse(SUMMARY_API).ok()?;
    url.path_segments_mut().ok()?.push(title);

    let body = client
        .get(url)
        .send()
        .await
        .ok()?
        .error_for_status()
        .ok()?
        .text()
        .await
        .ok()?;

    parse_summary(&body)
}

async fn first_article_link(client: &reqwest::Client, title: &str) -> Option<String> {
    let body = client
        .get(ACTION_API)
        .query(&[
            ("action", "query"),
            ("prop", "links"),
            ("titles", title),
            ("plnamespace", "0"),
            ("pllimit", "1"),
            ("format", "json"),
        ])
        .send()
        .await
        .ok()?
        .error_for_status()
        .ok()?
        .text()
        .await
        .ok()?;

    parse_first_link(&body)
}

/// Parse title-search JSON from the action API.
pub(crate) fn parse_search_titles(body: &str) -> Result<Vec<String>, SearchError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("Wikipedia search JSON: {e}")))?;

    let hits = value["query"]["search"]
        .as_array()
        .ok_or_else(|| SearchError::Parse("Wikipedia search JSON missing query.search".into()))?;

    Ok(hits
        .iter()
        .filter_map(|hit| hit["title"].as_str().map(str::to_owned))
        .collect())
}

/// Parse a REST summary payload. Returns `None` when the payload has no
/// usable title.
pub(crate) fn parse_summary(body: &str) -> Option<PageSummary> {
    let value: Value = serde_json::from_str(body).ok()?;

    let title = value["title"].as_str()?.to_owned();
    let url = value["content_urls"]["desktop"]["page"]
        .as_str()
        .unwrap_or_default()
        .to_owned();
    let extract = value["extract"].as_str().unwrap_or_default().to_owned();
    let is_disambiguation = value["type"].as_str() == Some("disambiguation");

    Some(PageSummary {
        title,
        url,
        extract,
        is_disambiguation,
    })
}

/// Parse the first article link out of a `prop=links` payload.
pub(crate) fn parse_first_link(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let pages = value["query"]["pages"].as_object()?;
    let page = pages.values().next()?;
    let links = page["links"].as_array()?;
    links
        .first()
        .and_then(|l| l["title"].as_str())
        .map(str::to_owned)
}
