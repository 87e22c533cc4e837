//! Google adapter — general-web engine B.
//!
//! Google's result page is scraped only for bare result URLs; each URL
//! is then fetched individually to recover a title and description (and
//! a `<meta name="date">` tag when date filters are active). A failed
//! per-URL fetch degrades that single item to placeholder fields rather
//! than dropping it. After the batch an unconditional randomized pause
//! keeps request rates polite.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::types::{clip_snippet, DateFilter, SearchResult, Source, NO_SUMMARY, NO_TITLE};
use rand::Rng;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

const SEARCH_URL: &str = "https://www.google.com/search";

/// Title, description and date-tag content pulled from one result page.
#[derive(Debug, Clone, Default)]
pub(crate) struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

/// Search Google, over-fetching `2 × max_results` result URLs and
/// fetching each one for metadata.
///
/// # Errors
///
/// Returns [`SearchError`] only when the result-page request itself
/// fails; per-URL fetch failures yield placeholder fields.
pub async fn search(
    query: &str,
    max_results: usize,
    dates: &DateFilter,
    config: &SearchConfig,
) -> Result<Vec<SearchResult>, SearchError> {
    tracing::trace!(query, max_results, "Google search");

    let client = http::build_client(config)?;
    let num = (max_results * 2).to_string();

    let response = client
        .get(SEARCH_URL)
        .query(&[("q", query), ("num", num.as_str()), ("hl", "en")])
        .header("Accept", "text/html,application/xhtml+xml")
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| SearchError::Http(format!("Google request failed: {e}")))?
        .error_for_status()
        .map_err(|e| SearchError::Http(format!("Google HTTP error: {e}")))?;

    let html = response
        .text()
        .await
        .map_err(|e| SearchError::Http(format!("Google response read failed: {e}")))?;

    tracing::trace!(bytes = html.len(), "Google response received");

    let urls = parse_result_urls(&html, max_results * 2)?;
    tracing::debug!(count = urls.len(), "Google result URLs parsed");

    let mut results = Vec::new();
    for url in urls {
        let meta = fetch_page_meta(&client, &url).await;

        if dates.is_active() && dates.excludes(meta.date.as_deref()) {
            tracing::debug!(url, date = ?meta.date, "result excluded by date filter");
            continue;
        }

        results.push(SearchResult {
            source: Source::Google.name().to_owned(),
            title: meta.title.unwrap_or_else(|| NO_TITLE.to_owned()),
            link: url,
            snippet: clip_snippet(&meta.description.unwrap_or_else(|| NO_SUMMARY.to_owned())),
        });

        if results.len() >= max_results {
            break;
        }
    }

    // Unconditional politeness pause after the batch, not a backoff.
    let (min_ms, max_ms) = config.request_delay_ms;
    if max_ms > 0 {
        let pause = rand::thread_rng().gen_range(min_ms..=max_ms);
        tracing::trace!(pause_ms = pause, "post-batch pause");
        tokio::time::sleep(Duration::from_millis(pause)).await;
    }

    Ok(results)
}

/// Fetch one result page for its metadata. Any failure yields an empty
/// [`PageMeta`], which the caller maps to placeholder fields.
async fn fetch_page_meta(client: &reqwest::Client, url: &str) -> PageMeta {
    let body = match client.get(url).send().await {
        Ok(response) => match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(url, error = %e, "result page read failed");
                return PageMeta::default();
            }
        },
        Err(e) => {
            tracing::debug!(url, error = %e, "result page fetch failed");
            return PageMeta::default();
        }
    };

    parse_page_meta(&body)
}

/// Parse title, meta description and meta date out of a result page.
pub(crate) fn parse_page_meta(html: &str) -> PageMeta {
    let document = Html::parse_document(html);

    let title = Selector::parse("title").ok().and_then(|sel| {
        document
            .select(&sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_owned())
            .filter(|t| !t.is_empty())
    });

    let description = Selector::parse("meta[name=\"description\"]").ok().and_then(|sel| {
        document
            .select(&sel)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty())
    });

    let date = Selector::parse("meta[name=\"date\"]").ok().and_then(|sel| {
        document
            .select(&sel)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty())
    });

    PageMeta {
        title,
        description,
        date,
    }
}

/// Parse bare result URLs out of the Google results page, unwrapping
/// the `/url?q=` redirect form and skipping Google-internal links.
///
/// Extracted as a separate function for testability with fixture HTML.
pub(crate) fn parse_result_urls(
    html: &str,
    raw_limit: usize,
) -> Result<Vec<String>, SearchError> {
    let document = Html::parse_document(html);

    let anchor_sel = Selector::parse("a[href]")
        .map_err(|e| SearchError::Parse(format!("invalid anchor selector: {e:?}")))?;

    let mut urls: Vec<String> = Vec::new();

    for anchor in document.select(&anchor_sel) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let Some(url) = unwrap_result_href(href) else {
            continue;
        };

        if urls.contains(&url) {
            continue;
        }

        urls.push(url);
        if urls.len() >= raw_limit {
            break;
        }
    }

    Ok(urls)
}

/// Unwrap a result anchor href into an external URL, or `None` for
/// navigation and Google-internal links.
fn unwrap_result_href(href: &str) -> Option<String> {
    let candidate = if href.starts_with("/url?") {
        // Redirect form: /url?q=<encoded>&sa=...
        let parsed = Url::parse(&format!("https://www.google.com{href}")).ok()?;
        parsed
            .query_pairs()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value.into_owned())?
    } else if href.starts_with("http://") || href.starts_with("https://") {
        href.to_owned()
    } else {
        return None;
    };

    let parsed = Url::parse(&candidate).ok()?;
    let host = parsed.host_str()?;
    if host.ends_with("google.com") || host.ends_with("googleusercontent.com") {
        return None;
    }

    Some(candidate)
}
