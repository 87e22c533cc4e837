//! DuckDuckGo adapter — general-web engine A.
//!
//! Uses the HTML-only endpoint at `https://html.duckduckgo.com/html/`
//! which requires no JavaScript and is tolerant of automated requests.
//! Twice the requested number of raw hits are parsed so that optional
//! date filtering still leaves enough results; a `YYYY-MM-DD` date is
//! pulled out of each snippet by regex when filters are active.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::types::{clip_snippet, DateFilter, SearchResult, Source, NO_LINK, NO_SUMMARY, NO_TITLE};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use url::Url;

/// Matches ISO dates of this century inside snippet text.
fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b(20\d{2}-\d{2}-\d{2})\b").expect("valid date pattern"))
}

/// Search DuckDuckGo, over-fetching `2 × max_results` raw hits and
/// post-filtering by the optional date bounds.
///
/// Results with no extractable date always pass the date filter.
///
/// # Errors
///
/// Returns [`SearchError`] on request or parse failure; the dispatcher
/// absorbs it into an empty result set.
pub async fn search(
    query: &str,
    max_results: usize,
    dates: &DateFilter,
    config: &SearchConfig,
) -> Result<Vec<SearchResult>, SearchError> {
    tracing::trace!(query, max_results, "DuckDuckGo search");

    let client = http::build_client(config)?;

    let response = client
        .post("https://html.duckduckgo.com/html/")
        .form(&[("q", query), ("kl", "wt-wt")])
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| SearchError::Http(format!("DuckDuckGo request failed: {e}")))?
        .error_for_status()
        .map_err(|e| SearchError::Http(format!("DuckDuckGo HTTP error: {e}")))?;

    let html = response
        .text()
        .await
        .map_err(|e| SearchError::Http(format!("DuckDuckGo response read failed: {e}")))?;

    tracing::trace!(bytes = html.len(), "DuckDuckGo response received");

    let raw = parse_duckduckgo_html(&html, max_results * 2)?;
    Ok(filter_by_date(raw, dates, max_results))
}

/// Apply the date bounds and final truncation to raw parsed results.
pub(crate) fn filter_by_date(
    raw: Vec<SearchResult>,
    dates: &DateFilter,
    max_results: usize,
) -> Vec<SearchResult> {
    let mut kept = Vec::new();
    for mut result in raw {
        if dates.is_active() {
            let date = extract_date(&result.snippet);
            if dates.excludes(date.as_deref()) {
                tracing::debug!(link = %result.link, ?date, "result excluded by date filter");
                continue;
            }
        }
        result.snippet = clip_snippet(&result.snippet);
        kept.push(result);
        if kept.len() >= max_results {
            break;
        }
    }
    tracing::debug!(count = kept.len(), "DuckDuckGo results kept");
    kept
}

/// Extract the first `YYYY-MM-DD` date found in snippet text.
pub(crate) fn extract_date(text: &str) -> Option<String> {
    date_pattern()
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_owned())
}

/// Extract the actual URL from DuckDuckGo's redirect wrapper.
///
/// DDG wraps URLs like: `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`
/// We parse out the `uddg` query parameter and URL-decode it.
fn extract_url(href: &str) -> Option<String> {
    let full_href = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };

    let parsed = Url::parse(&full_href).ok()?;

    if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, value)| value.into_owned())
    } else {
        Some(full_href)
    }
}

/// Parse the DuckDuckGo HTML response into raw (unclipped, unfiltered)
/// results.
///
/// Extracted as a separate function for testability with fixture HTML.
pub(crate) fn parse_duckduckgo_html(
    html: &str,
    raw_limit: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse(
        ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)",
    )
    .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse(".result__a")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".result__snippet")
        .map_err(|e| SearchError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut results = Vec::new();

    for element in document.select(&result_sel) {
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

        let link = title_el
            .value()
            .attr("href")
            .and_then(extract_url)
            .unwrap_or_else(|| NO_LINK.to_owned());

        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NO_SUMMARY.to_owned());

        results.push(SearchResult {
            source: Source::DuckDuckGo.name().to_owned(),
            title,
            link,
            snippet,
        });

        if results.len() >= raw_limit {
            break;
        }
    }

    tracing::debug!(count = results.len(), "DuckDuckGo results parsed");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_DDG_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="result results_links results_links_deep web-result">
    <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.rust-lang.org%2F&amp;rut=abc123">
        Rust Programming Language
    </a>
    <div class="result__snippet">
        A language empowering everyone to build reliable and efficient software. Updated 2024-03-15 with the latest release notes.
    </div>
</div>
<div class="result results_links results_links_deep web-result">
    <a class="result__a" href="https://doc.rust-lang.org/book/">
        The Rust Programming Language Book
    </a>
    <div class="result__snippet">
        An introductory book about Rust, published 2019-08-01 for the 2018 edition.
    </div>
</div>
<div class="result results_links results_links_deep web-result">
    <a class="result__a" href="https://blog.example.com/rust">
        Rust in Production
    </a>
    <div class="result__snippet">
        Case studies of Rust adoption. No date mentioned anywhere in this snippet.
    </div>
</div>
</body>
</html>"#;

    #[test]
    fn extract_url_from_ddg_redirect() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fpage&rut=abc";
        assert_eq!(extract_url(href), Some("https://example.com/page".to_string()));
    }

    #[test]
    fn extract_url_direct_link() {
        let href = "https://example.com/direct";
        assert_eq!(extract_url(href), Some("https://example.com/direct".to_string()));
    }

    #[test]
    fn extract_url_invalid() {
        assert!(extract_url("not-a-url").is_none());
    }

    #[test]
    fn parse_mock_html_returns_results() {
        let results = parse_duckduckgo_html(MOCK_DDG_HTML, 10).expect("should parse");
        assert_eq!(results.len(), 3);

        assert_eq!(results[0].title, "Rust Programming Language");
        assert_eq!(results[0].link, "https://www.rust-lang.org/");
        assert_eq!(results[0].source, "DuckDuckGo");
        assert_eq!(results[1].link, "https://doc.rust-lang.org/book/");
    }

    #[test]
    fn parse_respects_raw_limit() {
        let results = parse_duckduckgo_html(MOCK_DDG_HTML, 2).expect("should parse");
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn parse_empty_html_returns_empty() {
        let results =
            parse_duckduckgo_html("<html><body></body></html>", 10).expect("should parse");
        assert!(results.is_empty());
    }

    #[test]
    fn extract_date_finds_iso_date() {
        assert_eq!(
            extract_date("posted on 2023-05-17 by admin"),
            Some("2023-05-17".to_owned())
        );
        assert_eq!(extract_date("no date here"), None);
        // Pre-2000 dates are not matched by the pattern.
        assert_eq!(extract_date("released 1999-12-31"), None);
    }

    #[test]
    fn before_filter_excludes_dated_results() {
        let raw = parse_duckduckgo_html(MOCK_DDG_HTML, 10).expect("should parse");
        let dates = DateFilter {
            before: Some("2020-01-01".into()),
            after: None,
        };
        let kept = filter_by_date(raw, &dates, 10);
        // 2024-03-15 is excluded, 2019-08-01 passes, undated passes.
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.title != "Rust Programming Language"));
        assert!(kept.iter().any(|r| r.title.contains("Book")));
        assert!(kept.iter().any(|r| r.title.contains("Production")));
    }

    #[test]
    fn undated_results_pass_active_filters() {
        let raw = parse_duckduckgo_html(MOCK_DDG_HTML, 10).expect("should parse");
        let dates = DateFilter {
            before: Some("2000-01-01".into()),
            after: None,
        };
        let kept = filter_by_date(raw, &dates, 10);
        assert_eq!(kept.len(), 1);
        assert!(kept[0].title.contains("Production"));
    }

    #[test]
    fn inactive_filter_keeps_everything_and_clips() {
        let raw = vec![SearchResult {
            source: "DuckDuckGo".into(),
            title: "T".into(),
            link: "https://x.com".into(),
            snippet: "s".repeat(500),
        }];
        let kept = filter_by_date(raw, &DateFilter::default(), 10);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].snippet.chars().count(), 200);
    }

    #[test]
    fn filter_truncates_to_max_results() {
        let raw: Vec<SearchResult> = (0..8)
            .map(|i| SearchResult {
                source: "DuckDuckGo".into(),
                title: format!("T{i}"),
                link: format!("https://x.com/{i}"),
                snippet: "s".into(),
            })
            .collect();
        let kept = filter_by_date(raw, &DateFilter::default(), 3);
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[0].title, "T0");
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_duckduckgo_search() {
        let config = SearchConfig::default();
        let results = search("rust programming", 5, &DateFilter::default(), &config).await;
        assert!(results.is_ok());
        let results = results.expect("live search should work");
        assert!(!results.is_empty());
        for r in &results {
            assert_eq!(r.source, "DuckDuckGo");
            assert!(r.snippet.chars().count() <= 200);
        }
    }
}
