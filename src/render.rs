//! Result rendering: JSON, Markdown or HTML serialization of the
//! merged result list.
//!
//! JSON output is a direct serialization of the records. Markdown and
//! HTML embed a per-result page excerpt, fetched at render time; the
//! formatters themselves are pure over pre-fetched excerpts so they can
//! be tested offline.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::excerpt;
use crate::types::SearchResult;
use std::path::{Path, PathBuf};

/// Supported output formats. The format name doubles as the output
/// file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Html,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Html => "html",
        }
    }
}

/// Render the first `top_n` results in the requested format.
///
/// For Markdown and HTML an excerpt is fetched per result, one at a
/// time, in order. Excerpt failures never fail the render; they embed
/// placeholder text.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] only if JSON serialization itself
/// fails, which would indicate a defect rather than bad input.
pub async fn render(
    results: &[SearchResult],
    format: OutputFormat,
    top_n: usize,
    config: &SearchConfig,
) -> Result<String, SearchError> {
    let results = &results[..results.len().min(top_n)];

    match format {
        OutputFormat::Json => render_json(results),
        OutputFormat::Markdown => {
            let excerpts = fetch_excerpts(results, config).await;
            Ok(format_markdown(results, &excerpts))
        }
        OutputFormat::Html => {
            let excerpts = fetch_excerpts(results, config).await;
            Ok(format_html(results, &excerpts))
        }
    }
}

/// Render the results and write them to a timestamped file in `dir`,
/// named `search_results_<YYYYMMDD_HHMMSS>.<ext>` with the extension
/// matching the format.
///
/// An empty result list still writes a validly formatted document; a
/// run where every backend came back empty must leave a file behind.
///
/// # Errors
///
/// Returns [`SearchError::Io`] if the file cannot be written.
pub async fn write_report(
    results: &[SearchResult],
    format: OutputFormat,
    top_n: usize,
    config: &SearchConfig,
    dir: &Path,
) -> Result<PathBuf, SearchError> {
    let output = render(results, format, top_n, config).await?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("search_results_{timestamp}.{}", format.extension()));
    std::fs::write(&path, output)?;

    tracing::debug!(path = %path.display(), "report written");
    Ok(path)
}

async fn fetch_excerpts(results: &[SearchResult], config: &SearchConfig) -> Vec<String> {
    let mut excerpts = Vec::with_capacity(results.len());
    for result in results {
        excerpts.push(excerpt::excerpt(&result.link, config).await);
    }
    excerpts
}

/// Serialize results as human-readable JSON.
pub fn render_json(results: &[SearchResult]) -> Result<String, SearchError> {
    serde_json::to_string_pretty(results)
        .map_err(|e| SearchError::Parse(format!("JSON serialization failed: {e}")))
}

/// Format results as a Markdown document. `excerpts` must be parallel
/// to `results`.
pub fn format_markdown(results: &[SearchResult], excerpts: &[String]) -> String {
    let mut md = String::from("# Search Results\n\n");
    for (i, result) in results.iter().enumerate() {
        let content = excerpts.get(i).map(String::as_str).unwrap_or_default();
        md.push_str(&format!("## {}. {}\n", i + 1, result.title));
        md.push_str(&format!("- **Source**: {}\n", result.source));
        md.push_str(&format!("- **Link**: [{}]({})\n", result.link, result.link));
        md.push_str(&format!("- **Snippet**: {}\n", result.snippet));
        md.push_str(&format!("- **Content**: {content}...\n\n"));
    }
    md
}

/// Format results as a standalone HTML document. `excerpts` must be
/// parallel to `results`.
pub fn format_html(results: &[SearchResult], excerpts: &[String]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head><title>Search Results</title></head>\n<body>\n<h1>Search Results</h1>\n",
    );
    for (i, result) in results.iter().enumerate() {
        let content = excerpts.get(i).map(String::as_str).unwrap_or_default();
        html.push_str(&format!("<h2>{}. {}</h2>", i + 1, result.title));
        html.push_str(&format!("<p><strong>Source</strong>: {}</p>", result.source));
        html.push_str(&format!(
            "<p><strong>Link</strong>: <a href='{}'>{}</a></p>",
            result.link, result.link
        ));
        html.push_str(&format!("<p><strong>Snippet</strong>: {}</p>", result.snippet));
        html.push_str(&format!("<p><strong>Content</strong>: {content}...</p><hr>"));
    }
    html.push_str("</body></html>");
    html
}
