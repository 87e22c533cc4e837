//! Integration tests for the classify → dispatch → merge → rank →
//! render pipeline.
//!
//! These tests exercise the offline parts of the pipeline with
//! synthetic results (no network calls); the routing table is checked
//! as data, so backend fan-out shape is verified without issuing any
//! requests.

use scout::config::SearchConfig;
use scout::dispatch::{routes, Backend, Bound};
use scout::qualifiers::{compile, Qualifiers};
use scout::render::{format_html, format_markdown, render_json, write_report, OutputFormat};
use scout::types::{Category, SearchResult};
use scout::{classify, rank};

fn make_result(source: &str, title: &str, snippet: &str) -> SearchResult {
    SearchResult {
        source: source.to_string(),
        title: title.to_string(),
        link: format!("https://example.com/{title}"),
        snippet: snippet.to_string(),
    }
}

/// Simulate the top-level merge without network calls: concatenate the
/// candidate lists, rank by snippet length, truncate to top_n.
fn merge_and_rank(
    category: Vec<SearchResult>,
    general: Vec<SearchResult>,
    qualifier: Vec<SearchResult>,
    top_n: usize,
) -> Vec<SearchResult> {
    let mut results = category;
    results.extend(general);
    results.extend(qualifier);
    rank(&mut results);
    results.truncate(top_n);
    results
}

#[test]
fn knowledge_query_routes_to_wikipedia() {
    let category = classify("what is quantum computing");
    assert_eq!(category, Category::Knowledge);

    let routes = routes(category);
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].backend, Backend::Wikipedia);
}

#[test]
fn academic_query_routes_to_arxiv_and_scholar() {
    let category = classify("transformer research paper");
    assert_eq!(category, Category::Academic);

    let backends: Vec<_> = routes(category).iter().map(|r| r.backend).collect();
    assert_eq!(backends, vec![Backend::Arxiv, Backend::Scholar]);
}

#[test]
fn product_category_fans_out_to_three_half_bound_sites() {
    let category = classify("best mechanical keyboard");
    assert_eq!(category, Category::Product);

    let routes = routes(category);
    assert_eq!(routes.len(), 3);
    for route in routes {
        assert_eq!(route.backend, Backend::Web);
        assert_eq!(route.bound, Bound::Half);
        assert!(route.site.is_some());
    }
    // Site restriction compiles into the query string for each call.
    let first_site = routes[0].site.expect("site set");
    let compiled = compile(
        "best mechanical keyboard",
        &Qualifiers {
            site: Some(first_site.to_string()),
            ..Default::default()
        },
    );
    assert!(compiled.contains(&format!("site:{first_site}")));
}

#[test]
fn unmatched_query_falls_back_to_general() {
    let category = classify("weather in Lisbon tomorrow");
    assert_eq!(category, Category::General);

    let routes = routes(category);
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].backend, Backend::Web);
    assert!(routes[0].site.is_none());
}

#[test]
fn merge_ranks_across_lists_and_truncates() {
    let category = vec![
        make_result("arXiv", "a", "medium length snippet text"),
        make_result("arXiv", "b", "short"),
    ];
    let general = vec![make_result(
        "DuckDuckGo",
        "c",
        "the longest snippet of all the candidate results in this merge",
    )];
    let qualifier = vec![make_result("DuckDuckGo", "d", "tiny")];

    let merged = merge_and_rank(category, general, qualifier, 3);
    assert_eq!(merged.len(), 3);
    assert_eq!(merged[0].title, "c");
    assert_eq!(merged[1].title, "a");
    assert_eq!(merged[2].title, "b");
}

#[test]
fn merge_preserves_list_order_for_equal_snippets() {
    let category = vec![make_result("arXiv", "first", "same snippet")];
    let general = vec![make_result("DuckDuckGo", "second", "same snippet")];
    let qualifier = vec![make_result("Google", "third", "same snippet")];

    let merged = merge_and_rank(category, general, qualifier, 5);
    let titles: Vec<_> = merged.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[test]
fn top_n_two_over_five_candidates_yields_two() {
    let candidates: Vec<_> = (1..=5)
        .map(|i| make_result("DuckDuckGo", &format!("t{i}"), &"s".repeat(i * 10)))
        .collect();

    let merged = merge_and_rank(candidates, Vec::new(), Vec::new(), 2);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].title, "t5");
    assert_eq!(merged[1].title, "t4");
}

#[test]
fn json_output_round_trips_all_four_fields() {
    let results = vec![
        make_result("Wikipedia", "Quantum computing", "A type of computation."),
        make_result("arXiv", "Qubit benchmarks", "We benchmark qubits."),
    ];
    let json = render_json(&results).expect("should serialize");
    let decoded: Vec<SearchResult> = serde_json::from_str(&json).expect("should parse");

    assert_eq!(decoded.len(), 2);
    for (input, output) in results.iter().zip(&decoded) {
        assert_eq!(input.source, output.source);
        assert_eq!(input.title, output.title);
        assert_eq!(input.link, output.link);
        assert_eq!(input.snippet, output.snippet);
    }
}

#[test]
fn empty_merge_renders_valid_documents_in_every_format() {
    let merged = merge_and_rank(Vec::new(), Vec::new(), Vec::new(), 5);
    assert!(merged.is_empty());

    let json = render_json(&merged).expect("should serialize");
    assert_eq!(json, "[]");
    let decoded: Vec<SearchResult> = serde_json::from_str(&json).expect("should parse");
    assert!(decoded.is_empty());

    let md = format_markdown(&merged, &[]);
    assert!(md.starts_with("# Search Results"));

    let html = format_html(&merged, &[]);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.ends_with("</body></html>"));
}

#[tokio::test]
async fn empty_run_still_writes_a_valid_report_file() {
    let dir = std::env::temp_dir().join("scout-empty-report");
    std::fs::create_dir_all(&dir).expect("temp dir");

    let merged = merge_and_rank(Vec::new(), Vec::new(), Vec::new(), 5);
    let config = SearchConfig::default();
    let path = write_report(&merged, OutputFormat::Json, 5, &config, &dir)
        .await
        .expect("should write");

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .expect("file name");
    assert!(name.starts_with("search_results_"));
    assert!(name.ends_with(".json"));

    let body = std::fs::read_to_string(&path).expect("should read back");
    assert_eq!(body, "[]");

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn report_file_extension_follows_format() {
    let dir = std::env::temp_dir().join("scout-html-report");
    std::fs::create_dir_all(&dir).expect("temp dir");

    // Empty input: the HTML path fetches no excerpts, so no network.
    let config = SearchConfig::default();
    let path = write_report(&[], OutputFormat::Html, 5, &config, &dir)
        .await
        .expect("should write");

    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("html"));
    let body = std::fs::read_to_string(&path).expect("should read back");
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.ends_with("</body></html>"));

    std::fs::remove_file(&path).ok();
}

#[test]
fn qualifier_search_query_combines_base_and_flags() {
    let quals = Qualifiers {
        site: Some("arxiv.org".into()),
        filetype: Some("pdf".into()),
        after: Some("2022-01-01".into()),
        ..Default::default()
    };
    assert!(!quals.is_empty());

    let compiled = compile("diffusion models", &quals);
    assert_eq!(
        compiled,
        "diffusion models filetype:pdf site:arxiv.org after:2022-01-01"
    );
}
