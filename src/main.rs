//! scout CLI: classify a research query, fan it out to search backends
//! and write the rendered results to a timestamped file.

use clap::Parser;
use scout::config::SearchConfig;
use scout::qualifiers::Qualifiers;
use scout::render::OutputFormat;
use scout::types::{Category, DateFilter, WebEngine};
use scout::{classify, dispatch, qualifiers, rank, render};
use tracing_subscriber::EnvFilter;

/// Research-query fan-out: classify, search, excerpt, render.
#[derive(Debug, Parser)]
#[command(name = "scout", version, about)]
struct Cli {
    /// The search query.
    #[arg(long)]
    query: String,

    /// Force a search category instead of classifying the query.
    #[arg(long, value_enum)]
    category: Option<Category>,

    /// Run a general web search in addition to the category search.
    #[arg(long)]
    include_general: bool,

    /// General-web engine to use.
    #[arg(long, value_enum, default_value = "duckduckgo")]
    engine: WebEngine,

    /// Number of results to return.
    #[arg(long, default_value_t = 5)]
    top_n: usize,

    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Restrict results to a site.
    #[arg(long)]
    site: Option<String>,

    /// Restrict results to a file type.
    #[arg(long)]
    filetype: Option<String>,

    /// Require a keyword in the result URL.
    #[arg(long)]
    inurl: Option<String>,

    /// Require a keyword in the result title.
    #[arg(long)]
    intitle: Option<String>,

    /// Require a keyword in the result body.
    #[arg(long)]
    intext: Option<String>,

    /// Require all keywords in the result URL.
    #[arg(long)]
    allinurl: Option<String>,

    /// Require all keywords in the result title.
    #[arg(long)]
    allintitle: Option<String>,

    /// Require all keywords in the result body.
    #[arg(long)]
    allintext: Option<String>,

    /// Exclude results dated on or after this date (YYYY-MM-DD).
    #[arg(long)]
    before: Option<String>,

    /// Exclude results dated on or before this date (YYYY-MM-DD).
    #[arg(long)]
    after: Option<String>,

    /// Search for this exact phrase instead of the raw query.
    #[arg(long)]
    exact_phrase: Option<String>,

    /// Exclude results containing this term.
    #[arg(long)]
    exclude: Option<String>,

    /// Group the compiled query in parentheses.
    #[arg(long)]
    group: bool,

    /// Alternative terms, appended as an OR clause.
    #[arg(long)]
    or_terms: Option<String>,

    /// Enable debug-level diagnostics.
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn qualifiers(&self) -> Qualifiers {
        Qualifiers {
            site: self.site.clone(),
            filetype: self.filetype.clone(),
            inurl: self.inurl.clone(),
            intitle: self.intitle.clone(),
            intext: self.intext.clone(),
            allinurl: self.allinurl.clone(),
            allintitle: self.allintitle.clone(),
            allintext: self.allintext.clone(),
            before: self.before.clone(),
            after: self.after.clone(),
            exact_phrase: self.exact_phrase.clone(),
            exclude: self.exclude.clone(),
            group: self.group,
            or_terms: self.or_terms.clone(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "scout=debug" } else { "scout=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> scout::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = SearchConfig::default();
    config.validate()?;

    let category = cli.category.unwrap_or_else(|| classify(&cli.query));
    println!("Search category: {category}");

    let mut results =
        dispatch::dispatch(category, &cli.query, cli.top_n, cli.engine, &config).await;

    // The general supplement runs even when the category search was
    // already general; merging favours recall over dedup.
    if cli.include_general || category == Category::General {
        println!("Running general search...");
        match dispatch::web_search(
            cli.engine,
            &cli.query,
            cli.top_n,
            &DateFilter::default(),
            &config,
        )
        .await
        {
            Ok(batch) => results.extend(batch),
            Err(err) => tracing::warn!(error = %err, "general search failed, skipping"),
        }
    }

    let quals = cli.qualifiers();
    if !quals.is_empty() {
        println!("Running qualifier search...");
        let compiled = qualifiers::compile(&cli.query, &quals);
        let dates = DateFilter {
            before: quals.before.clone(),
            after: quals.after.clone(),
        };
        match dispatch::web_search(cli.engine, &compiled, cli.top_n, &dates, &config).await {
            Ok(batch) => results.extend(batch),
            Err(err) => tracing::warn!(error = %err, "qualifier search failed, skipping"),
        }
    }

    rank(&mut results);
    results.truncate(cli.top_n);
    tracing::debug!(count = results.len(), "results after ranking");

    let path = render::write_report(
        &results,
        cli.format,
        cli.top_n,
        &config,
        std::path::Path::new("."),
    )
    .await?;
    println!("Results saved to {}", path.display());

    Ok(())
}
