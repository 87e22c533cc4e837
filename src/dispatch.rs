//! Category dispatch: a declarative routing table mapping each query
//! category to an ordered list of backend invocations.
//!
//! Adding a category or backend is a data change to the tables below,
//! not new control flow. Backend failures are absorbed here — logged at
//! warn level and degraded to an empty batch — so one broken backend
//! never discards results already gathered from the others.

use crate::adapters;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::qualifiers;
use crate::types::{Category, DateFilter, SearchResult, WebEngine};
use std::future::Future;

/// Which adapter a route invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// arXiv academic index.
    Arxiv,
    /// Wikipedia encyclopedia.
    Wikipedia,
    /// Google Scholar citation index.
    Scholar,
    /// The CLI-selected general-web engine.
    Web,
}

/// How a route's result bound derives from the top-level `max_results`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The full top-level bound.
    Full,
    /// Integer half of the top-level bound, used when a category fans
    /// out across several partner sites.
    Half,
}

impl Bound {
    /// Resolve against the top-level bound.
    pub fn apply(self, max_results: usize) -> usize {
        match self {
            Self::Full => max_results,
            Self::Half => max_results / 2,
        }
    }
}

/// One backend invocation in a category's routing list.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub backend: Backend,
    /// Partner-site restriction compiled into the query for web routes.
    pub site: Option<&'static str>,
    pub bound: Bound,
}

const ACADEMIC_ROUTES: &[Route] = &[
    Route {
        backend: Backend::Arxiv,
        site: None,
        bound: Bound::Full,
    },
    Route {
        backend: Backend::Scholar,
        site: None,
        bound: Bound::Full,
    },
];

const KNOWLEDGE_ROUTES: &[Route] = &[Route {
    backend: Backend::Wikipedia,
    site: None,
    bound: Bound::Full,
}];

const PRODUCT_ROUTES: &[Route] = &[
    Route {
        backend: Backend::Web,
        site: Some("techradar.com"),
        bound: Bound::Half,
    },
    Route {
        backend: Backend::Web,
        site: Some("cnet.com"),
        bound: Bound::Half,
    },
    Route {
        backend: Backend::Web,
        site: Some("reddit.com"),
        bound: Bound::Half,
    },
];

const POLICY_ROUTES: &[Route] = &[
    Route {
        backend: Backend::Web,
        site: Some("ustr.gov"),
        bound: Bound::Half,
    },
    Route {
        backend: Backend::Web,
        site: Some("reuters.com"),
        bound: Bound::Half,
    },
];

const GENERAL_ROUTES: &[Route] = &[Route {
    backend: Backend::Web,
    site: None,
    bound: Bound::Full,
}];

/// The ordered backend invocations for a category.
pub fn routes(category: Category) -> &'static [Route] {
    match category {
        Category::Academic => ACADEMIC_ROUTES,
        Category::Knowledge => KNOWLEDGE_ROUTES,
        Category::Product => PRODUCT_ROUTES,
        Category::Policy => POLICY_ROUTES,
        Category::General => GENERAL_ROUTES,
    }
}

/// Race a backend call against an interruption signal.
///
/// When `interrupt` resolves first the call is abandoned and degrades
/// to an empty batch, so results gathered by earlier routes survive and
/// the run still reaches the render and file-write steps. Used for the
/// Scholar route, whose aggressive throttling makes it the one backend
/// a user is likely to give up on mid-request.
pub(crate) async fn until_interrupted<S, I>(
    search: S,
    interrupt: I,
) -> Result<Vec<SearchResult>, SearchError>
where
    S: Future<Output = Result<Vec<SearchResult>, SearchError>>,
    I: Future<Output = ()>,
{
    tokio::select! {
        outcome = search => outcome,
        () = interrupt => {
            tracing::warn!("search interrupted, skipping route");
            Ok(Vec::new())
        }
    }
}

/// Run the CLI-selected general-web engine.
pub async fn web_search(
    engine: WebEngine,
    query: &str,
    max_results: usize,
    dates: &DateFilter,
    config: &SearchConfig,
) -> Result<Vec<SearchResult>, SearchError> {
    match engine {
        WebEngine::Duckduckgo => {
            adapters::duckduckgo::search(query, max_results, dates, config).await
        }
        WebEngine::Google => adapters::google::search(query, max_results, dates, config).await,
    }
}

/// Fan a query out to the backends registered for `category`, in table
/// order, sequentially.
///
/// Each route's failure is absorbed into an empty batch; results from
/// earlier routes are always preserved. The concatenated list is
/// truncated to `max_results`.
pub async fn dispatch(
    category: Category,
    query: &str,
    max_results: usize,
    engine: WebEngine,
    config: &SearchConfig,
) -> Vec<SearchResult> {
    tracing::debug!(%category, query, max_results, "dispatching");

    let mut results = Vec::new();

    for route in routes(category) {
        let bound = route.bound.apply(max_results);

        let outcome = match route.backend {
            Backend::Arxiv => adapters::arxiv::search(query, bound, config).await,
            Backend::Wikipedia => adapters::wikipedia::search(query, bound, config).await,
            Backend::Scholar => {
                until_interrupted(adapters::scholar::search(query, bound, config), async {
                    let _ = tokio::signal::ctrl_c().await;
                })
                .await
            }
            Backend::Web => {
                let compiled = match route.site {
                    Some(site) => qualifiers::compile(query, &qualifiers::site_only(site)),
                    None => query.to_owned(),
                };
                web_search(engine, &compiled, bound, &DateFilter::default(), config).await
            }
        };

        match outcome {
            Ok(batch) => {
                tracing::debug!(backend = ?route.backend, count = batch.len(), "route returned");
                results.extend(batch);
            }
            Err(err) => {
                tracing::warn!(backend = ?route.backend, error = %err, "route failed, skipping");
            }
        }
    }

    results.truncate(max_results);
    results
}
