//! Backend adapters.
//!
//! Each module maps one external search service's response shape into
//! the common [`crate::types::SearchResult`] record. Every adapter
//! exposes an async `search` returning `Result<Vec<SearchResult>>`;
//! the dispatcher absorbs errors into empty result sets, so no backend
//! failure ever aborts a search run. Parsing is split from the network
//! call in each module so it can be tested against fixture payloads.

pub mod arxiv;
pub mod duckduckgo;
pub mod google;
pub mod scholar;
pub mod wikipedia;
