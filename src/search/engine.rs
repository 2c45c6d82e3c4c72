//! Free-text search over the catalog
//!
//! A search records the query, reports `Searching` for the configured delay
//! and then publishes its results. When a newer search (or a clear) starts
//! while one is pending, only the newest one publishes.

use super::history::SearchHistory;
use crate::catalog::{Book, CatalogStore};
use crate::core::config::SearchConfig;
use crate::storage::{keys, KeyValueStore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};

/// What the search screen should show
#[derive(Debug, Clone, PartialEq)]
pub enum SearchStatus {
    Idle,
    Searching { query: String },
    Ready { query: String, results: Vec<Book> },
}

impl SearchStatus {
    pub fn is_searching(&self) -> bool {
        matches!(self, SearchStatus::Searching { .. })
    }
}

/// Case-insensitive substring match on title, author or any category tag
pub fn matches(book: &Book, query: &str) -> bool {
    let needle = query.to_lowercase();
    book.title.to_lowercase().contains(&needle)
        || book.author.to_lowercase().contains(&needle)
        || book
            .categories
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Matching books in catalog order; blank queries match nothing
pub fn search_catalog(catalog: &CatalogStore, query: &str) -> Vec<Book> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    catalog
        .universe()
        .filter(|book| matches(book, query))
        .cloned()
        .collect()
}

pub struct SearchEngine {
    catalog: Arc<CatalogStore>,
    store: Arc<dyn KeyValueStore>,
    history: Mutex<SearchHistory>,
    status: watch::Sender<SearchStatus>,
    generation: AtomicU64,
    delay: Duration,
}

impl SearchEngine {
    /// Create the engine and hydrate history from storage
    pub async fn load(
        catalog: Arc<CatalogStore>,
        store: Arc<dyn KeyValueStore>,
        config: &SearchConfig,
    ) -> Self {
        let history = match store.get(keys::SEARCH_HISTORY).await {
            Ok(Some(raw)) => SearchHistory::decode(&raw, config.history_limit),
            Ok(None) => SearchHistory::new(config.history_limit),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read search history, starting empty");
                SearchHistory::new(config.history_limit)
            }
        };
        tracing::debug!(entries = history.len(), "Search history loaded");

        let (status, _) = watch::channel(SearchStatus::Idle);
        Self {
            catalog,
            store,
            history: Mutex::new(history),
            status,
            generation: AtomicU64::new(0),
            delay: config.delay(),
        }
    }

    /// Run a search and return its results
    ///
    /// The returned results are always those of this query, even when a
    /// newer search has since taken over the published status.
    pub async fn search(&self, query: &str) -> Vec<Book> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if query.trim().is_empty() {
            self.status.send_replace(SearchStatus::Idle);
            return Vec::new();
        }

        self.record(query).await;
        self.status.send_replace(SearchStatus::Searching {
            query: query.to_string(),
        });

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let results = search_catalog(&self.catalog, query);
        if self.generation.load(Ordering::SeqCst) == generation {
            tracing::debug!(query, results = results.len(), "Search finished");
            self.status.send_replace(SearchStatus::Ready {
                query: query.to_string(),
                results: results.clone(),
            });
        } else {
            tracing::debug!(query, "Search superseded");
        }
        results
    }

    /// Drop the current results and cancel any pending publication
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.status.send_replace(SearchStatus::Idle);
    }

    pub fn status(&self) -> SearchStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchStatus> {
        self.status.subscribe()
    }

    pub async fn history(&self) -> Vec<String> {
        self.history.lock().await.entries().to_vec()
    }

    pub async fn clear_history(&self) {
        self.history.lock().await.clear();
        if let Err(e) = self.store.remove(keys::SEARCH_HISTORY).await {
            tracing::warn!(error = %e, "Failed to remove search history");
        }
        tracing::info!("Search history cleared");
    }

    async fn record(&self, query: &str) {
        let encoded = {
            let mut history = self.history.lock().await;
            if !history.record(query) {
                return;
            }
            history.encode()
        };

        tracing::info!(query, "Query added to search history");
        let result = match encoded {
            Ok(raw) => self.store.set(keys::SEARCH_HISTORY, &raw).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist search history");
        }
    }
}
