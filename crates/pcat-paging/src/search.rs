//! Search-driven option loading
//!
//! [`SearchableLoader`] backs the scroll-to-load dropdowns: typing replaces
//! the list with the first page for the new query, scrolling to the bottom
//! appends the next page of the same query.

use crate::config::PagingConfig;
use crate::engine::PaginationEngine;
use crate::state::{LoadOutcome, OptionListView, PaginationState};
use pcat_option::PageFetcher;
use std::sync::Arc;
use tracing::debug;

/// Pagination engine bound to a live search string
///
/// Every query change bumps the engine generation, so when several queries
/// race only the most recent one can land in the visible list.
#[derive(Debug)]
pub struct SearchableLoader<T> {
    engine: PaginationEngine<T>,
}

impl<T: Clone + Send + Sync + 'static> SearchableLoader<T> {
    /// Create loader over a fetcher
    ///
    /// Nothing is fetched until [`load_initial`](Self::load_initial),
    /// [`set_search`](Self::set_search) or a load-more call.
    #[must_use]
    pub fn new(fetcher: Arc<dyn PageFetcher<T>>, config: PagingConfig) -> Self {
        Self {
            engine: PaginationEngine::server(fetcher, config),
        }
    }

    /// Set the name used in log events
    #[must_use]
    pub fn named(self, name: impl Into<Arc<str>>) -> Self {
        Self {
            engine: self.engine.named(name),
        }
    }

    /// Replace the search string
    ///
    /// Drops the accumulated items at once, rewinds to the first page and
    /// fetches it with the new query. If another query is issued before the
    /// response arrives, that response is discarded and
    /// [`LoadOutcome::Stale`] is returned. Blank input clears the filter.
    pub async fn set_search(&self, query: impl Into<String>) -> LoadOutcome {
        let query = query.into();
        let query = if query.trim().is_empty() {
            None
        } else {
            Some(query)
        };

        debug!(
            loader = %self.engine.name(),
            query = query.as_deref().unwrap_or(""),
            "search changed"
        );
        let debounce = self.engine.config().search_debounce();
        self.engine.restart(query, debounce).await
    }

    /// Remove the search filter and reload from the first page
    pub async fn clear_search(&self) -> LoadOutcome {
        self.set_search(String::new()).await
    }

    /// Load the next page of the current query
    pub async fn load_more_for_current_query(&self) -> LoadOutcome {
        self.engine.load_more().await
    }

    /// Load the first page if nothing has been loaded yet
    ///
    /// Called when a dropdown opens. Returns `None` when the list is already
    /// populated or loading.
    pub async fn load_initial(&self) -> Option<LoadOutcome> {
        self.engine.ensure_first_page().await
    }

    /// Current search string
    #[must_use]
    pub fn query(&self) -> Option<String> {
        self.engine.query()
    }

    /// Items for the current query
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.engine.items()
    }

    /// Whether another page of the current query exists
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.engine.has_more()
    }

    /// Whether a request is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.engine.is_loading()
    }

    /// Snapshot for display
    #[must_use]
    pub fn view(&self) -> OptionListView<T> {
        self.engine.view()
    }

    /// Copy of the full state
    #[must_use]
    pub fn state(&self) -> PaginationState<T> {
        self.engine.state()
    }

    /// Underlying engine
    #[inline]
    #[must_use]
    pub fn engine(&self) -> &PaginationEngine<T> {
        &self.engine
    }
}
