//! Paging configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings shared by pagination engines and searchable loaders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Items per page
    pub page_size: usize,
    /// Page the cursor returns to on reset (1-based)
    pub initial_page: u32,
    /// Artificial delay before a client-mode page is revealed
    pub client_latency_ms: u64,
    /// Quiet period after a query change before the fetch is issued
    pub search_debounce_ms: u64,
}

impl PagingConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With page size
    #[inline]
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// With initial page
    #[inline]
    #[must_use]
    pub fn with_initial_page(mut self, page: u32) -> Self {
        self.initial_page = page;
        self
    }

    /// With client-mode latency
    #[inline]
    #[must_use]
    pub fn with_client_latency(mut self, latency: Duration) -> Self {
        self.client_latency_ms = duration_ms(latency);
        self
    }

    /// With search debounce
    #[inline]
    #[must_use]
    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce_ms = duration_ms(debounce);
        self
    }

    /// Page size, never zero
    #[inline]
    #[must_use]
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Initial page, never zero
    #[inline]
    #[must_use]
    pub fn effective_initial_page(&self) -> u32 {
        self.initial_page.max(1)
    }

    /// Client latency as a duration
    #[inline]
    #[must_use]
    pub fn client_latency(&self) -> Duration {
        Duration::from_millis(self.client_latency_ms)
    }

    /// Search debounce as a duration
    #[inline]
    #[must_use]
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            initial_page: 1,
            client_latency_ms: 0,
            search_debounce_ms: 0,
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
