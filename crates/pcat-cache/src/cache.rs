//! Keyed single-flight option cache using moka
//!
//! Loads the first batch for a key the first time someone asks for it and
//! keeps it until the key is invalidated (or its TTL runs out). Concurrent
//! requests for a key that is still loading wait for the same fetch.

use crate::error::CacheError;
use crate::registry::FetcherRegistry;
use dashmap::{DashMap, DashSet};
use moka::future::Cache;
use pcat_option::{FetchError, PageRequest};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of keys held
    pub max_capacity: u64,
    /// Entries older than this many milliseconds are reloaded on next
    /// request; zero disables expiry
    pub ttl_ms: Option<u64>,
    /// Items requested for a key's first (and only) batch
    pub first_batch_size: usize,
}

impl CacheConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With max capacity
    #[inline]
    #[must_use]
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// With time-to-live
    #[inline]
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_ms = Some(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1));
        self
    }

    /// With first batch size
    #[inline]
    #[must_use]
    pub fn with_first_batch_size(mut self, size: usize) -> Self {
        self.first_batch_size = size;
        self
    }

    /// Time-to-live, `None` when entries never expire
    #[must_use]
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 1_000,
            ttl_ms: None,
            first_batch_size: 100,
        }
    }
}

/// Loaded options for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<T> {
    /// Logical key
    pub key: String,
    /// First batch, in fetch order
    pub options: Vec<T>,
    /// Total reported by the fetcher (may exceed `options.len()`)
    pub total_items: usize,
    /// Logical version at which the entry was stored
    pub loaded_at: u64,
    /// Invalidation epoch the load started under
    pub epoch: u64,
}

/// Lifecycle state of one key
#[derive(Debug, Clone)]
pub enum EntryState<T> {
    /// Never requested, or invalidated
    Absent,
    /// First fetch in flight
    Loading,
    /// Loaded and fresh
    Ready(Arc<CacheEntry<T>>),
}

impl<T> EntryState<T> {
    /// Check if a fetch is in flight
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
    /// Fetches issued since creation
    pub fetch_count: u64,
    /// Keys currently loading
    pub loading_count: usize,
}

/// Lazily loaded, keyed option store
///
/// Only keys that are actually requested are fetched; nothing is loaded
/// eagerly.
pub struct OptionCache<T> {
    entries: Cache<String, Arc<CacheEntry<T>>>,
    registry: FetcherRegistry<T>,
    loading: DashSet<String>,
    epochs: DashMap<String, u64>,
    cleared: AtomicU64,
    version: AtomicU64,
    fetch_count: AtomicU64,
    config: CacheConfig,
}

/// Marks a key as loading for as long as it lives
struct LoadingGuard<'a> {
    set: &'a DashSet<String>,
    key: &'a str,
}

impl<'a> LoadingGuard<'a> {
    fn new(set: &'a DashSet<String>, key: &'a str) -> Self {
        set.insert(key.to_string());
        Self { set, key }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.set.remove(self.key);
    }
}

impl<T: Clone + Send + Sync + 'static> OptionCache<T> {
    /// Create cache over registered fetchers
    #[must_use]
    pub fn new(registry: FetcherRegistry<T>, config: CacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.max_capacity);
        if let Some(ttl) = config.ttl() {
            builder = builder.time_to_live(ttl);
        }

        Self {
            entries: builder.build(),
            registry,
            loading: DashSet::new(),
            epochs: DashMap::new(),
            cleared: AtomicU64::new(0),
            version: AtomicU64::new(0),
            fetch_count: AtomicU64::new(0),
            config,
        }
    }

    /// Make sure the key's options are loaded
    ///
    /// Returns the existing entry without side effects when present. If no
    /// entry exists the key's fetcher is called for its first batch; callers
    /// arriving while that fetch is in flight share its result instead of
    /// issuing their own. A failed fetch stores nothing, so the next call
    /// retries. A load that an [`invalidate`](Self::invalidate) overtook is
    /// discarded and fetched again.
    ///
    /// # Errors
    /// - `CacheError::UnknownKey` if no fetcher is registered for `key`
    /// - `CacheError::Fetch` if the shared fetch failed
    pub async fn ensure_loaded(&self, key: &str) -> Result<Arc<CacheEntry<T>>, CacheError> {
        loop {
            let entry = self.load_entry(key).await?;
            if entry.epoch == self.epoch(key) {
                return Ok(entry);
            }

            debug!(key, loaded_at = entry.loaded_at, "load predates invalidation; refetching");
            self.entries.invalidate(key).await;
        }
    }

    async fn load_entry(&self, key: &str) -> Result<Arc<CacheEntry<T>>, CacheError> {
        if let Some(entry) = self.entries.get(key).await {
            trace!(key, loaded_at = entry.loaded_at, "option cache hit");
            return Ok(entry);
        }

        let fetcher = self
            .registry
            .get(key)
            .ok_or_else(|| CacheError::UnknownKey(key.to_string()))?;
        let batch = self.config.first_batch_size.max(1);

        let init = async {
            let _loading = LoadingGuard::new(&self.loading, key);
            let epoch = self.epoch(key);
            self.fetch_count.fetch_add(1, Ordering::Relaxed);
            debug!(key, batch, "loading options");

            let page = fetcher.fetch(PageRequest::new(1, batch)).await?;
            let loaded_at = self.version.fetch_add(1, Ordering::SeqCst) + 1;
            debug!(key, count = page.items.len(), loaded_at, "options loaded");

            Ok::<_, FetchError>(Arc::new(CacheEntry {
                key: key.to_string(),
                total_items: page.total_items,
                options: page.items,
                loaded_at,
                epoch,
            }))
        };

        self.entries
            .try_get_with(key.to_string(), init)
            .await
            .map_err(|err| {
                warn!(key, error = %err, "option load failed");
                CacheError::Fetch(err)
            })
    }

    /// Invalidation count for key, including cache-wide clears
    fn epoch(&self, key: &str) -> u64 {
        let own = self.epochs.get(key).map_or(0, |epoch| *epoch);
        own + self.cleared.load(Ordering::SeqCst)
    }

    /// Loaded entry for key, if any
    #[must_use]
    pub async fn get(&self, key: &str) -> Option<Arc<CacheEntry<T>>> {
        self.entries
            .get(key)
            .await
            .filter(|entry| entry.epoch == self.epoch(key))
    }

    /// Lifecycle state of key
    #[must_use]
    pub async fn state(&self, key: &str) -> EntryState<T> {
        if self.loading.contains(key) {
            return EntryState::Loading;
        }
        match self.get(key).await {
            Some(entry) => EntryState::Ready(entry),
            None => EntryState::Absent,
        }
    }

    /// Check if key's first fetch is in flight
    #[inline]
    #[must_use]
    pub fn is_loading(&self, key: &str) -> bool {
        self.loading.contains(key)
    }

    /// Check if key has a stored entry
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop key's entry so the next request refetches
    ///
    /// Used when the parent record changed. A load already in flight for
    /// the key is not returned to its callers; they fetch again.
    pub async fn invalidate(&self, key: &str) {
        *self.epochs.entry(key.to_string()).or_insert(0) += 1;
        debug!(key, epoch = self.epoch(key), "invalidating options");
        self.entries.invalidate(key).await;
    }

    /// Drop every entry
    pub fn invalidate_all(&self) {
        self.cleared.fetch_add(1, Ordering::SeqCst);
        self.entries.invalidate_all();
    }

    /// Registered fetchers
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &FetcherRegistry<T> {
        &self.registry
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        self.entries.run_pending_tasks().await;
        CacheStats {
            entry_count: self.entries.entry_count(),
            fetch_count: self.fetch_count.load(Ordering::Relaxed),
            loading_count: self.loading.len(),
        }
    }
}

impl<T> fmt::Debug for OptionCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionCache")
            .field("registry", &self.registry)
            .field("loading", &self.loading.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
