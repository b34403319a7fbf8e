//! Fetchers bound to logical cache keys

use pcat_option::PageFetcher;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Maps a logical key (a part-type name, say) to the fetcher serving it
pub struct FetcherRegistry<T> {
    fetchers: HashMap<String, Arc<dyn PageFetcher<T>>>,
}

impl<T> FetcherRegistry<T> {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            fetchers: HashMap::new(),
        }
    }

    /// Register fetcher for key, replacing any previous one
    pub fn register(&mut self, key: impl Into<String>, fetcher: Arc<dyn PageFetcher<T>>) {
        self.fetchers.insert(key.into(), fetcher);
    }

    /// Builder-style [`register`](Self::register)
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, fetcher: Arc<dyn PageFetcher<T>>) -> Self {
        self.register(key, fetcher);
        self
    }

    /// Fetcher for key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<dyn PageFetcher<T>>> {
        self.fetchers.get(key).cloned()
    }

    /// Check if key has a fetcher
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fetchers.contains_key(key)
    }

    /// Registered keys, sorted
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.fetchers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of registered keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fetchers.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fetchers.is_empty()
    }
}

impl<T> Default for FetcherRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FetcherRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetcherRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcat_option::{SelectOption, StaticFetcher};

    #[test]
    fn register_and_lookup() {
        let registry: FetcherRegistry<SelectOption> = FetcherRegistry::new()
            .with("engine", Arc::new(StaticFetcher::new(Vec::new())))
            .with("cabin", Arc::new(StaticFetcher::new(Vec::new())));

        assert!(registry.contains("cabin"));
        assert!(registry.get("axle").is_none());
        assert_eq!(registry.keys(), vec!["cabin", "engine"]);
        assert_eq!(registry.len(), 2);
    }
}
