//! Screen-scoped option context

use crate::config::CatalogConfig;
use pcat_cache::{CacheEntry, CacheError, CacheStats, FetcherRegistry, OptionCache};
use pcat_option::{OptionValue, Page, PageFetcher, SelectOption, StaticFetcher};
use pcat_paging::{PaginationEngine, SearchableLoader};
use pcat_subtype::{DomainTable, SubTypeFetcher, SubTypeResolver};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Option loading for one catalogue screen
///
/// Owns the parent-record cache and the sub-type resolver built over it.
/// Widgets ask it for engines and loaders; dropping the context drops every
/// cached domain with it.
pub struct CatalogOptions {
    config: CatalogConfig,
    cache: Arc<OptionCache<Value>>,
    resolver: Arc<SubTypeResolver>,
}

impl CatalogOptions {
    /// Create context over fetchers keyed by domain tag
    #[must_use]
    pub fn new(registry: FetcherRegistry<Value>, config: CatalogConfig) -> Self {
        let cache = Arc::new(OptionCache::new(registry, config.cache.clone()));
        let resolver = Arc::new(SubTypeResolver::new(config.domain_table(), Arc::clone(&cache)));

        debug!(domains = ?cache.registry().keys(), "catalogue context created");
        Self {
            config,
            cache,
            resolver,
        }
    }

    /// Create context over in-memory records keyed by domain tag
    #[must_use]
    pub fn from_records(records: BTreeMap<String, Vec<Value>>, config: CatalogConfig) -> Self {
        let registry = records
            .into_iter()
            .fold(FetcherRegistry::new(), |registry, (domain, rows)| {
                let fetcher: Arc<dyn PageFetcher<Value>> = Arc::new(StaticFetcher::new(rows));
                registry.with(domain, fetcher)
            });
        Self::new(registry, config)
    }

    /// Load a domain's parent records if not already cached
    ///
    /// # Errors
    /// As [`OptionCache::ensure_loaded`]
    pub async fn ensure_loaded(&self, domain: &str) -> Result<Arc<CacheEntry<Value>>, CacheError> {
        self.cache.ensure_loaded(domain).await
    }

    /// Parent records of a domain as options
    pub async fn parent_options(&self, domain: &str) -> Vec<SelectOption> {
        self.resolver.parent_options(domain).await
    }

    /// Searchable, paged loader over a domain's parent options
    ///
    /// Parent records are fetched through the cache once; paging and search
    /// then run over the cached list.
    pub async fn parent_loader(&self, domain: &str) -> SearchableLoader<SelectOption> {
        let options = self.parent_options(domain).await;
        SearchableLoader::new(Arc::new(StaticFetcher::new(options)), self.config.paging.clone())
            .named(domain)
    }

    /// Searchable, paged loader over one parent's sub types
    #[must_use]
    pub fn subtype_loader(
        &self,
        domain: &str,
        parent_id: impl Into<OptionValue>,
    ) -> SearchableLoader<SelectOption> {
        let fetcher = SubTypeFetcher::new(Arc::clone(&self.resolver), domain, parent_id);
        SearchableLoader::new(Arc::new(fetcher), self.config.paging.clone())
            .named(format!("{domain}/subtypes"))
    }

    /// Client-mode engine over a list the screen already holds
    #[must_use]
    pub fn client_engine(&self, options: Vec<SelectOption>) -> PaginationEngine<SelectOption> {
        PaginationEngine::client(options, self.config.paging.clone())
    }

    /// One page of a parent's sub types
    pub async fn subtypes(
        &self,
        domain: &str,
        parent_id: &OptionValue,
        search: &str,
        page: u32,
        page_size: usize,
    ) -> Page<SelectOption> {
        self.resolver.resolve(domain, parent_id, search, page, page_size).await
    }

    /// Drop a domain's cached records
    pub async fn invalidate(&self, domain: &str) {
        self.cache.invalidate(domain).await;
    }

    /// Domain table in effect
    #[inline]
    #[must_use]
    pub fn domains(&self) -> &DomainTable {
        self.resolver.table()
    }

    /// Cache statistics
    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Parent-record cache
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &Arc<OptionCache<Value>> {
        &self.cache
    }

    /// Sub-type resolver
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> &Arc<SubTypeResolver> {
        &self.resolver
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

impl fmt::Debug for CatalogOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogOptions")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
