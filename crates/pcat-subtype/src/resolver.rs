//! Sub-type lookup over cached parent records

use crate::domain::{DomainTable, Leaf};
use async_trait::async_trait;
use pcat_cache::OptionCache;
use pcat_option::{FetchError, OptionValue, Page, PageFetcher, PageRequest, SelectOption};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves the sub types nested inside one parent record
///
/// Parent records come from an [`OptionCache`] keyed by domain tag, so
/// browsing several parents of the same domain fetches the domain once.
pub struct SubTypeResolver {
    table: DomainTable,
    parents: Arc<OptionCache<Value>>,
}

impl SubTypeResolver {
    /// Create resolver over a domain table and a parent-record cache
    #[must_use]
    pub fn new(table: DomainTable, parents: Arc<OptionCache<Value>>) -> Self {
        Self { table, parents }
    }

    /// One page of the parent's sub types
    ///
    /// `search_term` filters case-insensitively on either name; blank means
    /// no filter. Unknown domains, missing parents and failed loads all
    /// produce an empty page.
    pub async fn resolve(
        &self,
        domain_tag: &str,
        parent_id: &OptionValue,
        search_term: &str,
        page: u32,
        page_size: usize,
    ) -> Page<SelectOption> {
        let Some(leaves) = self.leaves(domain_tag, parent_id).await else {
            return Page::empty();
        };

        let needle = search_term.trim().to_lowercase();
        let matching: Vec<SelectOption> = leaves
            .into_iter()
            .filter(|leaf| needle.is_empty() || leaf.matches(&needle))
            .map(|leaf| leaf.option)
            .collect();

        debug!(
            domain = domain_tag,
            parent = %parent_id,
            matching = matching.len(),
            page,
            "sub types resolved"
        );
        Page::slice(&matching, page, page_size)
    }

    /// Parent records of a domain as options
    ///
    /// Empty when the domain is unknown or its records fail to load.
    pub async fn parent_options(&self, domain_tag: &str) -> Vec<SelectOption> {
        let Some(mapping) = self.table.get(domain_tag) else {
            return Vec::new();
        };

        match self.parents.ensure_loaded(domain_tag).await {
            Ok(entry) => entry
                .options
                .iter()
                .filter_map(|record| mapping.parent_option(record))
                .collect(),
            Err(e) => {
                warn!(domain = domain_tag, error = %e, "parent records unavailable");
                Vec::new()
            }
        }
    }

    /// Drop cached parent records for a domain
    pub async fn invalidate(&self, domain_tag: &str) {
        self.parents.invalidate(domain_tag).await;
    }

    /// Domain table
    #[inline]
    #[must_use]
    pub fn table(&self) -> &DomainTable {
        &self.table
    }

    /// Parent-record cache
    #[inline]
    #[must_use]
    pub fn parents(&self) -> &Arc<OptionCache<Value>> {
        &self.parents
    }

    async fn leaves(&self, domain_tag: &str, parent_id: &OptionValue) -> Option<Vec<Leaf>> {
        let Some(mapping) = self.table.get(domain_tag) else {
            debug!(domain = domain_tag, "unknown domain");
            return None;
        };

        let entry = match self.parents.ensure_loaded(domain_tag).await {
            Ok(entry) => entry,
            Err(e) => {
                warn!(domain = domain_tag, error = %e, "parent records unavailable");
                return None;
            }
        };

        let Some(parent) = entry.options.iter().find(|record| {
            mapping
                .parent_id(record)
                .is_some_and(|id| id.loosely_eq(parent_id))
        }) else {
            debug!(domain = domain_tag, parent = %parent_id, "parent not found");
            return None;
        };

        let leaves = mapping.leaves(parent);
        if leaves.is_none() {
            debug!(
                domain = domain_tag,
                parent = %parent_id,
                field = %mapping.leaves_field,
                "parent has no sub-type list"
            );
        }
        leaves
    }
}

impl fmt::Debug for SubTypeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubTypeResolver")
            .field("domains", &self.table.tags())
            .finish_non_exhaustive()
    }
}

/// [`PageFetcher`] over one parent's sub types
///
/// Lets a sub-type dropdown reuse the paging and search machinery built for
/// remote lists. Never fails; lookup problems surface as empty pages.
#[derive(Debug, Clone)]
pub struct SubTypeFetcher {
    resolver: Arc<SubTypeResolver>,
    domain_tag: String,
    parent_id: OptionValue,
}

impl SubTypeFetcher {
    /// Bind resolver to one (domain, parent) pair
    #[must_use]
    pub fn new(
        resolver: Arc<SubTypeResolver>,
        domain_tag: impl Into<String>,
        parent_id: impl Into<OptionValue>,
    ) -> Self {
        Self {
            resolver,
            domain_tag: domain_tag.into(),
            parent_id: parent_id.into(),
        }
    }
}

#[async_trait]
impl PageFetcher<SelectOption> for SubTypeFetcher {
    async fn fetch(&self, request: PageRequest) -> Result<Page<SelectOption>, FetchError> {
        Ok(self
            .resolver
            .resolve(
                &self.domain_tag,
                &self.parent_id,
                request.search.as_deref().unwrap_or_default(),
                request.page,
                request.page_size,
            )
            .await)
    }
}
