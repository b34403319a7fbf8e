//! Page fetcher trait and built-in fetchers
//!
//! A [`PageFetcher`] serves one data domain (part types, sub types, ...).
//! Real deployments back it with an HTTP client; [`StaticFetcher`] serves an
//! in-memory sequence and [`FnFetcher`] adapts a closure.

use crate::error::FetchError;
use crate::option::SelectOption;
use crate::page::{Page, PageRequest};
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Asynchronous source of pages for one data domain
///
/// Implementations may fail with a [`FetchError`]. Timeouts are the
/// implementation's concern; callers never cancel a fetch, they ignore its
/// result instead.
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    /// Fetch one page
    async fn fetch(&self, request: PageRequest) -> Result<Page<T>, FetchError>;
}

#[async_trait]
impl<T, F> PageFetcher<T> for Arc<F>
where
    T: Send + 'static,
    F: PageFetcher<T> + ?Sized,
{
    async fn fetch(&self, request: PageRequest) -> Result<Page<T>, FetchError> {
        self.as_ref().fetch(request).await
    }
}

/// Item that can be matched against search text
pub trait Searchable {
    /// Check whether the item matches an already lower-cased needle
    fn matches(&self, needle: &str) -> bool;
}

impl Searchable for SelectOption {
    fn matches(&self, needle: &str) -> bool {
        self.label().to_lowercase().contains(needle)
    }
}

impl Searchable for serde_json::Value {
    /// Match any top-level string field
    fn matches(&self, needle: &str) -> bool {
        match self {
            serde_json::Value::String(s) => s.to_lowercase().contains(needle),
            serde_json::Value::Object(map) => map.values().any(|v| {
                v.as_str()
                    .is_some_and(|s| s.to_lowercase().contains(needle))
            }),
            _ => false,
        }
    }
}

/// Fetcher over a fully available in-memory sequence
///
/// Applies a case-insensitive search filter, then offset pagination.
#[derive(Clone)]
pub struct StaticFetcher<T> {
    items: Arc<Vec<T>>,
}

impl<T> StaticFetcher<T> {
    /// Create fetcher over items
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }

    /// Create fetcher from shared items
    #[must_use]
    pub fn from_arc(items: Arc<Vec<T>>) -> Self {
        Self { items }
    }

    /// All items served by this fetcher
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T: Searchable + Clone> StaticFetcher<T> {
    /// Resolve a request synchronously
    #[must_use]
    pub fn page(&self, request: &PageRequest) -> Page<T> {
        match request.search.as_deref() {
            Some(search) => {
                let needle = search.trim().to_lowercase();
                let filtered: Vec<T> = self
                    .items
                    .iter()
                    .filter(|item| item.matches(&needle))
                    .cloned()
                    .collect();
                Page::slice(&filtered, request.page, request.page_size)
            }
            None => Page::slice(&self.items, request.page, request.page_size),
        }
    }
}

impl<T> fmt::Debug for StaticFetcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticFetcher")
            .field("len", &self.items.len())
            .finish()
    }
}

#[async_trait]
impl<T> PageFetcher<T> for StaticFetcher<T>
where
    T: Searchable + Clone + Send + Sync + 'static,
{
    async fn fetch(&self, request: PageRequest) -> Result<Page<T>, FetchError> {
        Ok(self.page(&request))
    }
}

/// Fetcher backed by an async closure
pub struct FnFetcher<F> {
    f: F,
}

impl<F> FnFetcher<F> {
    /// Wrap closure
    #[inline]
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnFetcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFetcher").finish_non_exhaustive()
    }
}

#[async_trait]
impl<T, F, Fut> PageFetcher<T> for FnFetcher<F>
where
    T: Send + 'static,
    F: Fn(PageRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Page<T>, FetchError>> + Send,
{
    async fn fetch(&self, request: PageRequest) -> Result<Page<T>, FetchError> {
        (self.f)(request).await
    }
}
