//! Testing utilities for PCAT workspace
//!
//! Shared fetchers and fixtures:
//! - [`ScriptedFetcher`] replays a fixed list of responses
//! - [`CountingFetcher`] wraps any fetcher and records its requests
//! - [`GatedFetcher`] parks every request until the test answers it

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use pcat_option::{FetchError, Page, PageFetcher, PageRequest, SelectOption};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{oneshot, Notify};

/// Replays queued responses in order; fails once the script runs out
#[derive(Debug)]
pub struct ScriptedFetcher<T> {
    script: Mutex<VecDeque<Result<Page<T>, FetchError>>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl<T> ScriptedFetcher<T> {
    pub fn new(script: impl IntoIterator<Item = Result<Page<T>, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl<T: Send + 'static> PageFetcher<T> for ScriptedFetcher<T> {
    async fn fetch(&self, request: PageRequest) -> Result<Page<T>, FetchError> {
        self.requests.lock().push(request);
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::transport("script exhausted")))
    }
}

/// Counts calls to an inner fetcher
#[derive(Debug)]
pub struct CountingFetcher<F> {
    inner: F,
    calls: AtomicUsize,
    requests: Mutex<Vec<PageRequest>>,
}

impl<F> CountingFetcher<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl<T, F> PageFetcher<T> for CountingFetcher<F>
where
    T: Send + 'static,
    F: PageFetcher<T>,
{
    async fn fetch(&self, request: PageRequest) -> Result<Page<T>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());
        // Yield so concurrent callers get a chance to race this one
        tokio::task::yield_now().await;
        self.inner.fetch(request).await
    }
}

type Reply<T> = oneshot::Sender<Result<Page<T>, FetchError>>;

/// Parks each request until [`GatedFetcher::respond`] answers it
///
/// Lets tests decide the order in which concurrent requests resolve.
#[derive(Debug)]
pub struct GatedFetcher<T> {
    pending: Mutex<Vec<(PageRequest, Option<Reply<T>>)>>,
    arrived: Notify,
}

impl<T> Default for GatedFetcher<T> {
    fn default() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            arrived: Notify::new(),
        }
    }
}

impl<T> GatedFetcher<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until at least `count` requests have arrived
    pub async fn wait_for_requests(&self, count: usize) {
        loop {
            let notified = self.arrived.notified();
            if self.pending.lock().len() >= count {
                return;
            }
            notified.await;
        }
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<PageRequest> {
        self.pending.lock().iter().map(|(r, _)| r.clone()).collect()
    }

    /// Answer the request that arrived at position `index`
    ///
    /// # Panics
    /// If the request does not exist or was already answered.
    pub fn respond(&self, index: usize, result: Result<Page<T>, FetchError>) {
        let reply = self.pending.lock()[index]
            .1
            .take()
            .expect("request already answered");
        // Receiver may be gone if the caller was dropped
        let _ = reply.send(result);
    }
}

#[async_trait]
impl<T: Send + 'static> PageFetcher<T> for GatedFetcher<T> {
    async fn fetch(&self, request: PageRequest) -> Result<Page<T>, FetchError> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().push((request, Some(tx)));
        self.arrived.notify_waiters();
        rx.await
            .unwrap_or_else(|_| Err(FetchError::transport("gate dropped")))
    }
}

/// Options labelled `Option 1..=n` with numeric values `1..=n`
pub fn numbered_options(n: usize) -> Vec<SelectOption> {
    (1..=n)
        .map(|i| SelectOption::new(i64::try_from(i).unwrap_or(i64::MAX), format!("Option {i}")))
        .collect()
}

/// Options labelled with a prefix, useful for telling search results apart
pub fn labelled_options(prefix: &str, n: usize) -> Vec<SelectOption> {
    (1..=n)
        .map(|i| SelectOption::new(format!("{prefix}-{i}"), format!("{prefix} {i}")))
        .collect()
}

/// A page of `n` numbered options starting after `offset`
pub fn option_page(offset: usize, n: usize, has_next_page: bool, total: usize) -> Page<SelectOption> {
    let items = (offset + 1..=offset + n)
        .map(|i| SelectOption::new(i64::try_from(i).unwrap_or(i64::MAX), format!("Option {i}")))
        .collect();
    Page::new(items, has_next_page, total)
}

/// Engine records: parent 10 carries seven sub types, two of them turbo
pub fn engine_records() -> Vec<Value> {
    vec![
        json!({
            "id": 10,
            "nameEn": "Diesel 6-cylinder",
            "nameAr": "ديزل ست اسطوانات",
            "engineSubTypes": [
                { "engineSubTypeId": 101, "nameEn": "Turbo Intercooled", "nameAr": "تيربو مبرد" },
                { "engineSubTypeId": 102, "nameEn": "Naturally Aspirated", "nameAr": "تنفس طبيعي" },
                { "engineSubTypeId": 103, "nameEn": "Twin TURBO", "nameAr": "تيربو مزدوج" },
                { "engineSubTypeId": 104, "nameEn": "Common Rail", "nameAr": "سكة مشتركة" },
                { "engineSubTypeId": 105, "nameEn": "Unit Injector", "nameAr": "حاقن وحدة" },
                { "engineSubTypeId": 106, "nameEn": "Euro 5", "nameAr": "يورو 5" },
                { "engineSubTypeId": 107, "nameEn": "Euro 6", "nameAr": "يورو 6" }
            ]
        }),
        json!({
            "id": 11,
            "nameEn": "Petrol V8",
            "nameAr": "بنزين V8",
            "engineSubTypes": [
                { "engineSubTypeId": 111, "nameEn": "Supercharged", "nameAr": "شاحن فائق" }
            ]
        }),
    ]
}

/// Cabin records: parent 1 carries three sub types
pub fn cabin_records() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "nameEn": "Sleeper",
            "nameAr": "نوم",
            "cabinSubTypes": [
                { "cabinSubTypeId": 1001, "nameEn": "High Roof", "nameAr": "سقف عالي" },
                { "cabinSubTypeId": 1002, "nameEn": "Low Roof", "nameAr": "سقف منخفض" },
                { "cabinSubTypeId": 1003, "nameEn": "", "nameAr": "ممتد" }
            ]
        }),
        json!({ "id": 2, "nameEn": "Day Cab", "nameAr": "نهاري", "cabinSubTypes": [] }),
    ]
}
