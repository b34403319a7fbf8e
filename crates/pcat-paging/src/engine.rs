//! Pagination engine
//!
//! Holds the accumulated items of one list and serves them a page at a time.
//! The paging strategy is fixed at construction:
//!
//! - **Client**: the full sequence is already in memory; each load reveals
//!   one more page of it.
//! - **Server**: each load asks a [`PageFetcher`] for the next page and
//!   appends it.
//!
//! At most one load is in flight per engine. A load that arrives after a
//! [`reset`](PaginationEngine::reset) or a query change carries an outdated
//! generation and is dropped.

use crate::config::PagingConfig;
use crate::state::{LoadOutcome, OptionListView, PaginationState};
use parking_lot::Mutex;
use pcat_option::{FetchError, Page, PageFetcher, PageRequest};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Paging strategy selected at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingMode {
    /// Slice a fully available sequence
    Client,
    /// Fetch and append pages
    Server,
}

enum Strategy<T> {
    Client { all: Mutex<Arc<Vec<T>>> },
    Server { fetcher: Arc<dyn PageFetcher<T>> },
}

/// Work order for one load, tagged with the generation it was issued under
struct LoadTicket {
    generation: u64,
    request: PageRequest,
}

/// Clears `is_loading` when a load ends without applying its result
///
/// The load future can be dropped mid-fetch (a caller's timeout, a
/// cancelled task) or the fetcher can panic. A load superseded by a reset
/// no longer owns the flag, so the guard leaves it alone.
struct LoadingGuard<'a, T> {
    state: &'a Mutex<PaginationState<T>>,
    generation: u64,
    armed: bool,
}

impl<'a, T> LoadingGuard<'a, T> {
    fn new(state: &'a Mutex<PaginationState<T>>, generation: u64) -> Self {
        Self {
            state,
            generation,
            armed: true,
        }
    }

    /// Hand the flag back to the code that applies the result
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock();
        if state.generation == self.generation && state.is_loading {
            state.is_loading = false;
            trace!(generation = self.generation, "abandoned load released");
        }
    }
}

/// Incremental pagination over one list
pub struct PaginationEngine<T> {
    name: Arc<str>,
    config: PagingConfig,
    strategy: Strategy<T>,
    state: Mutex<PaginationState<T>>,
}

impl<T> fmt::Debug for PaginationEngine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("PaginationEngine")
            .field("name", &self.name)
            .field("mode", &self.mode())
            .field("loaded", &state.items.len())
            .field("current_page", &state.current_page)
            .field("has_more", &state.has_more)
            .field("is_loading", &state.is_loading)
            .finish()
    }
}

impl<T> PaginationEngine<T> {
    /// Strategy this engine was built with
    #[inline]
    #[must_use]
    pub fn mode(&self) -> PagingMode {
        match self.strategy {
            Strategy::Client { .. } => PagingMode::Client,
            Strategy::Server { .. } => PagingMode::Server,
        }
    }

    /// Name used in log events
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PagingConfig {
        &self.config
    }

    /// Whether another page can be loaded
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.state.lock().has_more
    }

    /// Whether a load is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading
    }

    /// Current page cursor
    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.state.lock().current_page
    }

    /// Total item count reported so far
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.state.lock().total_items
    }

    /// Number of items currently held
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.state.lock().items.len()
    }

    /// Number of pages implied by the known total
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.state
            .lock()
            .total_items
            .div_ceil(self.config.effective_page_size())
    }

    /// Search text attached to page requests
    #[must_use]
    pub fn query(&self) -> Option<String> {
        self.state.lock().query.clone()
    }
}

impl<T: Clone + Send + Sync + 'static> PaginationEngine<T> {
    /// Engine over a fully available sequence
    ///
    /// The first page is visible immediately.
    #[must_use]
    pub fn client(all: Vec<T>, config: PagingConfig) -> Self {
        let all = Arc::new(all);
        let mut state = PaginationState::fresh(config.effective_initial_page());
        reveal(&mut state, &all, config.effective_page_size());

        Self {
            name: Arc::from("options"),
            config,
            strategy: Strategy::Client {
                all: Mutex::new(all),
            },
            state: Mutex::new(state),
        }
    }

    /// Engine that fetches pages on demand
    ///
    /// Starts empty; the first [`load_more`](Self::load_more) requests the
    /// initial page.
    #[must_use]
    pub fn server(fetcher: Arc<dyn PageFetcher<T>>, config: PagingConfig) -> Self {
        let state = PaginationState::fresh(config.effective_initial_page());

        Self {
            name: Arc::from("options"),
            config,
            strategy: Strategy::Server { fetcher },
            state: Mutex::new(state),
        }
    }

    /// Set the name used in log events
    #[must_use]
    pub fn named(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Copy of the full state
    #[must_use]
    pub fn state(&self) -> PaginationState<T> {
        self.state.lock().clone()
    }

    /// Snapshot for display
    #[must_use]
    pub fn view(&self) -> OptionListView<T> {
        OptionListView::from(&*self.state.lock())
    }

    /// Currently held items
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.state.lock().items.clone()
    }

    /// Load the next page
    ///
    /// Returns immediately with [`LoadOutcome::Busy`] while another load is
    /// in flight and with [`LoadOutcome::Exhausted`] once the last page was
    /// seen; neither touches state. A failed fetch keeps the previous items
    /// and clears the loading flag so the caller may retry.
    pub async fn load_more(&self) -> LoadOutcome {
        match self.begin_load() {
            Ok(ticket) => self.execute(ticket).await,
            Err(skipped) => skipped,
        }
    }

    /// Load the initial page unless loading already started
    ///
    /// Returns `None` when items are present or a load is in flight, so
    /// re-opening a dropdown does not advance the cursor.
    pub async fn ensure_first_page(&self) -> Option<LoadOutcome> {
        let untouched = {
            let state = self.state.lock();
            !state.is_loading
                && state.items.is_empty()
                && state.has_more
                && state.current_page == self.config.effective_initial_page()
        };

        if untouched && self.mode() == PagingMode::Server {
            Some(self.load_more().await)
        } else {
            None
        }
    }

    /// Return the cursor to the initial page
    ///
    /// Server mode also drops the accumulated items so the next load fetches
    /// a fresh first page. Client mode only rewinds the cursor. Any load in
    /// flight is disowned.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        self.reset_locked(&mut state);
        debug!(engine = %self.name, generation = state.generation, "pagination reset");
    }

    /// Swap the full sequence of a client-mode engine
    ///
    /// Rewinds the cursor. Returns `false` for server-mode engines, which
    /// own no sequence.
    pub fn replace_options(&self, all: Vec<T>) -> bool {
        let Strategy::Client { all: current } = &self.strategy else {
            warn!(engine = %self.name, "replace_options called on server-mode engine");
            return false;
        };

        *current.lock() = Arc::new(all);
        self.reset();
        true
    }

    /// Restart from the initial page under a new query
    ///
    /// Discards accumulated items at once and issues the first page for
    /// `query`. A newer restart or reset supersedes this one: its response is
    /// then dropped as [`LoadOutcome::Stale`].
    pub(crate) async fn restart(&self, query: Option<String>, debounce: Duration) -> LoadOutcome {
        let ticket = {
            let mut state = self.state.lock();
            self.reset_locked(&mut state);
            state.query = query;
            state.is_loading = true;
            LoadTicket {
                generation: state.generation,
                request: PageRequest::new(
                    self.config.effective_initial_page(),
                    self.config.effective_page_size(),
                )
                .with_optional_search(state.query.as_deref()),
            }
        };

        if !debounce.is_zero() {
            let guard = LoadingGuard::new(&self.state, ticket.generation);
            tokio::time::sleep(debounce).await;
            if !self.is_current(ticket.generation) {
                trace!(engine = %self.name, "query superseded during debounce");
                return LoadOutcome::Stale;
            }
            guard.disarm();
        }

        self.execute(ticket).await
    }

    fn begin_load(&self) -> Result<LoadTicket, LoadOutcome> {
        let mut state = self.state.lock();
        if state.is_loading {
            trace!(engine = %self.name, "load skipped: busy");
            return Err(LoadOutcome::Busy);
        }
        if !state.has_more {
            trace!(engine = %self.name, "load skipped: exhausted");
            return Err(LoadOutcome::Exhausted);
        }

        state.is_loading = true;
        let page = match self.strategy {
            Strategy::Client { .. } => state.current_page.saturating_add(1),
            Strategy::Server { .. } => state.current_page,
        };

        Ok(LoadTicket {
            generation: state.generation,
            request: PageRequest::new(page, self.config.effective_page_size())
                .with_optional_search(state.query.as_deref()),
        })
    }

    async fn execute(&self, ticket: LoadTicket) -> LoadOutcome {
        let guard = LoadingGuard::new(&self.state, ticket.generation);
        match &self.strategy {
            Strategy::Server { fetcher } => {
                debug!(
                    engine = %self.name,
                    page = ticket.request.page,
                    search = ticket.request.search.as_deref().unwrap_or(""),
                    "requesting page"
                );
                let result = fetcher.fetch(ticket.request.clone()).await;
                guard.disarm();
                self.apply_fetched(&ticket, result)
            }
            Strategy::Client { .. } => {
                let latency = self.config.client_latency();
                if !latency.is_zero() {
                    tokio::time::sleep(latency).await;
                }
                guard.disarm();
                self.apply_revealed(&ticket)
            }
        }
    }

    fn apply_fetched(&self, ticket: &LoadTicket, result: Result<Page<T>, FetchError>) -> LoadOutcome {
        let mut state = self.state.lock();
        if state.generation != ticket.generation {
            trace!(
                engine = %self.name,
                issued = ticket.generation,
                current = state.generation,
                "discarding stale page"
            );
            return LoadOutcome::Stale;
        }

        state.is_loading = false;
        match result {
            Ok(page) => {
                let appended = page.items.len();
                state.items.extend(page.items);
                state.current_page = ticket.request.page.saturating_add(1);
                state.has_more = page.has_next_page;
                state.total_items = page.total_items;
                debug!(
                    engine = %self.name,
                    page = ticket.request.page,
                    appended,
                    loaded = state.items.len(),
                    has_more = state.has_more,
                    "page applied"
                );
                LoadOutcome::Loaded { appended }
            }
            Err(err) => {
                warn!(
                    engine = %self.name,
                    page = ticket.request.page,
                    error = %err,
                    retryable = err.is_retryable(),
                    "page fetch failed"
                );
                LoadOutcome::Failed(err)
            }
        }
    }

    fn apply_revealed(&self, ticket: &LoadTicket) -> LoadOutcome {
        let Strategy::Client { all } = &self.strategy else {
            return LoadOutcome::Stale;
        };
        let all = all.lock().clone();

        let mut state = self.state.lock();
        if state.generation != ticket.generation {
            return LoadOutcome::Stale;
        }

        let before = state.items.len();
        state.current_page = ticket.request.page;
        reveal(&mut state, &all, self.config.effective_page_size());
        state.is_loading = false;

        LoadOutcome::Loaded {
            appended: state.items.len().saturating_sub(before),
        }
    }

    fn reset_locked(&self, state: &mut PaginationState<T>) {
        state.generation = state.generation.wrapping_add(1);
        state.is_loading = false;
        state.current_page = self.config.effective_initial_page();

        match &self.strategy {
            Strategy::Server { .. } => {
                state.items.clear();
                state.has_more = true;
                state.total_items = 0;
            }
            Strategy::Client { all } => {
                let all = all.lock().clone();
                reveal(state, &all, self.config.effective_page_size());
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.state.lock().generation == generation
    }
}

/// Show the first `current_page * page_size` items of `all`
fn reveal<T: Clone>(state: &mut PaginationState<T>, all: &[T], page_size: usize) {
    let shown = (state.current_page as usize)
        .saturating_mul(page_size)
        .min(all.len());
    state.items = all[..shown].to_vec();
    state.has_more = shown < all.len();
    state.total_items = all.len();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcat_option::{SelectOption, StaticFetcher};
    use pcat_option::FnFetcher;
    use pcat_test_utils::{numbered_options, option_page, CountingFetcher, GatedFetcher, ScriptedFetcher};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;

    fn config(page_size: usize) -> PagingConfig {
        PagingConfig::new().with_page_size(page_size)
    }

    #[tokio::test]
    async fn client_mode_reveals_pages() {
        let engine = PaginationEngine::client(numbered_options(120), config(50));
        assert_eq!(engine.mode(), PagingMode::Client);
        assert_eq!(engine.loaded_count(), 50);
        assert!(engine.has_more());

        assert_eq!(engine.load_more().await, LoadOutcome::Loaded { appended: 50 });
        assert_eq!(engine.loaded_count(), 100);
        assert!(engine.has_more());

        assert_eq!(engine.load_more().await, LoadOutcome::Loaded { appended: 20 });
        assert_eq!(engine.loaded_count(), 120);
        assert!(!engine.has_more());

        assert_eq!(engine.load_more().await, LoadOutcome::Exhausted);
        assert_eq!(engine.loaded_count(), 120);
        assert!(!engine.is_loading());
    }

    #[tokio::test]
    async fn client_reset_rewinds_cursor() {
        let engine = PaginationEngine::client(numbered_options(120), config(50));
        engine.load_more().await;
        engine.load_more().await;

        engine.reset();
        assert_eq!(engine.current_page(), 1);
        assert_eq!(engine.loaded_count(), 50);
        assert!(engine.has_more());
        assert_eq!(engine.total_items(), 120);
    }

    #[tokio::test]
    async fn client_replace_options_rewinds() {
        let engine = PaginationEngine::client(numbered_options(10), config(4));
        engine.load_more().await;
        assert_eq!(engine.loaded_count(), 8);

        assert!(engine.replace_options(numbered_options(3)));
        assert_eq!(engine.loaded_count(), 3);
        assert!(!engine.has_more());
    }

    #[tokio::test]
    async fn client_empty_list_has_nothing_more() {
        let engine: PaginationEngine<SelectOption> = PaginationEngine::client(Vec::new(), config(10));
        assert!(!engine.has_more());
        assert_eq!(engine.load_more().await, LoadOutcome::Exhausted);
    }

    #[tokio::test(start_paused = true)]
    async fn client_latency_keeps_loading_flag_set() {
        let engine = PaginationEngine::client(
            numbered_options(30),
            config(10).with_client_latency(Duration::from_millis(300)),
        );

        let (first, second) = tokio::join!(engine.load_more(), async {
            tokio::task::yield_now().await;
            assert!(engine.is_loading());
            engine.load_more().await
        });

        assert_eq!(first, LoadOutcome::Loaded { appended: 10 });
        assert_eq!(second, LoadOutcome::Busy);
        assert!(!engine.is_loading());
    }

    #[tokio::test]
    async fn server_mode_appends_and_advances() {
        let fetcher = Arc::new(ScriptedFetcher::new([
            Ok(option_page(0, 10, true, 35)),
            Err(FetchError::transport("connection reset")),
        ]));
        let engine: PaginationEngine<SelectOption> = PaginationEngine::server(fetcher.clone(), config(10));
        assert_eq!(engine.current_page(), 1);

        assert_eq!(engine.load_more().await, LoadOutcome::Loaded { appended: 10 });
        assert_eq!(engine.loaded_count(), 10);
        assert_eq!(engine.current_page(), 2);
        assert_eq!(engine.total_items(), 35);
        assert!(engine.has_more());

        let outcome = engine.load_more().await;
        assert!(matches!(outcome, LoadOutcome::Failed(FetchError::Transport(_))));
        assert_eq!(engine.loaded_count(), 10);
        assert_eq!(engine.current_page(), 2);
        assert!(engine.has_more());
        assert!(!engine.is_loading());

        let requested: Vec<u32> = fetcher.requests().iter().map(|r| r.page).collect();
        assert_eq!(requested, vec![1, 2]);
    }

    #[tokio::test]
    async fn server_mode_retries_failed_page() {
        let fetcher = Arc::new(ScriptedFetcher::new([
            Err(FetchError::status(503, "busy")),
            Ok(option_page(0, 5, false, 5)),
        ]));
        let engine: PaginationEngine<SelectOption> = PaginationEngine::server(fetcher.clone(), config(5));

        assert!(matches!(engine.load_more().await, LoadOutcome::Failed(_)));
        assert!(engine.load_more().await.is_loaded());

        let requested: Vec<u32> = fetcher.requests().iter().map(|r| r.page).collect();
        assert_eq!(requested, vec![1, 1]);
    }

    #[tokio::test]
    async fn server_mode_stops_after_last_page() {
        let fetcher = Arc::new(ScriptedFetcher::new([
            Ok(option_page(0, 3, true, 5)),
            Ok(option_page(3, 2, false, 5)),
        ]));
        let engine: PaginationEngine<SelectOption> = PaginationEngine::server(fetcher.clone(), config(3));

        engine.load_more().await;
        engine.load_more().await;
        assert!(!engine.has_more());

        assert_eq!(engine.load_more().await, LoadOutcome::Exhausted);
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(engine.loaded_count(), 5);
        assert_eq!(engine.total_pages(), 2);
    }

    #[tokio::test]
    async fn concurrent_loads_issue_one_fetch() {
        let fetcher = Arc::new(CountingFetcher::new(StaticFetcher::new(numbered_options(40))));
        let engine: PaginationEngine<SelectOption> = PaginationEngine::server(fetcher.clone(), config(10));

        let (a, b) = tokio::join!(engine.load_more(), engine.load_more());

        assert_eq!(fetcher.calls(), 1);
        assert!(a.is_loaded());
        assert_eq!(b, LoadOutcome::Busy);
        assert_eq!(engine.loaded_count(), 10);
    }

    #[tokio::test]
    async fn server_reset_clears_items() {
        let fetcher = Arc::new(StaticFetcher::new(numbered_options(25)));
        let engine: PaginationEngine<SelectOption> = PaginationEngine::server(fetcher, config(10));
        engine.load_more().await;
        engine.load_more().await;

        engine.reset();
        let state = engine.state();
        assert!(state.items.is_empty());
        assert!(state.has_more);
        assert_eq!(state.total_items, 0);
        assert_eq!(state.current_page, 1);

        engine.load_more().await;
        assert_eq!(engine.items()[0].label(), "Option 1");
    }

    #[tokio::test]
    async fn reset_during_load_discards_response() {
        let fetcher = Arc::new(CountingFetcher::new(StaticFetcher::new(numbered_options(25))));
        let engine: PaginationEngine<SelectOption> = PaginationEngine::server(fetcher, config(10));

        let (outcome, ()) = tokio::join!(engine.load_more(), async {
            engine.reset();
        });

        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(engine.loaded_count(), 0);
        assert!(!engine.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_load_releases_loading_flag() {
        let gate = Arc::new(GatedFetcher::<SelectOption>::new());
        let engine: PaginationEngine<SelectOption> = PaginationEngine::server(gate.clone(), config(3));

        let timed_out = tokio::time::timeout(Duration::from_millis(50), engine.load_more()).await;
        assert!(timed_out.is_err());
        assert!(!engine.is_loading());
        assert_eq!(engine.loaded_count(), 0);
        assert_eq!(engine.current_page(), 1);

        let (outcome, ()) = tokio::join!(engine.load_more(), async {
            gate.wait_for_requests(2).await;
            gate.respond(1, Ok(option_page(0, 3, false, 3)));
        });
        assert_eq!(outcome, LoadOutcome::Loaded { appended: 3 });
        assert_eq!(gate.requests()[1].page, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_client_load_releases_loading_flag() {
        let engine = PaginationEngine::client(
            numbered_options(30),
            config(10).with_client_latency(Duration::from_millis(300)),
        );

        let timed_out = tokio::time::timeout(Duration::from_millis(50), engine.load_more()).await;
        assert!(timed_out.is_err());
        assert!(!engine.is_loading());
        assert_eq!(engine.loaded_count(), 10);

        assert_eq!(engine.load_more().await, LoadOutcome::Loaded { appended: 10 });
    }

    #[tokio::test]
    async fn panicking_fetcher_releases_loading_flag() {
        let fetcher = FnFetcher::new(|request: PageRequest| async move {
            if request.page == 1 && request.search.is_none() {
                panic!("fetcher blew up");
            }
            Ok::<_, FetchError>(option_page(0, 2, false, 2))
        });
        let engine: Arc<PaginationEngine<SelectOption>> =
            Arc::new(PaginationEngine::server(Arc::new(fetcher), config(2)));

        let task = tokio::spawn({
            let engine = engine.clone();
            async move { engine.load_more().await }
        });
        assert!(task.await.unwrap_err().is_panic());
        assert!(!engine.is_loading());

        engine.restart(Some("x".to_string()), Duration::ZERO).await;
        assert_eq!(engine.loaded_count(), 2);
    }

    #[tokio::test]
    async fn reset_keeps_newer_load_flag() {
        let gate = Arc::new(GatedFetcher::<SelectOption>::new());
        let engine: PaginationEngine<SelectOption> = PaginationEngine::server(gate.clone(), config(3));

        let timed_out = tokio::time::timeout(Duration::from_millis(20), async {
            tokio::join!(engine.load_more(), async {
                gate.wait_for_requests(1).await;
                engine.reset();
                assert!(!engine.is_loading());
                // A new load under the reset generation starts before the old
                // future is dropped
                assert!(engine.begin_load().is_ok());
            })
        })
        .await;
        assert!(timed_out.is_err());
        assert!(engine.is_loading());
    }

    #[tokio::test]
    async fn ensure_first_page_loads_once() {
        let fetcher = Arc::new(CountingFetcher::new(StaticFetcher::new(numbered_options(25))));
        let engine: PaginationEngine<SelectOption> = PaginationEngine::server(fetcher.clone(), config(10));

        assert!(engine.ensure_first_page().await.is_some_and(|o| o.is_loaded()));
        assert!(engine.ensure_first_page().await.is_none());
        assert_eq!(fetcher.calls(), 1);
    }

    #[test]
    fn replace_options_rejected_in_server_mode() {
        let engine: PaginationEngine<SelectOption> =
            PaginationEngine::server(Arc::new(StaticFetcher::new(Vec::new())), config(10));
        assert!(!engine.replace_options(numbered_options(2)));
    }

    proptest! {
        #[test]
        fn prop_server_accumulation_is_monotonic(len in 0usize..120, size in 1usize..25) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            rt.block_on(async {
                let all = numbered_options(len);
                let engine: PaginationEngine<SelectOption> = PaginationEngine::server(
                    Arc::new(StaticFetcher::new(all.clone())),
                    config(size),
                );

                let mut previous: Vec<SelectOption> = Vec::new();
                while engine.load_more().await.is_loaded() {
                    let current = engine.items();
                    prop_assert!(current.len() >= previous.len());
                    prop_assert_eq!(&current[..previous.len()], &previous[..]);
                    previous = current;
                }
                prop_assert_eq!(previous, all);
                Ok::<(), TestCaseError>(())
            })?;
        }

        #[test]
        fn prop_client_slice_is_prefix(len in 0usize..200, size in 1usize..60, loads in 0usize..6) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            rt.block_on(async {
                let all = numbered_options(len);
                let engine = PaginationEngine::client(all.clone(), config(size));
                for _ in 0..loads {
                    engine.load_more().await;
                }
                let shown = engine.items();
                prop_assert_eq!(&all[..shown.len()], &shown[..]);
                prop_assert_eq!(engine.has_more(), shown.len() < all.len());
                Ok::<(), TestCaseError>(())
            })?;
        }
    }
}
