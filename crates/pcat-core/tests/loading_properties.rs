use pcat_core::prelude::*;
use pcat_test_utils::{numbered_options, option_page, CountingFetcher, GatedFetcher, ScriptedFetcher};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::sync::Arc;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn values(items: &[SelectOption]) -> Vec<OptionValue> {
    items.iter().map(|option| option.value().clone()).collect()
}

#[tokio::test]
async fn test_client_scenario_reveals_fifty_at_a_time() {
    let engine = PaginationEngine::client(numbered_options(120), PagingConfig::new().with_page_size(50));

    assert_eq!(engine.loaded_count(), 50);
    assert!(engine.has_more());

    assert!(engine.load_more().await.is_loaded());
    assert_eq!(engine.loaded_count(), 100);
    assert!(engine.has_more());

    assert!(engine.load_more().await.is_loaded());
    assert_eq!(engine.loaded_count(), 120);
    assert!(!engine.has_more());

    assert!(matches!(engine.load_more().await, LoadOutcome::Exhausted));
    assert_eq!(engine.loaded_count(), 120);
}

#[tokio::test]
async fn test_server_scenario_failure_keeps_items() {
    let fetcher: ScriptedFetcher<SelectOption> = ScriptedFetcher::new([
        Ok(option_page(0, 10, true, 35)),
        Err(FetchError::transport("connection reset")),
    ]);
    let engine: PaginationEngine<SelectOption> =
        PaginationEngine::server(Arc::new(fetcher), PagingConfig::new().with_page_size(10));

    assert_eq!(engine.current_page(), 1);
    assert!(engine.load_more().await.is_loaded());
    assert_eq!(engine.loaded_count(), 10);
    assert_eq!(engine.current_page(), 2);
    assert_eq!(engine.total_items(), 35);

    assert!(matches!(engine.load_more().await, LoadOutcome::Failed(_)));
    assert_eq!(engine.loaded_count(), 10);
    assert!(engine.has_more());
    assert!(!engine.is_loading());
}

#[tokio::test]
async fn test_concurrent_load_more_issues_one_fetch() {
    let fetcher = Arc::new(CountingFetcher::new(StaticFetcher::new(numbered_options(40))));
    let engine: PaginationEngine<SelectOption> =
        PaginationEngine::server(fetcher.clone(), PagingConfig::new().with_page_size(10));

    let (first, second) = tokio::join!(engine.load_more(), engine.load_more());

    assert!(first.is_loaded());
    assert!(matches!(second, LoadOutcome::Busy));
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(engine.loaded_count(), 10);
}

#[tokio::test]
async fn test_latest_query_wins() {
    let gate: Arc<GatedFetcher<SelectOption>> = Arc::new(GatedFetcher::new());
    let loader: SearchableLoader<SelectOption> =
        SearchableLoader::new(gate.clone(), PagingConfig::new().with_page_size(5));

    let responder = {
        let gate = Arc::clone(&gate);
        async move {
            gate.wait_for_requests(2).await;
            // Answer the newer query first, then let the older one land late
            gate.respond(1, Ok(Page::new(vec![SelectOption::new("b1", "Bravo")], false, 1)));
            gate.respond(0, Ok(Page::new(vec![SelectOption::new("a1", "Alpha")], false, 1)));
        }
    };

    let (stale, fresh, ()) = tokio::join!(loader.set_search("a"), loader.set_search("b"), responder);

    assert!(matches!(stale, LoadOutcome::Stale));
    assert!(fresh.is_loaded());
    assert_eq!(loader.query().as_deref(), Some("b"));
    assert_eq!(values(&loader.items()), vec![OptionValue::from("b1")]);
    assert!(!loader.is_loading());
}

#[tokio::test]
async fn test_exhausted_engine_never_fetches_again() {
    let fetcher = Arc::new(CountingFetcher::new(StaticFetcher::new(numbered_options(12))));
    let engine: PaginationEngine<SelectOption> =
        PaginationEngine::server(fetcher.clone(), PagingConfig::new().with_page_size(10));

    while engine.load_more().await.is_loaded() {}
    let calls = fetcher.calls();

    for _ in 0..3 {
        assert!(matches!(engine.load_more().await, LoadOutcome::Exhausted));
    }
    assert_eq!(fetcher.calls(), calls);
    assert_eq!(engine.loaded_count(), 12);
}

#[tokio::test]
async fn test_cache_loads_each_key_once() {
    let fetcher = Arc::new(CountingFetcher::new(StaticFetcher::new(numbered_options(5))));
    let registry: FetcherRegistry<SelectOption> = FetcherRegistry::new().with("cabin", fetcher.clone());
    let cache = OptionCache::new(registry, CacheConfig::default());

    let first = cache.ensure_loaded("cabin").await.unwrap();
    let second = cache.ensure_loaded("cabin").await.unwrap();
    assert_eq!(first.loaded_at, second.loaded_at);
    assert_eq!(fetcher.calls(), 1);

    cache.invalidate("cabin").await;
    let loads = futures::future::join_all((0..6).map(|_| cache.ensure_loaded("cabin"))).await;
    assert!(loads.iter().all(Result::is_ok));
    assert_eq!(fetcher.calls(), 2);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_server_loads_accumulate_monotonically(total in 0usize..90, page_size in 1usize..15) {
        runtime().block_on(async {
            let engine: PaginationEngine<SelectOption> = PaginationEngine::server(
                Arc::new(StaticFetcher::new(numbered_options(total))),
                PagingConfig::new().with_page_size(page_size),
            );

            let mut previous = Vec::new();
            while engine.load_more().await.is_loaded() {
                let current = values(&engine.items());
                prop_assert!(current.len() >= previous.len());
                prop_assert_eq!(&current[..previous.len()], &previous[..]);
                previous = current;
            }

            prop_assert_eq!(previous.len(), total);
            prop_assert!(!engine.has_more());
            Ok::<(), TestCaseError>(())
        })?;
    }

    #[test]
    fn prop_client_reveal_never_exceeds_total(total in 0usize..200, page_size in 1usize..60) {
        runtime().block_on(async {
            let engine = PaginationEngine::client(numbered_options(total), PagingConfig::new().with_page_size(page_size));
            loop {
                prop_assert!(engine.loaded_count() <= total);
                if !engine.load_more().await.is_loaded() {
                    break;
                }
            }
            prop_assert_eq!(engine.loaded_count(), total);
            Ok::<(), TestCaseError>(())
        })?;
    }
}
