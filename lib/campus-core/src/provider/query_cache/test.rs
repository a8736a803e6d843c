use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::oneshot;

use super::{QueryCache, QueryInvalidator};
use crate::model::list_query::{ListQuery, PageResponse, QueryKey, ScopeContext};
use crate::port::error::PortError;

fn key(family: &'static str, page_index: u32) -> QueryKey {
    let mut query = ListQuery::new(10, ScopeContext::new());
    query.page_index = page_index;
    QueryKey::new(family, query)
}

fn page(values: &[&str]) -> PageResponse<String> {
    PageResponse {
        data: values.iter().map(|value| value.to_string()).collect(),
        count: values.len() as u64,
    }
}

fn counting_fetch(
    calls: &Arc<AtomicUsize>,
    response: Result<PageResponse<String>, PortError>,
) -> impl FnOnce() -> BoxFuture<'static, Result<PageResponse<String>, PortError>> {
    let calls = calls.clone();
    move || {
        calls.fetch_add(1, Ordering::SeqCst);
        async move { response }.boxed()
    }
}

#[tokio::test(start_paused = true)]
async fn test_fresh_page_is_served_from_cache() {
    let cache = QueryCache::new(Duration::from_secs(30), 10);
    let calls = Arc::new(AtomicUsize::new(0));
    let key = key("organisations", 0);

    let first = cache
        .get_or_fetch(&key, false, counting_fetch(&calls, Ok(page(&["a"]))))
        .await
        .unwrap();
    let second = cache
        .get_or_fetch(&key, false, counting_fetch(&calls, Ok(page(&["b"]))))
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.data, vec!["a"]);
    assert_eq!(second.data, vec!["a"]);
}

#[tokio::test(start_paused = true)]
async fn test_stale_page_is_refetched() {
    let cache = QueryCache::new(Duration::from_secs(30), 10);
    let calls = Arc::new(AtomicUsize::new(0));
    let key = key("organisations", 0);

    cache
        .get_or_fetch(&key, false, counting_fetch(&calls, Ok(page(&["a"]))))
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(31)).await;

    let refreshed = cache
        .get_or_fetch(&key, false, counting_fetch(&calls, Ok(page(&["b"]))))
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(refreshed.data, vec!["b"]);
}

#[tokio::test(start_paused = true)]
async fn test_force_bypasses_fresh_page() {
    let cache = QueryCache::new(Duration::from_secs(30), 10);
    let calls = Arc::new(AtomicUsize::new(0));
    let key = key("branches", 0);

    cache
        .get_or_fetch(&key, false, counting_fetch(&calls, Ok(page(&["a"]))))
        .await
        .unwrap();
    let forced = cache
        .get_or_fetch(&key, true, counting_fetch(&calls, Ok(page(&["b"]))))
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(forced.data, vec!["b"]);
}

#[tokio::test]
async fn test_concurrent_requests_share_one_fetch() {
    let cache = QueryCache::new(Duration::from_secs(30), 10);
    let calls = Arc::new(AtomicUsize::new(0));
    let key = key("departments", 0);
    let (release, gate) = oneshot::channel::<()>();

    let gated_fetch = {
        let calls = calls.clone();
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                let _ = gate.await;
                Ok(page(&["shared"]))
            }
            .boxed()
        }
    };

    let first = cache.get_or_fetch(&key, false, gated_fetch);
    let second = cache.get_or_fetch(&key, false, counting_fetch(&calls, Ok(page(&["other"]))));
    let releaser = async move {
        tokio::task::yield_now().await;
        release.send(()).unwrap();
    };

    let (first, second, ()) = tokio::join!(first, second, releaser);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.unwrap().data, vec!["shared"]);
    assert_eq!(second.unwrap().data, vec!["shared"]);
}

#[tokio::test]
async fn test_failure_is_not_cached() {
    let cache = QueryCache::<String>::new(Duration::from_secs(30), 10);
    let calls = Arc::new(AtomicUsize::new(0));
    let key = key("streams", 0);

    let failed = cache
        .get_or_fetch(
            &key,
            false,
            counting_fetch(&calls, Err(PortError::Transport("offline".to_string()))),
        )
        .await;
    assert_eq!(failed, Err(PortError::Transport("offline".to_string())));
    assert!(cache.is_empty());

    let recovered = cache
        .get_or_fetch(&key, false, counting_fetch(&calls, Ok(page(&["a"]))))
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(recovered.data, vec!["a"]);
}

#[tokio::test]
async fn test_invalidate_family_drops_only_that_family() {
    let cache = QueryCache::new(Duration::from_secs(30), 10);
    let calls = Arc::new(AtomicUsize::new(0));

    for index in 0..2 {
        cache
            .get_or_fetch(
                &key("fee-heads", index),
                false,
                counting_fetch(&calls, Ok(page(&["a"]))),
            )
            .await
            .unwrap();
    }
    cache
        .get_or_fetch(
            &key("fee-groups", 0),
            false,
            counting_fetch(&calls, Ok(page(&["a"]))),
        )
        .await
        .unwrap();

    assert_eq!(cache.invalidate_family("fee-heads"), 2);
    assert_eq!(cache.len(), 1);

    cache
        .get_or_fetch(
            &key("fee-heads", 0),
            false,
            counting_fetch(&calls, Ok(page(&["b"]))),
        )
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_invalidated_in_flight_result_is_not_stored() {
    let cache = QueryCache::new(Duration::from_secs(30), 10);
    let calls = Arc::new(AtomicUsize::new(0));
    let key = key("divisions", 0);
    let (release, gate) = oneshot::channel::<()>();

    let pending = cache.get_or_fetch(&key, false, move || {
        async move {
            let _ = gate.await;
            Ok(page(&["before-mutation"]))
        }
        .boxed()
    });
    let invalidate = async {
        tokio::task::yield_now().await;
        assert_eq!(cache.invalidate_family("divisions"), 1);
        release.send(()).unwrap();
    };

    let (result, ()) = tokio::join!(pending, invalidate);
    assert_eq!(result.unwrap().data, vec!["before-mutation"]);
    assert!(cache.is_empty());

    let fresh = cache
        .get_or_fetch(&key, false, counting_fetch(&calls, Ok(page(&["after"]))))
        .await
        .unwrap();
    assert_eq!(fresh.data, vec!["after"]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_capacity_evicts_oldest_page() {
    let cache = QueryCache::new(Duration::from_secs(30), 2);
    let calls = Arc::new(AtomicUsize::new(0));

    for index in 0..3 {
        cache
            .get_or_fetch(
                &key("designations", index),
                false,
                counting_fetch(&calls, Ok(page(&["a"]))),
            )
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(1)).await;
    }
    assert_eq!(cache.len(), 2);

    // page 0 was evicted, page 2 is still fresh
    cache
        .get_or_fetch(
            &key("designations", 2),
            false,
            counting_fetch(&calls, Ok(page(&["b"]))),
        )
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    cache
        .get_or_fetch(
            &key("designations", 0),
            false,
            counting_fetch(&calls, Ok(page(&["b"]))),
        )
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_registry_shares_cache_per_family() {
    use crate::config::core_config::CoreConfig;
    use crate::model::branch::Branch;
    use crate::model::organisation::Organisation;
    use crate::provider::query_cache::QueryCacheRegistry;

    let registry = QueryCacheRegistry::new();
    let config = CoreConfig::default();

    let first = registry.cache_for::<Organisation>(&config);
    let second = registry.cache_for::<Organisation>(&config);
    let branches = registry.cache_for::<Branch>(&config);

    assert!(Arc::ptr_eq(&first, &second));
    assert!(branches.is_empty());
    assert_eq!(registry.invalidate_family("organisations"), 0);
    assert_eq!(registry.invalidate_family("unknown"), 0);
}
