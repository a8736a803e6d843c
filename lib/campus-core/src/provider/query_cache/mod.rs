//! Page cache keyed by query key.
//!
//! Fresh pages are served without hitting the fetch port, concurrent requests for the
//! same key share one in-flight fetch, and mutations drop a whole entity family through
//! [`QueryInvalidator`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::{BoxFuture, Shared};
use futures::{FutureExt, TryFutureExt};
use tokio::time::Instant;

use crate::model::list_query::{PageResponse, QueryKey};
use crate::port::error::PortError;

mod registry;

pub use registry::QueryCacheRegistry;

#[cfg(test)]
mod test;

pub type FetchResult<E> = Result<Arc<PageResponse<E>>, PortError>;

type SharedFetch<E> = Shared<BoxFuture<'static, FetchResult<E>>>;

/// Drops cached pages of an entity family so the next read goes to the backend.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait QueryInvalidator: Send + Sync {
    /// Returns the number of dropped entries.
    fn invalidate_family(&self, family: &str) -> usize;
}

enum CacheEntry<E> {
    Ready {
        page: Arc<PageResponse<E>>,
        fetched_at: Instant,
    },
    InFlight {
        request_id: u64,
        future: SharedFetch<E>,
    },
}

enum Lookup<E> {
    Hit(Arc<PageResponse<E>>),
    Join(SharedFetch<E>),
    Started {
        request_id: u64,
        future: SharedFetch<E>,
    },
}

struct CacheState<E> {
    entries: HashMap<QueryKey, CacheEntry<E>>,
    next_request_id: u64,
}

pub struct QueryCache<E> {
    stale_time: Duration,
    capacity: usize,
    state: Mutex<CacheState<E>>,
}

impl<E: Send + Sync + 'static> QueryCache<E> {
    pub fn new(stale_time: Duration, capacity: usize) -> Self {
        Self {
            stale_time,
            capacity,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                next_request_id: 0,
            }),
        }
    }

    /// Resolves `key` from the cache, an in-flight request, or a new call to `fetch`.
    ///
    /// `force` skips fresh cached pages but still joins a request already in flight.
    /// Failures are returned to every waiter and never cached.
    pub async fn get_or_fetch<F>(&self, key: &QueryKey, force: bool, fetch: F) -> FetchResult<E>
    where
        F: FnOnce() -> BoxFuture<'static, Result<PageResponse<E>, PortError>>,
    {
        let (request_id, future) = match self.lookup(key, force, fetch) {
            Lookup::Hit(page) => return Ok(page),
            Lookup::Join(future) => return future.await,
            Lookup::Started { request_id, future } => (request_id, future),
        };

        let result = future.await;

        let mut state = self.lock();
        let still_current = matches!(
            state.entries.get(key),
            Some(CacheEntry::InFlight { request_id: current, .. }) if *current == request_id
        );
        if still_current {
            match &result {
                Ok(page) => {
                    state.entries.insert(
                        key.clone(),
                        CacheEntry::Ready {
                            page: page.clone(),
                            fetched_at: Instant::now(),
                        },
                    );
                    self.evict_oldest(&mut state);
                }
                Err(_) => {
                    state.entries.remove(key);
                }
            }
        }

        result
    }

    fn lookup<F>(&self, key: &QueryKey, force: bool, fetch: F) -> Lookup<E>
    where
        F: FnOnce() -> BoxFuture<'static, Result<PageResponse<E>, PortError>>,
    {
        let mut state = self.lock();

        match state.entries.get(key) {
            Some(CacheEntry::Ready { page, fetched_at })
                if !force && fetched_at.elapsed() <= self.stale_time =>
            {
                tracing::debug!(family = key.family, "Serving page from cache");
                return Lookup::Hit(page.clone());
            }
            Some(CacheEntry::InFlight { future, .. }) => {
                tracing::debug!(family = key.family, "Joining in-flight page request");
                return Lookup::Join(future.clone());
            }
            _ => {}
        }

        let request_id = state.next_request_id;
        state.next_request_id += 1;

        let future = fetch().map_ok(Arc::new).boxed().shared();
        state.entries.insert(
            key.clone(),
            CacheEntry::InFlight {
                request_id,
                future: future.clone(),
            },
        );

        Lookup::Started { request_id, future }
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    fn evict_oldest(&self, state: &mut CacheState<E>) {
        while state.entries.len() > self.capacity {
            let oldest = state
                .entries
                .iter()
                .filter_map(|(key, entry)| match entry {
                    CacheEntry::Ready { fetched_at, .. } => Some((key, *fetched_at)),
                    CacheEntry::InFlight { .. } => None,
                })
                .min_by_key(|(_, fetched_at)| *fetched_at)
                .map(|(key, _)| key.clone());

            let Some(oldest) = oldest else {
                break;
            };
            tracing::debug!(family = oldest.family, "Evicting oldest cached page");
            state.entries.remove(&oldest);
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState<E>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: Send + Sync + 'static> QueryInvalidator for QueryCache<E> {
    fn invalidate_family(&self, family: &str) -> usize {
        let mut state = self.lock();
        let before = state.entries.len();
        state.entries.retain(|key, _| key.family != family);
        let removed = before - state.entries.len();

        tracing::debug!(family, removed, "Invalidated cached pages");
        removed
    }
}
