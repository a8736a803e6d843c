//! Generic server-paginated list controller.
//!
//! One [`EntityListController`] drives one list screen: it owns the query state
//! (page, size, search, sort, scope), fetches pages through the [`FetchPort`] and
//! the shared [`QueryCache`], applies responses last-tuple-wins, and publishes a
//! [`ListView`] snapshot on every change.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use self::dto::ListView;
use crate::config::core_config::ListConfig;
use crate::model::entity::ListEntity;
use crate::model::list_query::{ListQuery, PageResponse, ScopeContext};
use crate::port::fetch_port::FetchPort;
use crate::port::mutation_port::MutationPort;
use crate::provider::query_cache::{QueryCache, QueryInvalidator};
use crate::service::selection::SelectionTracker;

pub mod dto;
mod service;
pub mod sort;


/// Collaborators of a list controller.
pub struct ListPorts<E: ListEntity> {
    pub fetch: Arc<dyn FetchPort<E>>,
    pub mutation: Arc<dyn MutationPort<E>>,
    pub cache: Arc<QueryCache<E>>,
    /// Notified of the entity family after every successful mutation, next to `cache`.
    pub invalidators: Vec<Arc<dyn QueryInvalidator>>,
}

/// Cloneable handle; clones drive the same list.
#[derive(Clone)]
pub struct EntityListController<E: ListEntity> {
    inner: Arc<ControllerInner<E>>,
}

struct ControllerInner<E: ListEntity> {
    fetch_port: Arc<dyn FetchPort<E>>,
    mutation_port: Arc<dyn MutationPort<E>>,
    cache: Arc<QueryCache<E>>,
    invalidators: Vec<Arc<dyn QueryInvalidator>>,
    config: ListConfig,
    state: Mutex<ControllerState<E>>,
    view: watch::Sender<ListView<E>>,
    cancellation: CancellationToken,
}

struct ControllerState<E: ListEntity> {
    query: ListQuery,
    page: Option<Arc<PageResponse<E>>>,
    error: Option<String>,
    issued_seq: u64,
    applied_seq: u64,
    // seq -> query the fetch was issued for
    in_flight: HashMap<u64, ListQuery>,
    selection: SelectionTracker<E::Id>,
    search_generation: u64,
}

impl<E: ListEntity> EntityListController<E> {
    /// Creates an idle controller; call [`Self::load`] to fetch the first page.
    pub fn new(ports: ListPorts<E>, config: ListConfig, scope: ScopeContext) -> Self {
        let query = ListQuery::new(config.default_page_size.max(1), scope);
        let (view, _) = watch::channel(ListView::empty(query.clone()));

        Self {
            inner: Arc::new(ControllerInner {
                fetch_port: ports.fetch,
                mutation_port: ports.mutation,
                cache: ports.cache,
                invalidators: ports.invalidators,
                config,
                state: Mutex::new(ControllerState {
                    query,
                    page: None,
                    error: None,
                    issued_seq: 0,
                    applied_seq: 0,
                    in_flight: HashMap::new(),
                    selection: SelectionTracker::new(),
                    search_generation: 0,
                }),
                view,
                cancellation: CancellationToken::new(),
            }),
        }
    }
}

impl<E: ListEntity> ControllerInner<E> {
    fn lock(&self) -> MutexGuard<'_, ControllerState<E>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
