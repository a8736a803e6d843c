use std::sync::Arc;

use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::sync::watch;

use super::dto::{ListView, PageMetrics, SelectionSummary};
use super::sort::sort_items;
use super::{ControllerInner, ControllerState, EntityListController};
use crate::config::core_config::ListConfig;
use crate::model::common::SortDirection;
use crate::model::entity::ListEntity;
use crate::model::list_query::{ListQuery, QueryKey, ScopeContext};
use crate::provider::query_cache::{FetchResult, QueryInvalidator};
use crate::service::error::ServiceError;
use crate::service::selection::SelectionTracker;

impl<E: ListEntity> EntityListController<E> {
    /// Fetches the page for the current query.
    pub fn load(&self) {
        self.inner.schedule_fetch(false);
    }

    /// Refetches the current query, bypassing fresh cached pages.
    pub fn refresh(&self) {
        self.inner.schedule_fetch(true);
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.inner.lock().search_generation += 1;
        self.inner
            .update_query("search", move |query| apply_search_term(query, term));
    }

    /// Applies `term` once the debounce window passes without a newer term.
    pub fn schedule_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        let generation = {
            let mut state = self.inner.lock();
            state.search_generation += 1;
            state.search_generation
        };

        let inner = self.inner.clone();
        let delay = self.inner.config.search_debounce;
        self.inner.spawn(async move {
            tokio::select! {
                _ = inner.cancellation.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if inner.lock().search_generation == generation {
                        inner.update_query("search", move |query| apply_search_term(query, term));
                    }
                }
            }
        });
    }

    pub fn set_sort_by(&self, sort_by: Option<String>) {
        self.inner.update_query("sortBy", move |query| {
            query.sort_by = sort_by;
            query.page_index = 0;
            true
        });
    }

    pub fn set_sort_order(&self, sort_order: SortDirection) {
        self.inner.update_query("sortOrder", move |query| {
            query.sort_order = sort_order;
            query.page_index = 0;
            true
        });
    }

    pub fn set_sort(&self, sort_by: Option<String>, sort_order: SortDirection) {
        self.inner.update_query("sort", move |query| {
            query.sort_by = sort_by;
            query.sort_order = sort_order;
            query.page_index = 0;
            true
        });
    }

    /// Column header click: flips the direction of the active column, otherwise sorts
    /// ascending by `column`.
    pub fn toggle_sort(&self, column: impl Into<String>) {
        let column = column.into();
        self.inner.update_query("sort", move |query| {
            if query.sort_by.as_ref() == Some(&column) {
                query.sort_order = query.sort_order.toggled();
            } else {
                query.sort_by = Some(column);
                query.sort_order = SortDirection::Ascending;
            }
            query.page_index = 0;
            true
        });
    }

    pub fn set_page_index(&self, page_index: u32) {
        self.inner.update_query("pageIndex", move |query| {
            query.page_index = page_index;
            true
        });
    }

    /// Always returns to the first page.
    pub fn set_page_size(&self, page_size: u32) {
        if page_size == 0 {
            tracing::warn!(family = E::RESOURCE, "Ignoring zero page size");
            return;
        }

        self.inner.update_query("pageSize", move |query| {
            query.page_size = page_size;
            query.page_index = 0;
            true
        });
    }

    pub fn set_scope(&self, scope: ScopeContext) {
        self.inner.update_query("scope", move |query| {
            query.scope = scope;
            query.page_index = 0;
            true
        });
    }

    pub fn set_scope_value(&self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        self.inner.update_query("scope", move |query| {
            let changed = query.scope.insert(key, value);
            if changed {
                query.page_index = 0;
            }
            changed
        });
    }

    pub fn remove_scope_value(&self, key: &str) {
        self.inner.update_query("scope", |query| {
            let changed = query.scope.remove(key);
            if changed {
                query.page_index = 0;
            }
            changed
        });
    }

    pub async fn create_entity(&self, request: E::CreateRequest) -> Result<E, ServiceError> {
        self.inner.ensure_active()?;

        let created = self
            .inner
            .mutation_port
            .create(request)
            .await
            .inspect_err(|error| tracing::error!(family = E::RESOURCE, %error, "Create failed"))?;

        self.inner.after_mutation(|_| {});
        Ok(created)
    }

    pub async fn update_entity(
        &self,
        id: &E::Id,
        request: E::UpdateRequest,
    ) -> Result<E, ServiceError> {
        self.inner.ensure_active()?;

        let updated = self
            .inner
            .mutation_port
            .update(id, request)
            .await
            .inspect_err(|error| tracing::error!(family = E::RESOURCE, %id, %error, "Update failed"))?;

        self.inner.after_mutation(|_| {});
        Ok(updated)
    }

    pub async fn delete_entity(&self, id: &E::Id) -> Result<(), ServiceError> {
        self.inner.ensure_active()?;

        self.inner
            .mutation_port
            .delete(id)
            .await
            .inspect_err(|error| tracing::error!(family = E::RESOURCE, %id, %error, "Delete failed"))?;

        self.inner.after_mutation(|selection| {
            selection.deselect(id);
        });
        Ok(())
    }

    /// An empty id list is a no-op.
    pub async fn bulk_delete_entities(&self, ids: &[E::Id]) -> Result<(), ServiceError> {
        self.inner.ensure_active()?;

        if ids.is_empty() {
            tracing::debug!(family = E::RESOURCE, "Nothing to bulk delete");
            return Ok(());
        }

        self.inner
            .mutation_port
            .bulk_delete(ids)
            .await
            .inspect_err(|error| {
                tracing::error!(family = E::RESOURCE, count = ids.len(), %error, "Bulk delete failed")
            })?;

        self.inner.after_mutation(|selection| {
            selection.retain(|id| !ids.contains(id));
        });
        Ok(())
    }

    /// Deletes every selected id; returns how many were deleted.
    pub async fn bulk_delete_selected(&self) -> Result<usize, ServiceError> {
        let ids = self.selected_ids();
        self.bulk_delete_entities(&ids).await?;

        Ok(ids.len())
    }

    /// Ids that are not on the loaded page are ignored.
    pub fn select(&self, id: E::Id) {
        self.inner.with_selection(|selection, items| {
            if is_listed(items, &id) {
                selection.select(id);
            }
        });
    }

    pub fn deselect(&self, id: &E::Id) {
        self.inner.with_selection(|selection, _| {
            selection.deselect(id);
        });
    }

    pub fn toggle(&self, id: E::Id) {
        self.inner.with_selection(|selection, items| {
            if is_listed(items, &id) || selection.is_selected(&id) {
                selection.toggle(id);
            }
        });
    }

    /// Selects every item of the loaded page.
    pub fn select_all(&self) {
        self.inner.with_selection(|selection, items| {
            selection.select_all(items.iter().map(ListEntity::id));
        });
    }

    pub fn toggle_select_all(&self) {
        self.inner.with_selection(|selection, items| {
            selection.toggle_select_all(items.iter().map(ListEntity::id));
        });
    }

    pub fn clear_selection(&self) {
        self.inner.with_selection(|selection, _| selection.clear());
    }

    pub fn is_selected(&self, id: &E::Id) -> bool {
        self.inner.lock().selection.is_selected(id)
    }

    pub fn selected_ids(&self) -> Vec<E::Id> {
        self.inner.lock().selection.selected_ids()
    }

    pub fn view(&self) -> ListView<E> {
        self.inner.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListView<E>> {
        self.inner.view.subscribe()
    }

    /// Resolves once no fetch for the current query is outstanding.
    pub async fn wait_idle(&self) -> ListView<E> {
        let mut receiver = self.inner.view.subscribe();
        match receiver.wait_for(|view| !view.loading).await {
            Ok(view) => view.clone(),
            Err(_) => self.view(),
        }
    }

    pub fn query(&self) -> ListQuery {
        self.inner.lock().query.clone()
    }

    pub fn config(&self) -> &ListConfig {
        &self.inner.config
    }

    /// Stops applying responses and issuing fetches; mutations fail afterwards.
    pub fn dispose(&self) {
        self.inner.cancellation.cancel();

        let mut state = self.inner.lock();
        state.in_flight.clear();
        self.inner.publish(&state);

        tracing::debug!(family = E::RESOURCE, "List controller disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.cancellation.is_cancelled()
    }
}

fn is_listed<E: ListEntity>(items: &[E], id: &E::Id) -> bool {
    items.iter().any(|item| item.id() == id)
}

fn apply_search_term(query: &mut ListQuery, term: String) -> bool {
    query.search = term;
    query.page_index = 0;
    true
}

impl<E: ListEntity> ControllerInner<E> {
    fn update_query(
        self: &Arc<Self>,
        change: &'static str,
        update: impl FnOnce(&mut ListQuery) -> bool,
    ) {
        if self.cancellation.is_cancelled() {
            tracing::debug!(family = E::RESOURCE, change, "Ignoring query change on disposed list");
            return;
        }

        {
            let mut state = self.lock();
            let mut query = state.query.clone();
            if !update(&mut query) || query == state.query {
                return;
            }

            tracing::debug!(
                family = E::RESOURCE,
                change,
                page_index = query.page_index,
                "List query changed"
            );
            state.query = query;
            state.error = None;
            if self.config.clear_selection_on_query_change {
                state.selection.clear();
            }
        }

        self.schedule_fetch(false);
    }

    fn schedule_fetch(self: &Arc<Self>, force: bool) {
        if self.cancellation.is_cancelled() {
            return;
        }

        let Ok(runtime) = Handle::try_current() else {
            tracing::error!(family = E::RESOURCE, "No tokio runtime to fetch the list on");
            self.publish(&self.lock());
            return;
        };

        let (seq, query) = {
            let mut state = self.lock();
            state.issued_seq += 1;
            let seq = state.issued_seq;
            let query = state.query.clone();
            state.in_flight.insert(seq, query.clone());
            self.publish(&state);
            (seq, query)
        };
        tracing::debug!(family = E::RESOURCE, seq, force, "Fetching list page");

        let inner = self.clone();
        runtime.spawn(async move {
            let key = QueryKey::new(E::RESOURCE, query);
            let request = key.query.to_request();
            let fetch_port = inner.fetch_port.clone();

            let fetch = inner.cache.get_or_fetch(&key, force, move || {
                async move { fetch_port.fetch_page(request).await }.boxed()
            });

            tokio::select! {
                _ = inner.cancellation.cancelled() => {}
                result = fetch => inner.complete_fetch(seq, &key.query, result),
            }
        });
    }

    fn complete_fetch(self: &Arc<Self>, seq: u64, query: &ListQuery, result: FetchResult<E>) {
        if self.cancellation.is_cancelled() {
            return;
        }

        let mut state = self.lock();
        state.in_flight.remove(&seq);

        if state.query != *query || seq < state.applied_seq {
            tracing::warn!(
                family = E::RESOURCE,
                seq,
                applied_seq = state.applied_seq,
                "Discarding superseded list response"
            );
            self.publish(&state);
            return;
        }
        state.applied_seq = seq;

        match result {
            Ok(page) => {
                let metrics = PageMetrics::new(page.count, query.page_index, query.page_size);
                let pruned = state
                    .selection
                    .retain(|id| page.data.iter().any(|item| item.id() == id));
                if pruned > 0 {
                    tracing::debug!(family = E::RESOURCE, pruned, "Dropped selected ids no longer listed");
                }
                state.page = Some(page);
                state.error = None;

                if self.config.clamp_out_of_range_page && metrics.is_out_of_range(query.page_index) {
                    let last_page = u32::try_from(metrics.total_pages.saturating_sub(1))
                        .unwrap_or(query.page_index);
                    tracing::warn!(
                        family = E::RESOURCE,
                        page_index = query.page_index,
                        last_page,
                        "Page index out of range, clamping"
                    );

                    state.query.page_index = last_page;
                    if self.config.clear_selection_on_query_change {
                        state.selection.clear();
                    }
                    drop(state);

                    self.schedule_fetch(false);
                    return;
                }
            }
            Err(error) => {
                tracing::error!(family = E::RESOURCE, seq, %error, "Failed to fetch list page");
                state.error = Some(error.to_string());
            }
        }

        self.publish(&state);
    }

    fn spawn(&self, task: impl Future<Output = ()> + Send + 'static) {
        match Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(task);
            }
            Err(error) => {
                tracing::error!(family = E::RESOURCE, %error, "No tokio runtime to run the task on");
            }
        }
    }

    fn ensure_active(&self) -> Result<(), ServiceError> {
        if self.cancellation.is_cancelled() {
            return Err(ServiceError::Disposed);
        }
        Ok(())
    }

    fn after_mutation(self: &Arc<Self>, update_selection: impl FnOnce(&mut SelectionTracker<E::Id>)) {
        update_selection(&mut self.lock().selection);

        let dropped = self.cache.invalidate_family(E::RESOURCE)
            + self
                .invalidators
                .iter()
                .map(|invalidator| invalidator.invalidate_family(E::RESOURCE))
                .sum::<usize>();
        tracing::debug!(family = E::RESOURCE, dropped, "Invalidated list family after mutation");

        self.schedule_fetch(false);
    }

    fn with_selection(&self, update: impl FnOnce(&mut SelectionTracker<E::Id>, &[E])) {
        let mut state = self.lock();
        let ControllerState {
            selection, page, ..
        } = &mut *state;
        let items = page.as_ref().map(|page| page.data.as_slice()).unwrap_or_default();
        update(selection, items);

        self.publish(&state);
    }

    fn publish(&self, state: &ControllerState<E>) {
        self.view.send_replace(state.to_view());
    }
}

impl<E: ListEntity> ControllerState<E> {
    fn to_view(&self) -> ListView<E> {
        let (mut items, total_count) = match &self.page {
            Some(page) => (page.data.clone(), page.count),
            None => (vec![], 0),
        };
        if let Some(sort_by) = &self.query.sort_by {
            sort_items(&mut items, sort_by, self.query.sort_order);
        }

        let selection = SelectionSummary {
            selected_ids: self.selection.selected_ids(),
            all_selected: self.selection.is_all_selected(items.iter().map(ListEntity::id)),
            indeterminate: self.selection.is_indeterminate(items.iter().map(ListEntity::id)),
        };

        ListView {
            metrics: PageMetrics::new(total_count, self.query.page_index, self.query.page_size),
            total_count,
            items,
            query: self.query.clone(),
            loading: self.in_flight.values().any(|query| *query == self.query),
            error: self.error.clone(),
            selection,
        }
    }
}
