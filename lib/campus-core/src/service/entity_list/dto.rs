use crate::model::entity::ListEntity;
use crate::model::list_query::ListQuery;

/// Snapshot of one list screen, republished on every state change.
#[derive(Clone, Debug)]
pub struct ListView<E: ListEntity> {
    pub items: Vec<E>,
    pub total_count: u64,
    pub metrics: PageMetrics,
    pub query: ListQuery,
    /// A fetch for the current query is outstanding.
    pub loading: bool,
    /// Message of the last failed fetch for the current query.
    pub error: Option<String>,
    pub selection: SelectionSummary<E::Id>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PageMetrics {
    pub total_pages: u64,
    /// One-based index of the first visible item, 0 when nothing is visible.
    pub start_item: u64,
    pub end_item: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl PageMetrics {
    pub fn new(total_count: u64, page_index: u32, page_size: u32) -> Self {
        if total_count == 0 || page_size == 0 {
            return Self::default();
        }

        let page_index = u64::from(page_index);
        let page_size = u64::from(page_size);
        let total_pages = total_count.div_ceil(page_size);

        let (start_item, end_item) = if page_index < total_pages {
            (
                page_index * page_size + 1,
                ((page_index + 1) * page_size).min(total_count),
            )
        } else {
            (0, 0)
        };

        Self {
            total_pages,
            start_item,
            end_item,
            has_previous_page: page_index > 0,
            has_next_page: page_index + 1 < total_pages,
        }
    }

    /// A non-first page index past the last page.
    pub fn is_out_of_range(&self, page_index: u32) -> bool {
        page_index > 0 && u64::from(page_index) >= self.total_pages
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSummary<Id> {
    /// In selection order; may include ids not on the current page.
    pub selected_ids: Vec<Id>,
    pub all_selected: bool,
    pub indeterminate: bool,
}

impl<Id> Default for SelectionSummary<Id> {
    fn default() -> Self {
        Self {
            selected_ids: vec![],
            all_selected: false,
            indeterminate: false,
        }
    }
}

impl<E: ListEntity> ListView<E> {
    pub(super) fn empty(query: ListQuery) -> Self {
        Self {
            items: vec![],
            total_count: 0,
            metrics: PageMetrics::default(),
            query,
            loading: false,
            error: None,
            selection: SelectionSummary::default(),
        }
    }
}
