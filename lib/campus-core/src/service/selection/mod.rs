//! Bulk selection over the ids of the currently loaded items.

use std::hash::Hash;

use indexmap::IndexSet;


/// Tracks selected ids. Does not own the items; derivations take the current page.
#[derive(Clone, Debug)]
pub struct SelectionTracker<Id> {
    selected: IndexSet<Id>,
}

impl<Id> Default for SelectionTracker<Id> {
    fn default() -> Self {
        Self {
            selected: IndexSet::new(),
        }
    }
}

impl<Id: Clone + Eq + Hash> SelectionTracker<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the id was not selected before.
    pub fn select(&mut self, id: Id) -> bool {
        self.selected.insert(id)
    }

    /// Returns `true` if the id was selected before.
    pub fn deselect(&mut self, id: &Id) -> bool {
        self.selected.shift_remove(id)
    }

    /// Returns the new membership of `id`.
    pub fn toggle(&mut self, id: Id) -> bool {
        if self.selected.shift_remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    pub fn select_all<'a>(&mut self, items: impl IntoIterator<Item = &'a Id>)
    where
        Id: 'a,
    {
        self.selected.extend(items.into_iter().cloned());
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Clears the selection when every item is selected, otherwise selects all items.
    pub fn toggle_select_all<'a>(&mut self, items: impl IntoIterator<Item = &'a Id> + Clone)
    where
        Id: 'a,
    {
        if self.is_all_selected(items.clone()) {
            self.clear();
        } else {
            self.select_all(items);
        }
    }

    pub fn is_selected(&self, id: &Id) -> bool {
        self.selected.contains(id)
    }

    /// `true` iff at least one item is loaded and every loaded item is selected.
    pub fn is_all_selected<'a>(&self, items: impl IntoIterator<Item = &'a Id>) -> bool
    where
        Id: 'a,
    {
        let mut items = items.into_iter().peekable();
        items.peek().is_some() && items.all(|id| self.selected.contains(id))
    }

    /// `true` iff some, but not all, loaded items are selected.
    pub fn is_indeterminate<'a>(&self, items: impl IntoIterator<Item = &'a Id>) -> bool
    where
        Id: 'a,
    {
        let (total, selected) = items.into_iter().fold((0usize, 0usize), |(total, selected), id| {
            (total + 1, selected + usize::from(self.selected.contains(id)))
        });

        selected > 0 && selected < total
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in selection order.
    pub fn selected_ids(&self) -> Vec<Id> {
        self.selected.iter().cloned().collect()
    }

    /// Keeps only the ids accepted by `keep`; returns the number of dropped ids.
    pub fn retain(&mut self, mut keep: impl FnMut(&Id) -> bool) -> usize {
        let before = self.selected.len();
        self.selected.retain(|id| keep(id));
        before - self.selected.len()
    }
}
