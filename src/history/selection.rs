//! Multi-selection overlay for bulk export
//!
//! `SelectionManager` records which view positions the user ticked. It has
//! no access to the store, so each selected position also remembers the id
//! of the item it pointed at; resolving the selection against a later view
//! detects positions that went stale instead of silently picking another
//! item.
//!
//! The selection must be cleared whenever a new search completes, the active
//! view mode changes, or an item is deleted. [`SelectionManager::observe`]
//! applies the store-driven part of that rule from a [`StoreEvent`].

use std::collections::{BTreeMap, BTreeSet};

use crate::history::error::HistoryError;
use crate::history::store::StoreEvent;
use crate::models::{HistoryItem, ItemId};

/// Set of selected view indices
#[derive(Debug, Default, Clone)]
pub struct SelectionManager {
    selected: BTreeMap<usize, ItemId>,
}

impl SelectionManager {
    /// Create an empty selection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: BTreeMap::new(),
        }
    }

    /// Select `index` if it is not selected, deselect it otherwise
    ///
    /// Returns whether the index is selected after the call.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::IndexOutOfRange` when selecting an index past
    /// the end of `view`. Deselecting never fails.
    pub fn toggle(&mut self, index: usize, view: &[&HistoryItem]) -> Result<bool, HistoryError> {
        if self.selected.remove(&index).is_some() {
            return Ok(false);
        }

        let item = view.get(index).ok_or(HistoryError::IndexOutOfRange {
            index,
            len: view.len(),
        })?;
        self.selected.insert(index, item.id);
        Ok(true)
    }

    /// Drop every selected index
    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            tracing::debug!(count = self.selected.len(), "cleared selection");
        }
        self.selected.clear();
    }

    /// Currently selected view indices, ascending
    #[must_use]
    pub fn members(&self) -> BTreeSet<usize> {
        self.selected.keys().copied().collect()
    }

    /// Whether `index` is selected
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.selected.contains_key(&index)
    }

    /// Number of selected indices
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// React to a store mutation
    ///
    /// Clears the selection when the event may have shifted what existing
    /// indices denote.
    pub fn observe(&mut self, event: &StoreEvent) {
        if event.invalidates_positions() {
            self.clear();
        }
    }

    /// Slice `view` down to the selected items, in view order
    ///
    /// # Errors
    ///
    /// - `HistoryError::IndexOutOfRange` if a selected index is past the end
    ///   of `view`
    /// - `HistoryError::StaleIndex` if a selected index now holds a different
    ///   item than when it was selected
    pub fn resolve<'a>(&self, view: &[&'a HistoryItem]) -> Result<Vec<&'a HistoryItem>, HistoryError> {
        self.selected
            .iter()
            .map(|(&index, &id)| {
                let item = view.get(index).ok_or(HistoryError::IndexOutOfRange {
                    index,
                    len: view.len(),
                })?;
                if item.id == id {
                    Ok(*item)
                } else {
                    Err(HistoryError::StaleIndex { index })
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::store::HistoryStore;
    use crate::testing::{item, questions};

    fn store_with(qs: &[&str]) -> HistoryStore {
        let mut store = HistoryStore::new();
        for q in qs {
            store.insert_newest(item(q));
        }
        store
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let store = store_with(&["Q1", "Q2"]);
        let view = store.view();
        let mut selection = SelectionManager::new();

        assert!(selection.toggle(1, &view).unwrap());
        assert!(selection.contains(1));
        assert!(!selection.toggle(1, &view).unwrap());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_past_end_fails() {
        let store = store_with(&["Q1"]);
        let mut selection = SelectionManager::new();
        let err = selection.toggle(3, &store.view()).unwrap_err();
        assert_eq!(err, HistoryError::IndexOutOfRange { index: 3, len: 1 });
        assert!(selection.is_empty());
    }

    #[test]
    fn test_members_are_ascending() {
        let store = store_with(&["Q1", "Q2", "Q3"]);
        let view = store.view();
        let mut selection = SelectionManager::new();
        selection.toggle(2, &view).unwrap();
        selection.toggle(0, &view).unwrap();

        let members: Vec<usize> = selection.members().into_iter().collect();
        assert_eq!(members, vec![0, 2]);
    }

    #[test]
    fn test_resolve_in_view_order() {
        let store = store_with(&["Q1", "Q2", "Q3"]);
        let view = store.view();
        let mut selection = SelectionManager::new();
        selection.toggle(2, &view).unwrap();
        selection.toggle(1, &view).unwrap();

        let picked = selection.resolve(&view).unwrap();
        assert_eq!(questions(&picked), vec!["Q2", "Q3"]);
    }

    #[test]
    fn test_forgotten_clear_after_delete_is_detected() {
        let mut store = store_with(&["Q1", "Q2", "Q3"]);
        let mut selection = SelectionManager::new();
        selection.toggle(2, &store.view()).unwrap();

        store.delete(0).unwrap();

        let err = selection.resolve(&store.view()).unwrap_err();
        assert_eq!(err, HistoryError::IndexOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn test_shifted_index_is_stale() {
        let mut store = store_with(&["Q1", "Q2", "Q3"]);
        let mut selection = SelectionManager::new();
        selection.toggle(1, &store.view()).unwrap();

        store.delete(0).unwrap();

        let err = selection.resolve(&store.view()).unwrap_err();
        assert_eq!(err, HistoryError::StaleIndex { index: 1 });
    }

    #[test]
    fn test_observe_clears_on_invalidating_events() {
        let mut store = store_with(&["Q1", "Q2"]);
        let mut selection = SelectionManager::new();
        selection.toggle(0, &store.view()).unwrap();

        let event = store.insert_newest(item("Q3"));
        selection.observe(&event);
        assert!(selection.is_empty());

        selection.toggle(1, &store.view()).unwrap();
        let event = store.delete(2).unwrap();
        selection.observe(&event);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_observe_keeps_selection_when_nothing_moved() {
        let mut store = store_with(&["Q1", "Q2"]);
        let mut selection = SelectionManager::new();
        selection.toggle(1, &store.view()).unwrap();

        let event = store.toggle_bookmark(0).unwrap();
        selection.observe(&event);

        assert_eq!(selection.len(), 1);
        assert!(selection.resolve(&store.view()).is_ok());
    }

    #[test]
    fn test_observe_clears_when_toggle_reorders() {
        let mut store = store_with(&["Q1", "Q2"]);
        let mut selection = SelectionManager::new();
        selection.toggle(0, &store.view()).unwrap();

        let event = store.toggle_bookmark(1).unwrap();
        selection.observe(&event);

        assert!(selection.is_empty());
    }
}
