//! Interactive session state
//!
//! `Session` wires the history subsystem to the search orchestrator and the
//! export pipeline, the way a front end drives them:
//!
//! ```text
//! submit ──▶ SearchOrchestrator ──▶ HistoryStore::insert_newest
//!                                        │ StoreEvent
//! toggle_bookmark / delete ──▶ HistoryStore ──▶ SelectionManager::observe
//! toggle_selection ──▶ SelectionManager
//! export ──▶ SelectionManager::resolve(view) ──▶ export pipeline
//! ```
//!
//! Every store event is forwarded to the selection, so indices that changed
//! meaning are dropped automatically. A completed search also resets the view
//! to the full history and focuses the new item.

use std::sync::Arc;
use std::time::Duration;

use crate::export::{self, ExportError, ExportFormat};
use crate::history::{HistoryError, HistoryStore, SelectionManager, StoreEvent};
use crate::models::{FileFilter, HistoryItem, ItemId, Language, ViewMode};
use crate::search::{SearchBackend, SearchError, SearchOrchestrator};

/// One user's question/answer session
pub struct Session {
    store: HistoryStore,
    selection: SelectionManager,
    orchestrator: SearchOrchestrator,
    view_mode: ViewMode,
    focused: Option<ItemId>,
    language: Language,
    filter: FileFilter,
}

impl Session {
    /// Create an empty session searching through `backend`
    #[must_use]
    pub fn new(backend: Arc<dyn SearchBackend>, timeout: Duration, language: Language) -> Self {
        Self::with_orchestrator(SearchOrchestrator::new(backend, timeout), language)
    }

    /// Create an empty session around an existing orchestrator
    #[must_use]
    pub fn with_orchestrator(orchestrator: SearchOrchestrator, language: Language) -> Self {
        Self {
            store: HistoryStore::new(),
            selection: SelectionManager::new(),
            orchestrator,
            view_mode: ViewMode::History,
            focused: None,
            language,
            filter: FileFilter::All,
        }
    }

    /// The underlying history
    #[must_use]
    pub const fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// The export selection
    #[must_use]
    pub const fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    /// Whether a search is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.orchestrator.is_busy()
    }

    /// Answer language for new searches and export labels
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Contract filter for new searches
    #[must_use]
    pub const fn filter(&self) -> &FileFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FileFilter) {
        self.filter = filter;
    }

    /// Active view mode
    #[must_use]
    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switch view mode; clears the selection and the focused item
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if mode != self.view_mode {
            tracing::debug!(?mode, "switched view");
        }
        self.view_mode = mode;
        self.focused = None;
        self.selection.clear();
    }

    /// Items of the active view, in order
    #[must_use]
    pub fn view(&self) -> Vec<&HistoryItem> {
        self.store.visible(self.view_mode)
    }

    /// Item currently shown in detail
    #[must_use]
    pub fn focused(&self) -> Option<&HistoryItem> {
        self.focused
            .and_then(|id| self.store.position(id))
            .and_then(|index| self.store.get(index))
    }

    /// Show the item at a view index in detail
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::IndexOutOfRange` if `index` is not in the view.
    pub fn focus(&mut self, index: usize) -> Result<&HistoryItem, HistoryError> {
        let id = self.checked(index)?.id;
        self.focused = Some(id);
        self.checked(index)
    }

    /// Ask a question and record the answer
    ///
    /// On success the new item is inserted, the selection is cleared, the
    /// view returns to the full history and the new item is focused. On
    /// failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::EmptyQuery`, `SearchError::Busy` or
    /// `SearchError::SearchFailed`; see [`SearchOrchestrator::submit`].
    pub async fn submit(&mut self, question: &str) -> Result<ItemId, SearchError> {
        let item = self
            .orchestrator
            .submit(question, &self.filter, self.language)
            .await?;
        let id = item.id;

        let event = self.store.insert_newest(item);
        let landed = matches!(event, StoreEvent::Inserted { position: Some(_), .. });
        self.apply(&event);

        self.selection.clear();
        self.view_mode = ViewMode::History;
        self.focused = landed.then_some(id);
        Ok(id)
    }

    /// Flip the bookmark of the item at a view index
    ///
    /// Un-starring inside the bookmarks view removes the item from that view,
    /// so the selection and the focus are dropped even when no position in
    /// the full history moved.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::IndexOutOfRange` if `index` is not in the view.
    pub fn toggle_bookmark(&mut self, index: usize) -> Result<bool, HistoryError> {
        self.checked(index)?;
        let event = self.store.toggle_bookmark(index)?;
        self.apply(&event);

        let bookmarked = matches!(event, StoreEvent::BookmarkToggled { bookmark: true, .. });
        if self.view_mode == ViewMode::Bookmarks && !bookmarked {
            self.selection.clear();
            self.focused = None;
        }
        Ok(bookmarked)
    }

    /// Delete the item at a view index, returning it
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::IndexOutOfRange` if `index` is not in the view.
    pub fn delete(&mut self, index: usize) -> Result<HistoryItem, HistoryError> {
        let removed = self.checked(index)?.clone();
        let event = self.store.delete(index)?;
        self.apply(&event);
        Ok(removed)
    }

    /// Tick or untick a view index for export; returns whether it is ticked
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::IndexOutOfRange` when ticking an index that is
    /// not in the view.
    pub fn toggle_selection(&mut self, index: usize) -> Result<bool, HistoryError> {
        let view = self.store.visible(self.view_mode);
        self.selection.toggle(index, &view)
    }

    /// Untick everything
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected items of the active view, in view order
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if the selection no longer matches the view.
    pub fn selected_items(&self) -> Result<Vec<&HistoryItem>, HistoryError> {
        self.selection.resolve(&self.view())
    }

    /// Render the selected items
    ///
    /// # Errors
    ///
    /// - `ExportError::EmptySelection` if nothing is selected
    /// - `ExportError::Selection` if the selection no longer matches the view
    /// - encoding errors from the export pipeline
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
        if self.selection.is_empty() {
            return Err(ExportError::EmptySelection);
        }
        let items = self.selected_items()?;
        export::export(&items, format, self.language)
    }

    fn checked(&self, index: usize) -> Result<&HistoryItem, HistoryError> {
        let len = match self.view_mode {
            ViewMode::History => self.store.len(),
            ViewMode::Bookmarks => self.store.bookmarked_count(),
        };
        if index < len {
            self.store
                .get(index)
                .ok_or(HistoryError::IndexOutOfRange { index, len })
        } else {
            Err(HistoryError::IndexOutOfRange { index, len })
        }
    }

    fn apply(&mut self, event: &StoreEvent) {
        self.selection.observe(event);
        let focus_lost = match event {
            StoreEvent::Inserted { evicted, .. } => {
                evicted.iter().any(|item| Some(item.id) == self.focused)
            }
            StoreEvent::Removed { item, .. } => Some(item.id) == self.focused,
            StoreEvent::BookmarkToggled { .. } => false,
        };
        if focus_lost {
            self.focused = None;
        }
    }
}
