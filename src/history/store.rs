//! Bookmark-first, capacity-bounded history of search results
//!
//! `HistoryStore` keeps its entries permanently sorted: every bookmarked entry
//! precedes every unbookmarked one, and inside each group entries appear in
//! insertion order (oldest first). After every mutation the store holds at
//! most [`CAPACITY`] entries.
//!
//! # Eviction
//!
//! When an insertion overflows the store, the oldest unbookmarked entry is
//! dropped first. Bookmarked entries are only dropped, from the tail, once no
//! unbookmarked entry is left.
//!
//! # Indices
//!
//! All index arguments are positions in the current sorted view. A toggle or
//! delete may shift the position of other entries; every mutation reports a
//! [`StoreEvent`] so observers can invalidate positional state.

use crate::history::error::HistoryError;
use crate::models::{HistoryItem, ItemId, ViewMode};

/// Maximum number of entries kept in the store
pub const CAPACITY: usize = 30;

/// Notification emitted by every successful store mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A new item was inserted
    Inserted {
        /// Id of the new item
        id: ItemId,
        /// Where the new item sits in the view, `None` if it was evicted at once
        position: Option<usize>,
        /// Items dropped to restore the capacity bound
        evicted: Vec<HistoryItem>,
    },
    /// The item at `index` was deleted
    Removed {
        /// View index the item occupied before removal
        index: usize,
        /// The removed item
        item: HistoryItem,
    },
    /// An item's bookmark flag was flipped
    BookmarkToggled {
        id: ItemId,
        /// New value of the flag
        bookmark: bool,
        /// Whether the re-sort changed any view position
        moved: bool,
    },
}

impl StoreEvent {
    /// Whether view indices taken before this event may now denote other items
    #[must_use]
    pub const fn invalidates_positions(&self) -> bool {
        match self {
            Self::Inserted { .. } | Self::Removed { .. } => true,
            Self::BookmarkToggled { moved, .. } => *moved,
        }
    }
}

/// One stored item plus its insertion sequence number
#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    item: HistoryItem,
}

/// Ordered, capacity-bounded session history
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl HistoryStore {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Number of stored items
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of bookmarked items (the length of the bookmarks view)
    #[must_use]
    pub fn bookmarked_count(&self) -> usize {
        self.entries.iter().take_while(|e| e.item.bookmark).count()
    }

    /// Iterate over items in view order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &HistoryItem> + '_ {
        self.entries.iter().map(|e| &e.item)
    }

    /// Sorted view of every item
    #[must_use]
    pub fn view(&self) -> Vec<&HistoryItem> {
        self.iter().collect()
    }

    /// Sorted view filtered by `mode`
    ///
    /// The bookmarks view is the bookmarked prefix of the full view, so an
    /// index means the same item in both projections.
    #[must_use]
    pub fn visible(&self, mode: ViewMode) -> Vec<&HistoryItem> {
        match mode {
            ViewMode::History => self.view(),
            ViewMode::Bookmarks => self.iter().take_while(|item| item.bookmark).collect(),
        }
    }

    /// Item at a view index
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryItem> {
        self.entries.get(index).map(|e| &e.item)
    }

    /// Current view index of an item
    #[must_use]
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.entries.iter().position(|e| e.item.id == id)
    }

    /// Insert a freshly created item
    ///
    /// New items always start unbookmarked; a set flag is cleared. The item
    /// joins the end of the unbookmarked group, then the capacity bound is
    /// restored by eviction.
    pub fn insert_newest(&mut self, mut item: HistoryItem) -> StoreEvent {
        if item.bookmark {
            tracing::warn!(id = %item.id, "new history item arrived bookmarked, clearing flag");
            item.bookmark = false;
        }

        let id = item.id;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { seq, item });
        self.sort();

        let evicted = self.evict_overflow();
        let position = self.position(id);

        tracing::debug!(
            %id,
            ?position,
            evicted = evicted.len(),
            len = self.entries.len(),
            "inserted history item"
        );

        StoreEvent::Inserted {
            id,
            position,
            evicted,
        }
    }

    /// Flip the bookmark flag of the item at `index`, then re-sort
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::IndexOutOfRange` if `index` is not a valid view
    /// index; the store is left untouched.
    pub fn toggle_bookmark(&mut self, index: usize) -> Result<StoreEvent, HistoryError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(HistoryError::IndexOutOfRange { index, len })?;

        entry.item.bookmark = !entry.item.bookmark;
        let id = entry.item.id;
        let bookmark = entry.item.bookmark;

        let before: Vec<u64> = self.entries.iter().map(|e| e.seq).collect();
        self.sort();
        let moved = self.entries.iter().map(|e| e.seq).ne(before.into_iter());

        tracing::debug!(%id, bookmark, moved, "toggled bookmark");

        Ok(StoreEvent::BookmarkToggled {
            id,
            bookmark,
            moved,
        })
    }

    /// Remove the item at `index`
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::IndexOutOfRange` if `index` is not a valid view
    /// index; the store is left untouched.
    pub fn delete(&mut self, index: usize) -> Result<StoreEvent, HistoryError> {
        let len = self.entries.len();
        if index >= len {
            return Err(HistoryError::IndexOutOfRange { index, len });
        }

        let Entry { item, .. } = self.entries.remove(index);
        self.sort();

        tracing::debug!(id = %item.id, index, "deleted history item");

        Ok(StoreEvent::Removed { index, item })
    }

    fn sort(&mut self) {
        self.entries.sort_by_key(|e| (!e.item.bookmark, e.seq));
    }

    /// Restore the capacity bound; entries must already be sorted
    fn evict_overflow(&mut self) -> Vec<HistoryItem> {
        let mut evicted = Vec::new();
        while self.entries.len() > CAPACITY {
            // First unbookmarked entry is the oldest one; fall back to the tail.
            let victim = self
                .entries
                .iter()
                .position(|e| !e.item.bookmark)
                .unwrap_or(self.entries.len() - 1);
            evicted.push(self.entries.remove(victim).item);
        }
        evicted
    }
}
