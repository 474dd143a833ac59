//! Session history subsystem
//!
//! This module owns the in-memory record of completed searches:
//!
//! - **`HistoryStore`**: ordered, capacity-bounded collection keeping every
//!   bookmarked entry ahead of every unbookmarked one
//! - **`SelectionManager`**: index-based multi-selection over the store's
//!   current view, used to pick entries for export
//! - **`StoreEvent`**: what a mutation did, so positional state can be
//!   invalidated
//!
//! History lives only for the current process; nothing is persisted.

pub mod error;
pub mod selection;
pub mod store;

pub use error::HistoryError;
pub use selection::SelectionManager;
pub use store::{CAPACITY, HistoryStore, StoreEvent};
