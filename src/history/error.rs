//! History-specific error types
//!
//! Both variants indicate a caller defect: a view index that was computed
//! against an older ordering of the store. They are logic faults, not
//! conditions to show to a user.
//!
//! # Error Types
//!
//! - **`IndexOutOfRange`**: the index is past the end of the current view
//! - **`StaleIndex`**: the index is in range but now denotes a different item

use thiserror::Error;

/// History store and selection errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// View index past the end of the current view
    #[error("Index {index} is out of range for a view of {len} item(s)")]
    IndexOutOfRange { index: usize, len: usize },

    /// View index that referred to another item when it was selected
    #[error("Index {index} no longer refers to the item it was selected for")]
    StaleIndex { index: usize },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
