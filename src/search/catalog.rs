//! Contract catalog used to pick a file filter
//!
//! The first entry is always the synthetic "all contracts" sentinel. When the
//! contract list cannot be fetched the catalog degrades to the sentinel alone;
//! this is informational and never blocks searching.

use crate::models::FileFilter;
use crate::search::client::SearchBackend;

/// Label of the "search every contract" entry, also echoed by the backend as
/// the `file` of unfiltered answers
pub const ALL_CONTRACTS: &str = "전체 계약서";

/// Selectable contracts, sentinel first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCatalog {
    entries: Vec<String>,
    fallback: bool,
}

impl Default for ContractCatalog {
    fn default() -> Self {
        Self::fallback()
    }
}

impl ContractCatalog {
    /// Catalog from a fetched contract list
    #[must_use]
    pub fn from_contracts(contracts: Vec<String>) -> Self {
        let mut entries = Vec::with_capacity(contracts.len() + 1);
        entries.push(ALL_CONTRACTS.to_string());
        entries.extend(
            contracts
                .into_iter()
                .filter(|c| !c.trim().is_empty() && c != ALL_CONTRACTS),
        );
        Self {
            entries,
            fallback: false,
        }
    }

    /// Catalog holding only the sentinel
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            entries: vec![ALL_CONTRACTS.to_string()],
            fallback: true,
        }
    }

    /// Fetch the catalog, degrading to [`ContractCatalog::fallback`] on failure
    pub async fn load(backend: &dyn SearchBackend) -> Self {
        match backend.contracts().await {
            Ok(contracts) => {
                tracing::debug!(count = contracts.len(), "loaded contract list");
                Self::from_contracts(contracts)
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not load contract list, offering all contracts only");
                Self::fallback()
            }
        }
    }

    /// All entries, sentinel first
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Whether the list could not be fetched
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// File filter for a catalog entry chosen by name or 1-based number
    ///
    /// Returns `None` if `choice` names no entry.
    #[must_use]
    pub fn filter_for(&self, choice: &str) -> Option<FileFilter> {
        let choice = choice.trim();
        let entry = match choice.parse::<usize>() {
            Ok(n) if n >= 1 => self.entries.get(n - 1)?,
            _ => self.entries.iter().find(|e| e.as_str() == choice)?,
        };

        if entry == ALL_CONTRACTS {
            Some(FileFilter::All)
        } else {
            Some(FileFilter::File(entry.clone()))
        }
    }
}
