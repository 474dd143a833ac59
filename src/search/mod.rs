//! Search subsystem
//!
//! Everything between the question box and the history:
//!
//! - **`client`**: Search API wire types, the `SearchBackend` trait and its
//!   HTTP implementation
//! - **`orchestrator`**: validates a question, guards against overlapping
//!   searches, bounds the call with a timeout and builds the `HistoryItem`
//! - **`catalog`**: the contract list offered as a file filter
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use contract_ask::models::{FileFilter, Language};
//! use contract_ask::search::{DEFAULT_TIMEOUT, HttpSearchClient, SearchOrchestrator};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpSearchClient::new("http://localhost:8000", DEFAULT_TIMEOUT)?;
//! let orchestrator = SearchOrchestrator::new(Arc::new(client), DEFAULT_TIMEOUT);
//! let item = orchestrator
//!     .submit("What are the termination conditions?", &FileFilter::All, Language::En)
//!     .await?;
//! println!("{}", item.answer);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod error;
pub mod orchestrator;

pub use catalog::{ALL_CONTRACTS, ContractCatalog};
pub use client::{HttpSearchClient, SearchBackend, SearchRequest, SearchResponse};
pub use error::{BackendError, SearchError};
pub use orchestrator::{DEFAULT_TIMEOUT, SearchOrchestrator, SearchState};
