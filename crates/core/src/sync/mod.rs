//! Synchronisation engine.
//!
//! Discovery reads the index page and replaces the catalog's source list.
//! Refresh fetches every source concurrently, skips pages whose change token
//! did not move, parses the rest and merges their records into the catalog.
//! One source failing never stops the others.

mod engine;
mod events;
mod observer;
mod report;

pub use engine::{SyncEngine, SyncOptions, NEW_FILES_SOURCE};
pub use events::SyncEvent;
pub use observer::{ChannelObserver, SyncEventEnvelope, SyncObserver, TracingObserver};
pub use report::{RefreshReport, SourceOutcome, SourceReport};

use thiserror::Error;

use crate::fetcher::FetchError;
use crate::page::PageError;

/// Errors for discovery and refresh, tagged with the page that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("Failed to fetch {name}: {error}")]
    Fetch {
        name: String,
        #[source]
        error: FetchError,
    },

    #[error("Failed to parse {name}: {error}")]
    Page {
        name: String,
        #[source]
        error: PageError,
    },
}

impl SyncError {
    /// Name of the source (or `index`) the error belongs to.
    pub fn source_name(&self) -> &str {
        match self {
            SyncError::Fetch { name, .. } | SyncError::Page { name, .. } => name,
        }
    }
}
