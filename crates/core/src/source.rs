//! Source descriptors: one per listing page.

use serde::{Deserialize, Serialize};

use crate::record::Layout;

/// A listing page the catalog is built from.
///
/// Serialised with the persisted catalog under `consoles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Display name, unique within a catalog.
    pub name: String,
    /// Absolute fetch URL.
    pub url: String,
    /// Change token from the last successful sync; empty if never synced.
    #[serde(default)]
    pub etag: String,
}

impl SourceDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            etag: String::new(),
        }
    }

    /// Table schema of this source's page, decided by its URL.
    pub fn layout(&self) -> Layout {
        Layout::for_url(&self.url)
    }

    pub fn is_new_files(&self) -> bool {
        self.layout() == Layout::NewFiles
    }

    pub fn never_synced(&self) -> bool {
        self.etag.is_empty()
    }

    /// Whether a response carrying `token` has to be parsed.
    ///
    /// A source that was never synced is always parsed, otherwise only when
    /// the token moved.
    pub fn needs_parse(&self, token: Option<&str>) -> bool {
        self.never_synced() || token.unwrap_or_default() != self.etag
    }
}
