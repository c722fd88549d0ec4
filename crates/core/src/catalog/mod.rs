//! Record catalog - the checksum-keyed merge target of every sync.
//!
//! The catalog owns the accumulated records and the list of known sources.
//! All methods take `&self`; each mutation holds its lock only for the map
//! or list update itself, so concurrent refresh tasks never serialise on
//! network I/O.

mod types;

pub use types::*;

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::record::Record;
use crate::source::SourceDescriptor;

/// In-memory record catalog, safe to share between tasks.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: RwLock<HashMap<String, Record>>,
    sources: RwLock<Vec<SourceDescriptor>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a persisted snapshot.
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self {
            entries: RwLock::new(snapshot.entries),
            sources: RwLock::new(snapshot.consoles),
        }
    }

    /// Upsert records by checksum; the last write wins.
    ///
    /// Returns the number of checksums that were not present before.
    pub fn add<I>(&self, records: I) -> usize
    where
        I: IntoIterator<Item = Record>,
    {
        let mut entries = write(&self.entries);
        let mut added = 0;
        for record in records {
            if entries.insert(record.checksum.clone(), record).is_none() {
                added += 1;
            }
        }
        added
    }

    /// All records matching `predicate`, in no particular order.
    pub fn search<F>(&self, predicate: F) -> Vec<Record>
    where
        F: Fn(&Record) -> bool,
    {
        read(&self.entries)
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    pub fn get(&self, checksum: &str) -> Option<Record> {
        read(&self.entries).get(checksum).cloned()
    }

    /// Records listed under the named source.
    pub fn records_for_source(&self, name: &str) -> Vec<Record> {
        self.search(|r| r.console == name)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            entries: read(&self.entries).len(),
            consoles: read(&self.sources).len(),
        }
    }

    pub fn len(&self) -> usize {
        read(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        read(&self.entries).is_empty()
    }

    /// Drop every record, keeping the sources.
    pub fn clear(&self) {
        write(&self.entries).clear();
    }

    /// Snapshot of the source list in discovery order.
    pub fn sources(&self) -> Vec<SourceDescriptor> {
        read(&self.sources).clone()
    }

    pub fn source(&self, name: &str) -> Option<SourceDescriptor> {
        read(&self.sources).iter().find(|s| s.name == name).cloned()
    }

    /// Replace the whole source list (used by discovery).
    pub fn replace_sources(&self, sources: Vec<SourceDescriptor>) {
        *write(&self.sources) = sources;
    }

    /// Store the change token of a source after a successful sync.
    ///
    /// Returns false if no source has that name (e.g. it vanished in a
    /// concurrent re-discovery).
    pub fn set_change_token(&self, name: &str, token: &str) -> bool {
        let mut sources = write(&self.sources);
        match sources.iter_mut().find(|s| s.name == name) {
            Some(source) => {
                source.etag = token.to_string();
                true
            }
            None => false,
        }
    }

    /// Consistent copy of the full state.
    ///
    /// Both locks are held together so the copy never mixes two versions.
    pub fn snapshot(&self) -> CatalogSnapshot {
        let entries = read(&self.entries);
        let sources = read(&self.sources);
        CatalogSnapshot {
            entries: entries.clone(),
            consoles: sources.clone(),
        }
    }

    /// Replace the full state with `snapshot`.
    pub fn restore(&self, snapshot: CatalogSnapshot) {
        let mut entries = write(&self.entries);
        let mut sources = write(&self.sources);
        *entries = snapshot.entries;
        *sources = snapshot.consoles;
    }
}

// A panic while holding a lock cannot leave a half-written HashMap entry, so
// poisoned guards are still usable.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}
