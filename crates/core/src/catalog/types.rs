//! Types for the record catalog.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::record::Record;
use crate::source::SourceDescriptor;

/// Full catalog state, as persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Checksum -> record.
    #[serde(default)]
    pub entries: HashMap<String, Record>,
    /// Sources in discovery order.
    #[serde(default)]
    pub consoles: Vec<SourceDescriptor>,
}

/// Catalog size, for before/after comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub entries: usize,
    pub consoles: usize,
}
