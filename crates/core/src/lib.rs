//! Incremental catalog synchronisation for the VGMusic archive.
//!
//! Sources (one listing page per console) are discovered from the site's
//! index page, fetched concurrently, skipped when their change token did not
//! move, parsed into [`Record`]s and merged into a checksum-keyed
//! [`Catalog`], which can be persisted as (gzipped) JSON.

pub mod catalog;
pub mod config;
pub mod fetcher;
pub mod markup;
pub mod metrics;
pub mod page;
pub mod persist;
pub mod record;
pub mod source;
pub mod sync;
pub mod testing;

pub use catalog::{Catalog, CatalogSnapshot, Stats};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SiteConfig,
    StorageConfig, SyncConfig,
};
pub use fetcher::{FetchError, FetchResponse, Fetcher, HttpFetcher};
pub use page::{parse_index, parse_listing, IndexLinks, PageError, ParsedPage, SkippedRow};
pub use persist::{
    dump, dump_compressed, dump_to_path, load, load_compressed, load_from_path, PersistError,
};
pub use record::{extract_checksum, parse_row, Cell, Layout, Record, RecordError};
pub use source::SourceDescriptor;
pub use sync::{
    ChannelObserver, RefreshReport, SourceOutcome, SourceReport, SyncEngine, SyncError,
    SyncEvent, SyncEventEnvelope, SyncObserver, SyncOptions, TracingObserver, NEW_FILES_SOURCE,
};
