//! Discovery and concurrent refresh.

use std::sync::Arc;
use std::time::Instant;

use url::Url;

use super::{
    RefreshReport, SourceOutcome, SourceReport, SyncError, SyncEvent, SyncObserver,
    TracingObserver,
};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::fetcher::{FetchResponse, Fetcher};
use crate::markup::Document;
use crate::metrics::{
    FETCH_DURATION, MALFORMED_ROWS, NEW_ENTRIES, RECORDS_MERGED, SOURCES_DISCOVERED,
    SOURCES_REFRESHED,
};
use crate::page::{parse_index, parse_listing, IndexLinks, PageError, ParsedPage};
use crate::source::SourceDescriptor;

/// Name given to the new-files feed when discovery adds it.
pub const NEW_FILES_SOURCE: &str = "New Files";

/// Name used in errors and events for the index page.
const INDEX: &str = "index";

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Page whose navigation menus list every source.
    pub index_url: String,
    /// Chronological feed of new submissions.
    pub new_files_url: String,
    /// Discover and refresh the new-files feed. It can be large and changes
    /// on every submission.
    pub refresh_new_files: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SyncOptions {
    fn from(config: &Config) -> Self {
        Self {
            index_url: config.site.base_url.clone(),
            new_files_url: config.site.new_files_url.clone(),
            refresh_new_files: config.sync.refresh_new_files,
        }
    }
}

/// Keeps a [`Catalog`] in step with the site.
pub struct SyncEngine {
    fetcher: Arc<dyn Fetcher>,
    observer: Arc<dyn SyncObserver>,
    options: SyncOptions,
}

impl SyncEngine {
    /// Create an engine that reports through `tracing`.
    pub fn new(fetcher: Arc<dyn Fetcher>, options: SyncOptions) -> Self {
        Self {
            fetcher,
            observer: Arc::new(TracingObserver),
            options,
        }
    }

    /// Replace the event observer.
    pub fn with_observer(mut self, observer: Arc<dyn SyncObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SyncOptions) {
        self.options = options;
    }

    fn emit(&self, event: SyncEvent) {
        self.observer.on_event(&event);
    }

    /// Rebuild the catalog's source list from the index page.
    ///
    /// The list is replaced as a whole, so running discovery twice never
    /// accumulates stale sources. A source found again under the same name
    /// and URL keeps its change token. On failure the previous list is kept.
    /// Returns the number of sources found.
    pub async fn discover(&self, catalog: &Catalog) -> Result<usize, SyncError> {
        let index_url = Url::parse(&self.options.index_url).map_err(|e| SyncError::Page {
            name: INDEX.to_string(),
            error: PageError::InvalidUrl {
                url: self.options.index_url.clone(),
                reason: e.to_string(),
            },
        })?;

        self.emit(SyncEvent::DiscoveryStarted {
            index_url: self.options.index_url.clone(),
        });

        let response = self
            .fetcher
            .fetch(&self.options.index_url)
            .await
            .map_err(|error| SyncError::Fetch {
                name: INDEX.to_string(),
                error,
            })?;

        let links = read_index(&response, &index_url).map_err(|error| SyncError::Page {
            name: INDEX.to_string(),
            error,
        })?;

        for (href, reason) in links.skipped {
            self.emit(SyncEvent::LinkSkipped { href, reason });
        }

        let mut sources = links.sources;
        if self.options.refresh_new_files && !sources.iter().any(|s| s.name == NEW_FILES_SOURCE) {
            sources.push(SourceDescriptor::new(
                NEW_FILES_SOURCE,
                self.options.new_files_url.clone(),
            ));
        }

        for source in &sources {
            self.emit(SyncEvent::SourceDiscovered {
                name: source.name.clone(),
                url: source.url.clone(),
            });
        }

        let previous = catalog.sources();
        for source in &mut sources {
            if let Some(known) = previous
                .iter()
                .find(|p| p.name == source.name && p.url == source.url)
            {
                source.etag = known.etag.clone();
            }
        }

        let count = sources.len();
        catalog.replace_sources(sources);
        SOURCES_DISCOVERED.set(count as i64);
        self.emit(SyncEvent::DiscoveryCompleted { sources: count });

        Ok(count)
    }

    /// Refresh every source concurrently and report each outcome.
    ///
    /// Never fails as a whole; per-source failures are in the report and all
    /// successfully parsed sources stay merged.
    pub async fn refresh_report(&self, catalog: &Catalog) -> RefreshReport {
        let before = catalog.stats();
        let sources = catalog.sources();

        let tasks: Vec<_> = sources
            .into_iter()
            .map(|source| async move {
                let outcome = self.refresh_source(catalog, &source).await;
                SOURCES_REFRESHED
                    .with_label_values(&[outcome.as_str()])
                    .inc();
                SourceReport {
                    name: source.name,
                    outcome,
                }
            })
            .collect();

        let reports = futures::future::join_all(tasks).await;

        let report = RefreshReport {
            sources: reports,
            before,
            after: catalog.stats(),
        };

        self.emit(SyncEvent::RefreshCompleted {
            parsed: report.count("parsed"),
            unchanged: report.count("unchanged"),
            excluded: report.count("excluded"),
            failed: report.count("failed"),
            new_entries: report.new_entries(),
        });

        report
    }

    /// Refresh every source; `Err` carries the first failure (in source
    /// order) once all sources finished.
    ///
    /// An error means some sources failed, not that nothing was obtained:
    /// inspect [`Catalog::stats`] for how much was merged.
    pub async fn refresh(&self, catalog: &Catalog) -> Result<RefreshReport, SyncError> {
        self.refresh_report(catalog).await.into_result()
    }

    async fn refresh_source(&self, catalog: &Catalog, source: &SourceDescriptor) -> SourceOutcome {
        if source.is_new_files() && !self.options.refresh_new_files {
            self.emit(SyncEvent::SourceExcluded {
                name: source.name.clone(),
            });
            return SourceOutcome::Excluded;
        }

        let start = Instant::now();
        let fetched = self.fetcher.fetch(&source.url).await;
        let result = if fetched.is_ok() { "success" } else { "error" };
        FETCH_DURATION
            .with_label_values(&[result])
            .observe(start.elapsed().as_secs_f64());

        let response = match fetched {
            Ok(response) => response,
            Err(error) => {
                return self.fail(SyncError::Fetch {
                    name: source.name.clone(),
                    error,
                })
            }
        };

        let token = response.etag.as_deref();
        if !source.needs_parse(token) {
            self.emit(SyncEvent::SourceUnchanged {
                name: source.name.clone(),
            });
            return SourceOutcome::Unchanged;
        }

        let page = match read_listing(&response, source) {
            Ok(page) => page,
            Err(error) => {
                return self.fail(SyncError::Page {
                    name: source.name.clone(),
                    error,
                })
            }
        };

        for skipped in &page.skipped {
            self.emit(SyncEvent::RowSkipped {
                source: source.name.clone(),
                row: skipped.index,
                reason: skipped.error.to_string(),
            });
        }
        MALFORMED_ROWS.inc_by(page.skipped.len() as u64);

        let records = page.records.len();
        let malformed = page.skipped.len();
        let new_entries = catalog.add(page.records);
        RECORDS_MERGED.inc_by(records as u64);
        NEW_ENTRIES.inc_by(new_entries as u64);

        // Only after the merge, so a page that failed to parse is retried.
        catalog.set_change_token(&source.name, token.unwrap_or_default());

        self.emit(SyncEvent::SourceParsed {
            name: source.name.clone(),
            records,
            new_entries,
            skipped_rows: malformed,
        });

        SourceOutcome::Parsed {
            records,
            new_entries,
            malformed,
        }
    }

    fn fail(&self, error: SyncError) -> SourceOutcome {
        self.emit(SyncEvent::SourceFailed {
            name: error.source_name().to_string(),
            error: error.to_string(),
        });
        SourceOutcome::Failed(error)
    }
}

// Parsing is synchronous and the parsed document is not `Send`, so it lives
// entirely inside these helpers and never across an await point.

fn read_index(response: &FetchResponse, base: &Url) -> Result<IndexLinks, PageError> {
    let doc = Document::parse(&response.body)?;
    Ok(parse_index(&doc, base))
}

fn read_listing(
    response: &FetchResponse,
    source: &SourceDescriptor,
) -> Result<ParsedPage, PageError> {
    let doc = Document::parse(&response.body)?;
    parse_listing(&doc, source)
}
