//! Prometheus metrics for the sync engine.
//!
//! This module provides metrics for:
//! - Discovery (sources found)
//! - Refresh (per-source outcomes, fetch latency)
//! - Merge (records merged, new entries, malformed rows)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Discovery
// =============================================================================

/// Sources found by the last discovery pass.
pub static SOURCES_DISCOVERED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "vgmsync_sources_discovered",
        "Number of sources found by the last discovery pass",
    )
    .unwrap()
});

// =============================================================================
// Refresh
// =============================================================================

/// Source refreshes by terminal outcome.
pub static SOURCES_REFRESHED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "vgmsync_sources_refreshed_total",
            "Total source refreshes by outcome",
        ),
        &["outcome"], // "parsed", "unchanged", "failed", "excluded"
    )
    .unwrap()
});

/// Page fetch duration in seconds.
pub static FETCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "vgmsync_fetch_duration_seconds",
            "Duration of listing page fetches",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["result"], // "success", "error"
    )
    .unwrap()
});

// =============================================================================
// Merge
// =============================================================================

/// Records merged into the catalog (new and updated).
pub static RECORDS_MERGED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "vgmsync_records_merged_total",
        "Total records merged into the catalog",
    )
    .unwrap()
});

/// Records whose checksum was not yet in the catalog.
pub static NEW_ENTRIES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "vgmsync_new_entries_total",
        "Total records added under a previously unseen checksum",
    )
    .unwrap()
});

/// Listing rows dropped because they could not be parsed.
pub static MALFORMED_ROWS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "vgmsync_malformed_rows_total",
        "Total listing rows skipped as malformed",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SOURCES_DISCOVERED.clone()),
        Box::new(SOURCES_REFRESHED.clone()),
        Box::new(FETCH_DURATION.clone()),
        Box::new(RECORDS_MERGED.clone()),
        Box::new(NEW_ENTRIES.clone()),
        Box::new(MALFORMED_ROWS.clone()),
    ]
}
