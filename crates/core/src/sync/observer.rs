//! Observers receive every [`SyncEvent`] the engine emits.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::SyncEvent;

/// Receiver of engine events. Called inline from refresh tasks, so
/// implementations must be cheap and must not block.
pub trait SyncObserver: Send + Sync {
    fn on_event(&self, event: &SyncEvent);
}

/// Logs every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SyncObserver for TracingObserver {
    fn on_event(&self, event: &SyncEvent) {
        match event {
            SyncEvent::DiscoveryStarted { index_url } => {
                info!(index_url = %index_url, "Discovering sources")
            }
            SyncEvent::SourceDiscovered { name, url } => {
                debug!(source = %name, url = %url, "Source discovered")
            }
            SyncEvent::LinkSkipped { href, reason } => {
                warn!(href = %href, reason = %reason, "Navigation link skipped")
            }
            SyncEvent::DiscoveryCompleted { sources } => {
                info!(sources = sources, "Discovery complete")
            }
            SyncEvent::SourceExcluded { name } => {
                debug!(source = %name, "Source excluded from refresh")
            }
            SyncEvent::SourceUnchanged { name } => {
                info!(source = %name, "Source unchanged, skipping")
            }
            SyncEvent::SourceParsed {
                name,
                records,
                new_entries,
                skipped_rows,
            } => info!(
                source = %name,
                records = records,
                new_entries = new_entries,
                skipped_rows = skipped_rows,
                "Source parsed"
            ),
            SyncEvent::SourceFailed { name, error } => {
                warn!(source = %name, error = %error, "Source refresh failed")
            }
            SyncEvent::RowSkipped { source, row, reason } => {
                warn!(source = %source, row = row, reason = %reason, "Row skipped")
            }
            SyncEvent::RefreshCompleted {
                parsed,
                unchanged,
                excluded,
                failed,
                new_entries,
            } => info!(
                parsed = parsed,
                unchanged = unchanged,
                excluded = excluded,
                failed = failed,
                new_entries = new_entries,
                "Refresh complete"
            ),
        }
    }
}

/// Event with the time it was emitted.
#[derive(Debug, Clone)]
pub struct SyncEventEnvelope {
    pub timestamp: DateTime<Utc>,
    pub event: SyncEvent,
}

/// Forwards events into a bounded channel.
///
/// Never blocks: when the channel is full or closed the event is dropped
/// and the failure logged.
#[derive(Clone)]
pub struct ChannelObserver {
    tx: mpsc::Sender<SyncEventEnvelope>,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::Sender<SyncEventEnvelope>) -> Self {
        Self { tx }
    }

    /// Create an observer together with the receiving end.
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<SyncEventEnvelope>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self::new(tx), rx)
    }
}

impl SyncObserver for ChannelObserver {
    fn on_event(&self, event: &SyncEvent) {
        let envelope = SyncEventEnvelope {
            timestamp: Utc::now(),
            event: event.clone(),
        };
        if let Err(e) = self.tx.try_send(envelope) {
            error!("Failed to forward sync event: {}", e);
        }
    }
}
