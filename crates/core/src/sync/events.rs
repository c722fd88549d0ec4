use serde::{Deserialize, Serialize};

/// Events emitted by the sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncEvent {
    // Discovery
    DiscoveryStarted {
        index_url: String,
    },
    SourceDiscovered {
        name: String,
        url: String,
    },
    /// A navigation link was not turned into a source.
    LinkSkipped {
        href: String,
        reason: String,
    },
    DiscoveryCompleted {
        sources: usize,
    },

    // Refresh, one terminal event per source
    /// New-files feed left out because refreshing it is disabled.
    SourceExcluded {
        name: String,
    },
    /// Change token matched, page not parsed.
    SourceUnchanged {
        name: String,
    },
    SourceParsed {
        name: String,
        records: usize,
        new_entries: usize,
        skipped_rows: usize,
    },
    SourceFailed {
        name: String,
        error: String,
    },

    /// A listing row could not be parsed and was dropped.
    RowSkipped {
        source: String,
        row: usize,
        reason: String,
    },

    RefreshCompleted {
        parsed: usize,
        unchanged: usize,
        excluded: usize,
        failed: usize,
        new_entries: usize,
    },
}

impl SyncEvent {
    /// The snake_case tag used in serialised form.
    pub fn kind(&self) -> &'static str {
        match self {
            SyncEvent::DiscoveryStarted { .. } => "discovery_started",
            SyncEvent::SourceDiscovered { .. } => "source_discovered",
            SyncEvent::LinkSkipped { .. } => "link_skipped",
            SyncEvent::DiscoveryCompleted { .. } => "discovery_completed",
            SyncEvent::SourceExcluded { .. } => "source_excluded",
            SyncEvent::SourceUnchanged { .. } => "source_unchanged",
            SyncEvent::SourceParsed { .. } => "source_parsed",
            SyncEvent::SourceFailed { .. } => "source_failed",
            SyncEvent::RowSkipped { .. } => "row_skipped",
            SyncEvent::RefreshCompleted { .. } => "refresh_completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = SyncEvent::SourceParsed {
            name: "NES".to_string(),
            records: 12,
            new_entries: 3,
            skipped_rows: 1,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "source_parsed");
        assert_eq!(json["records"], 12);

        let parsed: SyncEvent = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_kind_matches_serde_tag() {
        let events = vec![
            SyncEvent::DiscoveryCompleted { sources: 1 },
            SyncEvent::SourceUnchanged {
                name: "NES".to_string(),
            },
            SyncEvent::RowSkipped {
                source: "NES".to_string(),
                row: 4,
                reason: "no link".to_string(),
            },
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["type"], event.kind());
        }
    }
}
