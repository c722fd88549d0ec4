use crate::catalog::Stats;

use super::SyncError;

/// Terminal state of one source in a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// Change token matched the stored one; page not parsed.
    Unchanged,
    /// Page parsed and merged.
    Parsed {
        records: usize,
        new_entries: usize,
        malformed: usize,
    },
    /// Fetch or parse failed; the source's token was left untouched.
    Failed(SyncError),
    /// New-files feed skipped because refreshing it is disabled.
    Excluded,
}

impl SourceOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceOutcome::Unchanged => "unchanged",
            SourceOutcome::Parsed { .. } => "parsed",
            SourceOutcome::Failed(_) => "failed",
            SourceOutcome::Excluded => "excluded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub name: String,
    pub outcome: SourceOutcome,
}

/// Outcome of a whole refresh run, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub sources: Vec<SourceReport>,
    pub before: Stats,
    pub after: Stats,
}

impl RefreshReport {
    /// Entries added by this run.
    pub fn new_entries(&self) -> usize {
        self.after.entries.saturating_sub(self.before.entries)
    }

    pub fn count(&self, outcome: &str) -> usize {
        self.sources
            .iter()
            .filter(|s| s.outcome.as_str() == outcome)
            .count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &SyncError> {
        self.sources.iter().filter_map(|s| match &s.outcome {
            SourceOutcome::Failed(e) => Some(e),
            _ => None,
        })
    }

    pub fn first_error(&self) -> Option<&SyncError> {
        self.errors().next()
    }

    /// `Err` with the first failure in source order, if any source failed.
    pub fn into_result(self) -> Result<Self, SyncError> {
        if let Some(e) = self.first_error() {
            return Err(e.clone());
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::FetchError;

    fn report(outcomes: Vec<SourceOutcome>) -> RefreshReport {
        RefreshReport {
            sources: outcomes
                .into_iter()
                .enumerate()
                .map(|(i, outcome)| SourceReport {
                    name: format!("source-{}", i),
                    outcome,
                })
                .collect(),
            before: Stats {
                entries: 10,
                consoles: 3,
            },
            after: Stats {
                entries: 15,
                consoles: 3,
            },
        }
    }

    fn failure(name: &str, status: u16) -> SourceOutcome {
        SourceOutcome::Failed(SyncError::Fetch {
            name: name.to_string(),
            error: FetchError::Status {
                status,
                url: format!("https://vgmusic.com/{}", name),
            },
        })
    }

    #[test]
    fn test_counts_and_new_entries() {
        let report = report(vec![
            SourceOutcome::Unchanged,
            SourceOutcome::Parsed {
                records: 5,
                new_entries: 5,
                malformed: 0,
            },
            SourceOutcome::Excluded,
        ]);

        assert_eq!(report.new_entries(), 5);
        assert_eq!(report.count("unchanged"), 1);
        assert_eq!(report.count("parsed"), 1);
        assert_eq!(report.count("excluded"), 1);
        assert_eq!(report.count("failed"), 0);
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_first_error_in_source_order() {
        let report = report(vec![
            SourceOutcome::Unchanged,
            failure("b", 500),
            failure("c", 404),
        ]);

        let err = report.into_result().unwrap_err();
        assert_eq!(err.source_name(), "b");
    }
}
