use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::{JobRecord, Source};

/// Why a source's batch consists of placeholder records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "cause", rename_all = "snake_case")]
pub enum FallbackCause {
    FetchFailed { reason: String },
    NoListings,
}

impl fmt::Display for FallbackCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackCause::FetchFailed { reason } => write!(f, "fetch failed: {reason}"),
            FallbackCause::NoListings => write!(f, "no listings found"),
        }
    }
}

/// Result of one source's part in a harvest.
///
/// A source whose adapter fell back to placeholders still counts as a
/// success; `fallback` says why. Only scheduling problems are failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    Success {
        count: usize,
        fallback: Option<FallbackCause>,
    },
    Failure {
        reason: String,
    },
}

impl SourceOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SourceOutcome::Success { .. })
    }

    pub fn count(&self) -> usize {
        match self {
            SourceOutcome::Success { count, .. } => *count,
            SourceOutcome::Failure { .. } => 0,
        }
    }

    pub fn fallback(&self) -> Option<&FallbackCause> {
        match self {
            SourceOutcome::Success { fallback, .. } => fallback.as_ref(),
            SourceOutcome::Failure { .. } => None,
        }
    }
}

impl fmt::Display for SourceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceOutcome::Success {
                count,
                fallback: None,
            } => write!(f, "{count} jobs"),
            SourceOutcome::Success {
                count,
                fallback: Some(cause),
            } => write!(f, "{count} placeholder jobs ({cause})"),
            SourceOutcome::Failure { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// Everything one harvest produced, handed to presentation as a single value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HarvestReport {
    pub term: String,
    /// Batches in completion order; each batch keeps its extraction order.
    pub records: Vec<JobRecord>,
    pub outcomes: BTreeMap<Source, SourceOutcome>,
}

impl HarvestReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn synthetic_count(&self) -> usize {
        self.records.iter().filter(|r| r.synthetic).count()
    }

    pub fn records_from(&self, source: Source) -> impl Iterator<Item = &JobRecord> {
        self.records.iter().filter(move |r| r.source == source)
    }
}
