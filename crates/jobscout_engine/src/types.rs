use std::fmt;

use bytes::Bytes;
use jobscout_core::{Source, SourceOutcome};

/// Progress notification from the coordinator. Records are never streamed;
/// they arrive only in the final report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestEvent {
    SourceStarted { source: Source },
    SourceCompleted { source: Source, outcome: SourceOutcome },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Bytes,
    pub final_url: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    BadStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Transport,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::BadStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Transport => write!(f, "transport error"),
        }
    }
}

/// Failure to turn one listing container (or one selector rule) into data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
    #[error("listing has no title")]
    MissingTitle,
}

/// Scheduling failure for one source's worker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinatorError {
    #[error("worker task failed: {0}")]
    Worker(String),
    #[error("worker pool closed")]
    PoolClosed,
    #[error("async runtime unavailable: {0}")]
    Runtime(String),
}

/// Problems building a [`crate::Harvester`].
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
    #[error("invalid origin for {site}: {error}")]
    Origin {
        site: Source,
        #[source]
        error: url::ParseError,
    },
}
