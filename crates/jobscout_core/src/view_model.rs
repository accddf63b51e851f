use crate::{JobRecord, ResultSummary, SessionState, SortKey, Source};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub term: Option<String>,
    pub sources_done: usize,
    pub sources_total: usize,
    pub outcomes: Vec<OutcomeRowView>,
    /// Computed over all records, not just the filtered rows.
    pub summary: ResultSummary,
    pub rows: Vec<JobRowView>,
    pub sort: SortKey,
    pub filter_active: bool,
    pub notices: Vec<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRowView {
    pub source: Source,
    pub summary: String,
    pub success: bool,
    pub synthetic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub title: String,
    pub company: String,
    pub location: String,
    pub source: Source,
    pub posted: String,
    pub url: String,
    pub synthetic: bool,
}

impl From<&JobRecord> for JobRowView {
    fn from(record: &JobRecord) -> Self {
        Self {
            title: record.title.clone(),
            company: record.company.clone(),
            location: record.location.clone(),
            source: record.source,
            posted: record.posted.clone(),
            url: record.url.clone(),
            synthetic: record.synthetic,
        }
    }
}
