use std::collections::BTreeMap;

use crate::result_set::{select, summarize};
use crate::view_model::{AppViewModel, JobRowView, OutcomeRowView};
use crate::{HarvestReport, JobRecord, ResultFilter, SearchRequest, SortKey, Source, SourceOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Harvesting,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: SessionState,
    request: Option<SearchRequest>,
    outcomes: BTreeMap<Source, SourceOutcome>,
    records: Vec<JobRecord>,
    sort: SortKey,
    filter: ResultFilter,
    notices: Vec<String>,
    export_pending: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    /// True once a harvest has finished and nothing is left to run.
    pub fn is_settled(&self) -> bool {
        self.session == SessionState::Finished && !self.export_pending
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let sources_total = self
            .request
            .as_ref()
            .map(|request| request.sources.len())
            .unwrap_or(0);
        let outcomes = self
            .outcomes
            .iter()
            .map(|(source, outcome)| OutcomeRowView {
                source: *source,
                summary: outcome.to_string(),
                success: outcome.is_success(),
                synthetic: outcome.fallback().is_some(),
            })
            .collect();
        let rows = select(&self.records, &self.filter, self.sort)
            .into_iter()
            .map(JobRowView::from)
            .collect();

        AppViewModel {
            session: self.session,
            term: self.request.as_ref().map(|request| request.term.clone()),
            sources_done: self.outcomes.len(),
            sources_total,
            outcomes,
            summary: summarize(&self.records),
            rows,
            sort: self.sort,
            filter_active: !self.filter.is_empty(),
            notices: self.notices.clone(),
            dirty: self.dirty,
        }
    }

    pub(crate) fn start_harvest(&mut self, request: SearchRequest) {
        self.session = SessionState::Harvesting;
        self.request = Some(request);
        self.outcomes.clear();
        self.records.clear();
        self.export_pending = false;
        self.mark_dirty();
    }

    pub(crate) fn record_outcome(&mut self, source: Source, outcome: SourceOutcome) {
        let notice = match &outcome {
            SourceOutcome::Success { count, .. } => {
                format!("Scraped {count} jobs from {source}")
            }
            SourceOutcome::Failure { reason } => {
                format!("Failed to scrape {source}: {reason}")
            }
        };
        self.notices.push(notice);
        self.outcomes.insert(source, outcome);
        self.mark_dirty();
    }

    /// Stores the final report. When an export should run, returns the report
    /// to export: every record, in the current sort order.
    pub(crate) fn finish_harvest(&mut self, report: HarvestReport) -> Option<HarvestReport> {
        let HarvestReport {
            term,
            records,
            outcomes,
        } = report;
        self.session = SessionState::Finished;
        self.records = records;
        // The report is authoritative, including sources whose event was missed.
        self.outcomes.extend(outcomes);
        if self.records.is_empty() {
            self.push_notice(
                "No jobs found. Try different keywords or check your internet connection.",
            );
        }
        let wants_export = self
            .request
            .as_ref()
            .map(|request| request.export)
            .unwrap_or(false);
        self.export_pending = wants_export && !self.records.is_empty();
        self.mark_dirty();
        if !self.export_pending {
            return None;
        }

        let records = select(&self.records, &ResultFilter::default(), self.sort)
            .into_iter()
            .cloned()
            .collect();
        Some(HarvestReport {
            term,
            records,
            outcomes: self.outcomes.clone(),
        })
    }

    pub(crate) fn finish_export(&mut self, result: Result<String, String>) {
        self.export_pending = false;
        match result {
            Ok(path) => self.push_notice(format!("Saved results to {path}")),
            Err(err) => self.push_notice(format!("Export failed: {err}")),
        }
    }

    pub(crate) fn set_sort(&mut self, sort: SortKey) {
        if self.sort != sort {
            self.sort = sort;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_filter(&mut self, filter: ResultFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.mark_dirty();
        }
    }

    pub(crate) fn push_notice(&mut self, notice: impl Into<String>) {
        self.notices.push(notice.into());
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
