use crate::{HarvestReport, Source};

/// A harvest the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: String,
    /// Per-source cap; `None` uses each source's default.
    pub max_results: Option<usize>,
    pub sources: Vec<Source>,
    /// Write CSV and manifest once the harvest finishes.
    pub export: bool,
}

impl SearchRequest {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            max_results: None,
            sources: Source::ALL.to_vec(),
            export: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartHarvest(SearchRequest),
    ExportResults(HarvestReport),
}
