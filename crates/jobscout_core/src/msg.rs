use crate::{HarvestReport, ResultFilter, SearchRequest, SortKey, Source, SourceOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted a search.
    SearchSubmitted(SearchRequest),
    /// Engine finished one source; records arrive with `HarvestFinished`.
    SourceFinished {
        source: Source,
        outcome: SourceOutcome,
    },
    /// Engine joined every source.
    HarvestFinished(HarvestReport),
    /// Export effect completed, with the written CSV path or an error.
    ExportFinished(Result<String, String>),
    SortChanged(SortKey),
    FilterChanged(ResultFilter),
    /// Idle wake-up of the message loop; changes nothing.
    Tick,
}
