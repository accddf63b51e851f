//! Jobscout core: normalized job records, harvest reports, result-set
//! operations and the pure state machine behind the app.
mod effect;
mod msg;
mod outcome;
mod record;
mod result_set;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, SearchRequest};
pub use msg::Msg;
pub use outcome::{FallbackCause, HarvestReport, SourceOutcome};
pub use record::{
    JobRecord, Source, UnknownSource, CSV_HEADER, DEFAULT_POSTED, PLACEHOLDER_COMPANY,
    PLACEHOLDER_LOCATION,
};
pub use result_set::{select, summarize, ResultFilter, ResultSummary, SortKey};
pub use state::{AppState, SessionState};
pub use update::update;
pub use view_model::{AppViewModel, JobRowView, OutcomeRowView};
