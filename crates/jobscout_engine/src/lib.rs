//! Jobscout engine: fetching, per-source extraction, concurrent harvesting
//! and export of the merged result set.
mod decode;
mod document;
mod export;
mod fetch;
mod filename;
mod harvest;
mod persist;
mod sources;
mod types;

pub use decode::{decode_page, DecodedPage};
pub use document::{Listing, Page, SelectorPair, SelectorRule};
pub use export::{export_report, write_csv, ExportError, ExportOptions, ExportSummary};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, BROWSER_USER_AGENT};
pub use filename::export_filename;
pub use harvest::{
    ChannelProgressSink, HarvestSettings, Harvester, NoopProgressSink, ProgressSink,
};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use sources::{SourceAdapter, SourceBatch};
pub use types::{
    CoordinatorError, FailureKind, FetchError, FetchOutput, HarvestEvent, ParseError, SetupError,
};
