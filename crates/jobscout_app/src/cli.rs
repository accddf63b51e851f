use std::path::PathBuf;

use clap::Parser;
use jobscout_core::{ResultFilter, SearchRequest, SortKey, Source};

use crate::settings::{AppSettings, SETTINGS_FILENAME};

#[derive(Debug, Parser)]
#[command(name = "jobscout", version)]
#[command(about = "Search Internshala, Naukri.com and Indeed for job listings")]
pub(crate) struct Cli {
    /// Job title or keywords, e.g. `data analyst`
    #[arg(required = true, num_args = 1..)]
    pub term: Vec<String>,

    /// Listings to keep per source
    #[arg(short = 'n', long)]
    pub max_results: Option<usize>,

    /// Order of the result table: relevance, company, location or source
    #[arg(long, default_value_t = SortKey::Relevance, value_parser = parse_sort)]
    pub sort: SortKey,

    /// Only search this source (repeatable)
    #[arg(long = "source", value_parser = parse_source)]
    pub sources: Vec<Source>,

    /// Only show listings in this location (repeatable)
    #[arg(long = "location")]
    pub locations: Vec<String>,

    /// Only show listings from this company (repeatable)
    #[arg(long = "company")]
    pub companies: Vec<String>,

    /// Directory for the CSV export
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Skip writing the CSV export
    #[arg(long)]
    pub no_export: bool,

    /// Settings file
    #[arg(long, default_value = SETTINGS_FILENAME)]
    pub config: PathBuf,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_sort(value: &str) -> Result<SortKey, String> {
    value.parse()
}

fn parse_source(value: &str) -> Result<Source, String> {
    value.parse().map_err(|err: jobscout_core::UnknownSource| err.to_string())
}

impl Cli {
    pub(crate) fn term(&self) -> String {
        self.term.join(" ")
    }

    /// Command-line flags win over the settings file.
    pub(crate) fn apply_to(&self, settings: &mut AppSettings) {
        if let Some(dir) = &self.out {
            settings.output_dir = dir.clone();
        }
        if let Some(max) = self.max_results {
            settings.max_results = Some(max);
        }
        if let Some(secs) = self.timeout {
            settings.request_timeout_secs = secs;
        }
        if !self.sources.is_empty() {
            settings.sources = self.sources.clone();
        }
    }

    pub(crate) fn request(&self, settings: &AppSettings) -> SearchRequest {
        SearchRequest {
            term: self.term(),
            max_results: settings.max_results,
            sources: settings.harvest_settings().sources,
            export: !self.no_export,
        }
    }

    pub(crate) fn filter(&self) -> ResultFilter {
        ResultFilter {
            sources: Default::default(),
            locations: self.locations.iter().map(|l| l.trim().to_string()).collect(),
            companies: self.companies.iter().map(|c| c.trim().to_string()).collect(),
        }
    }
}
