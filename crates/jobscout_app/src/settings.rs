use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use engine_logging::{LogDestination, DEFAULT_LOG_FILE};
use jobscout_core::Source;
use jobscout_engine::{FetchSettings, HarvestSettings};
use serde::{Deserialize, Serialize};

pub(crate) const SETTINGS_FILENAME: &str = "jobscout.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub(crate) enum LogTarget {
    #[default]
    File,
    Terminal,
    Both,
    Off,
}

/// User settings read from `jobscout.ron`. Every field is optional in the
/// file; missing ones take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppSettings {
    pub output_dir: PathBuf,
    /// Per-source cap; `None` keeps each source's own default.
    pub max_results: Option<usize>,
    pub request_timeout_secs: u64,
    pub sources: Vec<Source>,
    /// Replacement origins, e.g. a mirror of one of the sites.
    pub origins: BTreeMap<Source, String>,
    pub log: LogTarget,
    pub log_file: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            max_results: None,
            request_timeout_secs: FetchSettings::default().request_timeout.as_secs(),
            sources: Source::ALL.to_vec(),
            origins: BTreeMap::new(),
            log: LogTarget::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppSettings {
    /// Missing file: defaults. Unreadable or malformed file: error, which the
    /// caller reports before falling back to defaults.
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()))
            }
        };
        ron::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub(crate) fn log_destination(&self) -> LogDestination {
        match self.log {
            LogTarget::File => LogDestination::File(self.log_file.clone()),
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both(self.log_file.clone()),
            LogTarget::Off => LogDestination::Off,
        }
    }

    pub(crate) fn harvest_settings(&self) -> HarvestSettings {
        let sources = if self.sources.is_empty() {
            Source::ALL.to_vec()
        } else {
            self.sources.clone()
        };
        let timeout = Duration::from_secs(self.request_timeout_secs.max(1));
        HarvestSettings {
            fetch: FetchSettings {
                connect_timeout: timeout,
                request_timeout: timeout,
                ..FetchSettings::default()
            },
            max_workers: sources.len(),
            sources,
            origins: self.origins.clone(),
        }
    }
}
