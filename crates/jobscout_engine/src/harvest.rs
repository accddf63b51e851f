use std::collections::BTreeMap;
use std::sync::{mpsc, Arc};

use engine_logging::{engine_error, engine_info};
use futures_util::future::select_all;
use jobscout_core::{HarvestReport, Source, SourceOutcome};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::sources::{SourceAdapter, SourceBatch};
use crate::{CoordinatorError, HarvestEvent, SetupError};

#[derive(Debug, Clone)]
pub struct HarvestSettings {
    pub fetch: FetchSettings,
    /// Sources to harvest, duplicates ignored.
    pub sources: Vec<Source>,
    /// Replacement origins, e.g. a mirror or a local fixture server.
    pub origins: BTreeMap<Source, String>,
    /// Worker budget, clamped to `1..=sources.len()`.
    pub max_workers: usize,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            fetch: FetchSettings::default(),
            sources: Source::ALL.to_vec(),
            origins: BTreeMap::new(),
            max_workers: Source::ALL.len(),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: HarvestEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn emit(&self, _event: HarvestEvent) {}
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<HarvestEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<HarvestEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: HarvestEvent) {
        let _ = self.tx.send(event);
    }
}

type Worker = JoinHandle<Result<SourceBatch, CoordinatorError>>;

/// Runs every configured source adapter concurrently and merges the batches.
///
/// Holds no per-harvest state; one instance can serve any number of
/// sequential or concurrent harvests.
pub struct Harvester {
    fetcher: Arc<dyn Fetcher>,
    adapters: Vec<Arc<SourceAdapter>>,
    max_workers: usize,
}

impl Harvester {
    pub fn new(settings: HarvestSettings) -> Result<Self, SetupError> {
        let fetcher = ReqwestFetcher::new(settings.fetch.clone())?;
        Self::with_fetcher(Arc::new(fetcher), &settings)
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn Fetcher>,
        settings: &HarvestSettings,
    ) -> Result<Self, SetupError> {
        let mut adapters: Vec<Arc<SourceAdapter>> = Vec::with_capacity(settings.sources.len());
        for &source in &settings.sources {
            if adapters.iter().any(|adapter| adapter.source() == source) {
                continue;
            }
            let adapter = match settings.origins.get(&source) {
                Some(origin) => SourceAdapter::with_origin(source, origin),
                None => SourceAdapter::new(source),
            }
            .map_err(|error| SetupError::Origin {
                site: source,
                error,
            })?;
            adapters.push(Arc::new(adapter));
        }

        Ok(Self {
            fetcher,
            adapters,
            max_workers: settings.max_workers,
        })
    }

    pub fn sources(&self) -> Vec<Source> {
        self.adapters.iter().map(|adapter| adapter.source()).collect()
    }

    /// Harvest every source for `term` and wait for all of them.
    ///
    /// Batches are merged in completion order. Never fails: adapters absorb
    /// content errors, and a worker that cannot be scheduled or dies is
    /// reported as [`SourceOutcome::Failure`] for its source.
    pub async fn harvest_all(
        &self,
        term: &str,
        cap: Option<usize>,
        sink: &dyn ProgressSink,
    ) -> HarvestReport {
        let term = term.trim();
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(err) => {
                return self.failed_report(term, CoordinatorError::Runtime(err.to_string()), sink)
            }
        };

        let workers = self.max_workers.clamp(1, self.adapters.len().max(1));
        let pool = Arc::new(Semaphore::new(workers));
        engine_info!(
            "Harvest '{}' across {} sources with {} workers",
            term,
            self.adapters.len(),
            workers
        );

        let mut sources = Vec::with_capacity(self.adapters.len());
        let mut handles: Vec<Worker> = Vec::with_capacity(self.adapters.len());
        for adapter in &self.adapters {
            let adapter = Arc::clone(adapter);
            let fetcher = Arc::clone(&self.fetcher);
            let pool = Arc::clone(&pool);
            let owned_term = term.to_string();
            sources.push(adapter.source());
            sink.emit(HarvestEvent::SourceStarted {
                source: adapter.source(),
            });
            handles.push(runtime.spawn(async move {
                let _permit = pool
                    .acquire_owned()
                    .await
                    .map_err(|_| CoordinatorError::PoolClosed)?;
                Ok(adapter.harvest(fetcher.as_ref(), &owned_term, cap).await)
            }));
        }

        let mut report = HarvestReport {
            term: term.to_string(),
            ..HarvestReport::default()
        };
        while !handles.is_empty() {
            let (joined, index, rest) = select_all(handles).await;
            handles = rest;
            // select_all swap-removes the finished handle; mirror it.
            let source = sources.swap_remove(index);

            let outcome = match joined
                .map_err(|err| CoordinatorError::Worker(err.to_string()))
                .and_then(|batch| batch)
            {
                Ok(batch) => {
                    let outcome = SourceOutcome::Success {
                        count: batch.records.len(),
                        fallback: batch.fallback,
                    };
                    report.records.extend(batch.records);
                    outcome
                }
                Err(err) => {
                    engine_error!("{}: {}", source, err);
                    SourceOutcome::Failure {
                        reason: err.to_string(),
                    }
                }
            };
            engine_info!("{}: {}", source, outcome);
            sink.emit(HarvestEvent::SourceCompleted {
                source,
                outcome: outcome.clone(),
            });
            report.outcomes.insert(source, outcome);
        }

        report
    }

    /// [`Harvester::harvest_all`] on a private runtime, for synchronous callers.
    ///
    /// Must not be called from inside an async context.
    pub fn harvest_all_blocking(
        &self,
        term: &str,
        cap: Option<usize>,
        sink: &dyn ProgressSink,
    ) -> HarvestReport {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.adapters.len().max(1))
            .enable_all()
            .build();
        match runtime {
            Ok(runtime) => runtime.block_on(self.harvest_all(term, cap, sink)),
            Err(err) => self.failed_report(term, CoordinatorError::Runtime(err.to_string()), sink),
        }
    }

    fn failed_report(
        &self,
        term: &str,
        error: CoordinatorError,
        sink: &dyn ProgressSink,
    ) -> HarvestReport {
        engine_error!("Harvest '{}' could not start: {}", term, error);
        let mut report = HarvestReport {
            term: term.trim().to_string(),
            ..HarvestReport::default()
        };
        for source in self.sources() {
            let outcome = SourceOutcome::Failure {
                reason: error.to_string(),
            };
            sink.emit(HarvestEvent::SourceCompleted {
                source,
                outcome: outcome.clone(),
            });
            report.outcomes.insert(source, outcome);
        }
        report
    }
}
