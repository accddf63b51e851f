use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use chrono::Local;
use engine_logging::{engine_debug, engine_error, engine_info};
use jobscout_core::{Effect, HarvestReport, Msg, SearchRequest, SourceOutcome};
use jobscout_engine::{
    export_report, ExportOptions, HarvestEvent, HarvestSettings, Harvester, ProgressSink,
};

/// Timestamp format of export file names, e.g. `20261019_1430`.
const EXPORT_STAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// Runs effects off the main thread and reports back through `Msg`s.
pub(crate) struct EffectRunner {
    harvest: HarvestSettings,
    output_dir: PathBuf,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub(crate) fn new(
        harvest: HarvestSettings,
        output_dir: PathBuf,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        Self {
            harvest,
            output_dir,
            msg_tx,
        }
    }

    pub(crate) fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartHarvest(request) => self.start_harvest(request),
                Effect::ExportResults(report) => self.export(report),
            }
        }
    }

    fn start_harvest(&self, request: SearchRequest) {
        let mut settings = self.harvest.clone();
        if !request.sources.is_empty() {
            settings.sources = request.sources.clone();
            settings.max_workers = settings.sources.len();
        }
        let msg_tx = self.msg_tx.clone();
        let fallback = Msg::HarvestFinished(failed_report(&request, "harvest worker stopped"));

        spawn_worker(self.msg_tx.clone(), fallback, move || {
            let report = match Harvester::new(settings) {
                Ok(harvester) => {
                    let sink = MsgProgressSink { msg_tx };
                    harvester.harvest_all_blocking(&request.term, request.max_results, &sink)
                }
                Err(err) => {
                    engine_error!("Cannot start harvest: {}", err);
                    failed_report(&request, &err.to_string())
                }
            };
            Msg::HarvestFinished(report)
        });
    }

    fn export(&self, report: HarvestReport) {
        let output_dir = self.output_dir.clone();
        let options = ExportOptions {
            stamp: Local::now().format(EXPORT_STAMP_FORMAT).to_string(),
            ..ExportOptions::default()
        };
        let fallback = Msg::ExportFinished(Err("export worker stopped".to_string()));

        spawn_worker(self.msg_tx.clone(), fallback, move || {
            let result = match export_report(&output_dir, &report, &options) {
                Ok(summary) => {
                    engine_info!("Export written to {:?}", summary.csv_path);
                    Ok(summary.csv_path.display().to_string())
                }
                Err(err) => {
                    engine_error!("Export to {:?} failed: {}", output_dir, err);
                    Err(err.to_string())
                }
            };
            Msg::ExportFinished(result)
        });
    }
}

/// Runs `work` on its own thread and sends its message. If `work` panics,
/// `fallback` is sent instead so the message loop still settles.
fn spawn_worker<F>(msg_tx: mpsc::Sender<Msg>, fallback: Msg, work: F)
where
    F: FnOnce() -> Msg + Send + 'static,
{
    thread::spawn(move || {
        let reply = Reply {
            msg_tx,
            fallback: Some(fallback),
        };
        let msg = work();
        reply.send(msg);
    });
}

struct Reply {
    msg_tx: mpsc::Sender<Msg>,
    fallback: Option<Msg>,
}

impl Reply {
    fn send(mut self, msg: Msg) {
        self.fallback = None;
        let _ = self.msg_tx.send(msg);
    }
}

impl Drop for Reply {
    fn drop(&mut self) {
        if let Some(msg) = self.fallback.take() {
            engine_error!("Worker thread died; reporting {:?}", msg);
            let _ = self.msg_tx.send(msg);
        }
    }
}

/// Every requested source fails with `reason`.
fn failed_report(request: &SearchRequest, reason: &str) -> HarvestReport {
    HarvestReport {
        term: request.term.clone(),
        records: Vec::new(),
        outcomes: request
            .sources
            .iter()
            .map(|&source| {
                let outcome = SourceOutcome::Failure {
                    reason: reason.to_string(),
                };
                (source, outcome)
            })
            .collect(),
    }
}

struct MsgProgressSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl ProgressSink for MsgProgressSink {
    fn emit(&self, event: HarvestEvent) {
        match event {
            HarvestEvent::SourceStarted { source } => engine_debug!("{} started", source),
            HarvestEvent::SourceCompleted { source, outcome } => {
                let _ = self.msg_tx.send(Msg::SourceFinished { source, outcome });
            }
        }
    }
}
