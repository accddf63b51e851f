use std::io::{self, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use anyhow::bail;
use engine_logging::{engine_info, engine_warn};
use jobscout_core::{update, AppState, Msg, SessionState};
use log::LevelFilter;

use crate::cli::Cli;
use crate::effects::EffectRunner;
use crate::render;
use crate::settings::AppSettings;

/// Interval at which the loop wakes up without a message.
const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub(crate) fn run(cli: Cli) -> anyhow::Result<()> {
    let (mut settings, settings_error) = match AppSettings::load(&cli.config) {
        Ok(settings) => (settings, None),
        Err(err) => (AppSettings::default(), Some(err)),
    };
    cli.apply_to(&mut settings);

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    engine_logging::initialize(&settings.log_destination(), level);
    if let Some(err) = settings_error {
        engine_warn!("Using default settings: {:#}", err);
        eprintln!("warning: using default settings: {err:#}");
    }

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(
        settings.harvest_settings(),
        settings.output_dir.clone(),
        msg_tx,
    );
    let mut session = Session::default();

    session.dispatch(Msg::SortChanged(cli.sort), &runner);
    session.dispatch(Msg::FilterChanged(cli.filter()), &runner);
    let request = cli.request(&settings);
    engine_info!(
        "Searching '{}' on {} sources",
        request.term,
        request.sources.len()
    );
    session.dispatch(Msg::SearchSubmitted(request), &runner);
    if session.state.session() == SessionState::Idle {
        bail!("no search was started");
    }

    while !session.state.is_settled() {
        let msg = match msg_rx.recv_timeout(TICK_INTERVAL) {
            Ok(msg) => msg,
            Err(RecvTimeoutError::Timeout) => Msg::Tick,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        session.dispatch(msg, &runner);
    }

    let view = session.state.view();
    let mut out = io::stdout().lock();
    for line in render::render_results(&view) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[derive(Default)]
struct Session {
    state: AppState,
    notices_seen: usize,
}

impl Session {
    fn dispatch(&mut self, msg: Msg, runner: &EffectRunner) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        runner.enqueue(effects);

        if self.state.consume_dirty() {
            let view = self.state.view();
            for notice in render::new_notices(&view, &mut self.notices_seen) {
                eprintln!("{notice}");
            }
        }
    }
}
