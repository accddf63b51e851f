use crate::{AppState, Effect, Msg, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchSubmitted(mut request) => {
            request.term = request.term.trim().to_string();
            if request.term.is_empty() {
                state.push_notice("Please enter a job title to search.");
                return (state, Vec::new());
            }
            if state.session() == SessionState::Harvesting {
                return (state, Vec::new());
            }
            state.start_harvest(request.clone());
            vec![Effect::StartHarvest(request)]
        }
        Msg::SourceFinished { source, outcome } => {
            if state.session() == SessionState::Harvesting {
                state.record_outcome(source, outcome);
            }
            Vec::new()
        }
        Msg::HarvestFinished(report) => {
            if state.session() != SessionState::Harvesting {
                return (state, Vec::new());
            }
            state
                .finish_harvest(report)
                .map(Effect::ExportResults)
                .into_iter()
                .collect()
        }
        Msg::ExportFinished(result) => {
            state.finish_export(result);
            Vec::new()
        }
        Msg::SortChanged(sort) => {
            state.set_sort(sort);
            Vec::new()
        }
        Msg::FilterChanged(filter) => {
            state.set_filter(filter);
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}
