use crate::{AppState, Effect, Msg, Phase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Start { urls } => {
            // One batch per session; a second start while loading or after
            // completion is ignored.
            if state.phase() != Phase::Idle {
                return (state, Vec::new());
            }
            state.start_loading(urls.clone());
            vec![Effect::StartBatch { urls }]
        }
        Msg::BatchCompleted => {
            if state.phase() == Phase::Loading {
                state.finish_loading();
                vec![Effect::ReloadGrid]
            } else {
                Vec::new()
            }
        }
        Msg::Resized { width } => {
            state.resize(width);
            Vec::new()
        }
        Msg::Tick => {
            if state.phase() == Phase::Loading {
                state.advance_spinner();
            }
            Vec::new()
        }
    };

    (state, effects)
}
