use std::io::Write;
use std::sync::mpsc;
use std::time::Duration;

use gridfetch_core::{update, AppState, CellLayout, Msg, Phase};
use gridfetch_engine::{BatchCoordinator, MainThreadQueue};

use super::effects::EffectRunner;
use super::render::{self, GridReport};
use super::settings::SessionSettings;

/// Frame interval of the presentation loop.
const TICK: Duration = Duration::from_millis(75);

/// Runs one download session on the calling thread, which plays the role of
/// the UI thread: it animates the loading line, receives the batch completion
/// through its own queue, and draws the grid once.
pub fn run_session(
    settings: &SessionSettings,
    urls: Vec<String>,
    coordinator: BatchCoordinator,
    out: &mut dyn Write,
) -> anyhow::Result<GridReport> {
    let queue = MainThreadQueue::new();
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(
        coordinator,
        settings.output_dir.clone(),
        queue.dispatcher(),
        msg_tx.clone(),
    );

    let mut state = AppState::with_layout(CellLayout::new(settings.columns), settings.view_width);
    let _ = msg_tx.send(Msg::Start { urls });

    loop {
        queue.run_next_timeout(TICK);
        let _ = msg_tx.send(Msg::Tick);

        let mut report = None;
        while let Ok(msg) = msg_rx.try_recv() {
            let (next, effects) = update(std::mem::take(&mut state), msg);
            state = next;
            let reload = runner.enqueue(effects);
            let was_dirty = state.consume_dirty();

            if reload {
                report = Some(render::render_grid(out, &state.view(), &settings.output_dir)?);
            } else if was_dirty && state.phase() == Phase::Loading {
                render::render_loading(out, &state.view())?;
            }
        }

        if let Some(report) = report {
            runner.shutdown()?;
            return Ok(report);
        }
    }
}
