use std::path::PathBuf;
use std::sync::{mpsc, Arc};

use engine_logging::{engine_error, engine_info};
use gridfetch_core::{Effect, Msg};
use gridfetch_engine::{BatchCoordinator, CompletionContext};

/// Executes core effects against the download engine.
pub struct EffectRunner {
    coordinator: BatchCoordinator,
    image_dir: PathBuf,
    context: Arc<dyn CompletionContext>,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    /// `context` decides where the completion lands; the app passes its
    /// main-thread queue so `Msg::BatchCompleted` is produced there.
    pub fn new(
        coordinator: BatchCoordinator,
        image_dir: PathBuf,
        context: Arc<dyn CompletionContext>,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        Self {
            coordinator,
            image_dir,
            context,
            msg_tx,
        }
    }

    /// Returns whether the grid has to be re-read from storage.
    pub fn enqueue(&self, effects: Vec<Effect>) -> bool {
        let mut reload = false;
        for effect in effects {
            match effect {
                Effect::StartBatch { urls } => {
                    engine_info!(
                        "StartBatch count={} dir={:?}",
                        urls.len(),
                        self.image_dir
                    );
                    let msg_tx = self.msg_tx.clone();
                    let started = self.coordinator.run(
                        urls,
                        self.image_dir.clone(),
                        self.context.clone(),
                        move || {
                            let _ = msg_tx.send(Msg::BatchCompleted);
                        },
                    );
                    // The completion still fires when the engine is gone.
                    if let Err(err) = started {
                        engine_error!("Failed to start batch: {}", err);
                    }
                }
                Effect::ReloadGrid => reload = true,
            }
        }
        reload
    }

    pub fn shutdown(self) -> anyhow::Result<()> {
        self.coordinator.shutdown()?;
        Ok(())
    }
}
