use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use bytes::Bytes;
use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use thiserror::Error;
use tokio::runtime::Runtime;
use tokio::sync::Semaphore;
use tokio_util::task::TaskTracker;

use crate::context::CompletionContext;
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::filename::artifact_filename;
use crate::persist::{ensure_output_dir, AtomicFileWriter};
use crate::settle::{SettlementGuard, SettlementTracker};
use crate::{ArtifactIndex, BatchId, FailureKind, FetchError};

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub fetch: FetchSettings,
    /// Cap on fetches in flight across all batches. `None` is unbounded.
    pub max_concurrent: Option<usize>,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine: {0}")]
    Startup(#[source] io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
    #[error("engine has shut down")]
    Stopped,
    #[error("engine worker panicked")]
    WorkerPanicked,
}

struct BatchCommand {
    batch_id: BatchId,
    urls: Vec<String>,
    destination: PathBuf,
    guards: Vec<SettlementGuard>,
}

/// Fans each batch out to one task per url on a runtime owned by a dedicated
/// engine thread. [`run`](Self::run) only enqueues; it never waits on I/O.
pub struct BatchCoordinator {
    cmd_tx: mpsc::Sender<BatchCommand>,
    worker: JoinHandle<()>,
    next_batch_id: AtomicU64,
}

impl BatchCoordinator {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let fetcher = ReqwestFetcher::new(config.fetch.clone())?;
        Self::with_fetcher(Arc::new(fetcher), config)
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>, config: EngineConfig) -> Result<Self, EngineError> {
        let runtime = build_runtime().map_err(EngineError::Startup)?;
        let limiter = config
            .max_concurrent
            .map(|permits| Arc::new(Semaphore::new(permits.max(1))));
        let (cmd_tx, cmd_rx) = mpsc::channel::<BatchCommand>();

        let worker = thread::Builder::new()
            .name("gridfetch-engine".to_string())
            .spawn(move || {
                let tasks = TaskTracker::new();
                while let Ok(command) = cmd_rx.recv() {
                    launch_batch(&runtime, &tasks, &fetcher, &limiter, command);
                }
                // Accepted batches always run to full settlement.
                tasks.close();
                runtime.block_on(tasks.wait());
                engine_debug!("engine thread exiting");
            })
            .map_err(EngineError::Startup)?;

        Ok(Self {
            cmd_tx,
            worker,
            next_batch_id: AtomicU64::new(1),
        })
    }

    /// Starts a batch and returns immediately.
    ///
    /// The url at position `i` is stored as `destination/{i}.jpg` when it
    /// succeeds. `on_complete` is dispatched onto `context` exactly once,
    /// after every url has settled; for an empty batch that happens before
    /// this returns. If the engine is gone the call fails with
    /// [`EngineError::Stopped`] and `on_complete` still fires.
    pub fn run<F>(
        &self,
        urls: Vec<String>,
        destination: impl Into<PathBuf>,
        context: Arc<dyn CompletionContext>,
        on_complete: F,
    ) -> Result<BatchId, EngineError>
    where
        F: FnOnce() + Send + 'static,
    {
        let batch_id = self.next_batch_id.fetch_add(1, Ordering::Relaxed);
        let guards = SettlementTracker::guards(batch_id, urls.len(), context, Box::new(on_complete));
        if guards.is_empty() {
            engine_info!("batch {} is empty; completed immediately", batch_id);
            return Ok(batch_id);
        }

        let command = BatchCommand {
            batch_id,
            urls,
            destination: destination.into(),
            guards,
        };
        // On failure the command, and with it every guard, is dropped here.
        self.cmd_tx.send(command).map_err(|_| EngineError::Stopped)?;
        Ok(batch_id)
    }

    /// Stops accepting batches and blocks until every accepted batch has
    /// settled.
    pub fn shutdown(self) -> Result<(), EngineError> {
        let Self { cmd_tx, worker, .. } = self;
        drop(cmd_tx);
        worker.join().map_err(|_| EngineError::WorkerPanicked)
    }
}

fn build_runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("gridfetch-worker")
        .build()
}

fn launch_batch(
    runtime: &Runtime,
    tasks: &TaskTracker,
    fetcher: &Arc<dyn Fetcher>,
    limiter: &Option<Arc<Semaphore>>,
    command: BatchCommand,
) {
    let BatchCommand {
        batch_id,
        urls,
        destination,
        guards,
    } = command;
    engine_info!(
        "batch {} started: {} urls -> {:?}",
        batch_id,
        urls.len(),
        destination
    );

    // Checked once here; items only stage and rename their own file.
    let destination = match ensure_output_dir(&destination) {
        Ok(()) => Ok(Arc::<Path>::from(destination)),
        Err(err) => {
            engine_error!("batch {} cannot store artifacts: {}", batch_id, err);
            Err(FetchError::new(FailureKind::Write, err.to_string()))
        }
    };

    for (guard, url) in guards.into_iter().zip(urls) {
        tasks.spawn_on(
            settle_one(
                fetcher.clone(),
                limiter.clone(),
                url,
                destination.clone(),
                guard,
            ),
            runtime.handle(),
        );
    }
}

/// Fetches and stores one url. `guard` is dropped on every exit path,
/// including a panic in the fetcher, which settles this operation.
async fn settle_one(
    fetcher: Arc<dyn Fetcher>,
    limiter: Option<Arc<Semaphore>>,
    url: String,
    destination: Result<Arc<Path>, FetchError>,
    mut guard: SettlementGuard,
) {
    let batch_id = guard.tracker().batch_id();
    let index = guard.index();

    let permit = match limiter.as_deref() {
        Some(semaphore) => semaphore.acquire().await.ok(),
        None => None,
    };
    let fetched = fetcher.fetch(&url).await;
    drop(permit);

    let output = match fetched {
        Ok(output) => output,
        Err(err) => {
            engine_warn!("batch {} item {} ({}) failed: {}", batch_id, index, url, err);
            return;
        }
    };

    let written = match destination {
        Ok(dir) => write_artifact(dir, index, output.bytes).await,
        Err(err) => Err(err),
    };
    match written {
        Ok(path) => {
            engine_debug!(
                "batch {} item {} stored {} bytes at {:?}",
                batch_id,
                index,
                output.metadata.byte_len,
                path
            );
            guard.mark_succeeded();
        }
        Err(err) => {
            engine_warn!("batch {} item {} ({}) failed: {}", batch_id, index, url, err);
        }
    }
}

async fn write_artifact(
    dir: Arc<Path>,
    index: ArtifactIndex,
    bytes: Bytes,
) -> Result<PathBuf, FetchError> {
    let written = tokio::task::spawn_blocking(move || {
        AtomicFileWriter::new(dir.to_path_buf()).write(&artifact_filename(index), &bytes)
    })
    .await
    .map_err(|err| FetchError::new(FailureKind::Write, err.to_string()))?;
    written.map_err(|err| FetchError::new(FailureKind::Write, err.to_string()))
}
