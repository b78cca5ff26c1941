//! Execution contexts that receive a batch's completion callback.
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use engine_logging::engine_warn;

pub type CompletionJob = Box<dyn FnOnce() + Send + 'static>;

/// Where a completion callback runs. Implementations must run each job at
/// most once and must not block the caller of `dispatch` for long; it is
/// called from an engine worker.
pub trait CompletionContext: Send + Sync {
    fn dispatch(&self, job: CompletionJob);
}

/// Runs the job immediately on whichever worker settled the batch last.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineContext;

impl CompletionContext for InlineContext {
    fn dispatch(&self, job: CompletionJob) {
        job();
    }
}

/// Job queue owned by a single thread (typically the UI or main thread).
///
/// Hand [`MainThreadQueue::dispatcher`] to the engine and drain the queue
/// from the owning thread with [`run_next_timeout`](Self::run_next_timeout).
pub struct MainThreadQueue {
    tx: mpsc::Sender<CompletionJob>,
    rx: mpsc::Receiver<CompletionJob>,
}

impl MainThreadQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn dispatcher(&self) -> Arc<MainThreadDispatcher> {
        Arc::new(MainThreadDispatcher {
            tx: self.tx.clone(),
        })
    }

    /// Waits up to `timeout` for one job and runs it.
    pub fn run_next_timeout(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(job) => {
                job();
                true
            }
            Err(_) => false,
        }
    }
}

impl Default for MainThreadQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half of a [`MainThreadQueue`].
#[derive(Clone)]
pub struct MainThreadDispatcher {
    tx: mpsc::Sender<CompletionJob>,
}

impl CompletionContext for MainThreadDispatcher {
    fn dispatch(&self, job: CompletionJob) {
        if self.tx.send(job).is_err() {
            engine_warn!("completion dropped: main thread queue is gone");
        }
    }
}
