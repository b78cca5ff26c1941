//! Exactly-once completion for a batch of concurrent operations.
//!
//! A batch of N operations is represented by N [`SettlementGuard`]s. Each
//! guard releases its unit of work when dropped, so an operation settles on
//! every exit path: normal return, early return, or unwinding panic. The
//! guard that takes the outstanding count from 1 to 0 dispatches the
//! completion callback onto the batch's [`CompletionContext`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use engine_logging::{engine_info, engine_warn};

use crate::context::{CompletionContext, CompletionJob};
use crate::{ArtifactIndex, BatchId, BatchSummary};

pub struct SettlementTracker {
    batch_id: BatchId,
    total: usize,
    remaining: AtomicUsize,
    succeeded: AtomicUsize,
    on_complete: Mutex<Option<CompletionJob>>,
    context: Arc<dyn CompletionContext>,
}

impl SettlementTracker {
    /// Creates the tracker for a batch of `count` operations and returns one
    /// guard per operation, in index order.
    ///
    /// With `count == 0` the completion is dispatched before this returns.
    pub fn guards(
        batch_id: BatchId,
        count: usize,
        context: Arc<dyn CompletionContext>,
        on_complete: CompletionJob,
    ) -> Vec<SettlementGuard> {
        let tracker = Arc::new(Self {
            batch_id,
            total: count,
            remaining: AtomicUsize::new(count),
            succeeded: AtomicUsize::new(0),
            on_complete: Mutex::new(Some(on_complete)),
            context,
        });

        if count == 0 {
            tracker.complete();
            return Vec::new();
        }

        (0..count)
            .map(|index| SettlementGuard {
                tracker: tracker.clone(),
                index,
                succeeded: false,
            })
            .collect()
    }

    pub fn batch_id(&self) -> BatchId {
        self.batch_id
    }

    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }

    pub fn summary(&self) -> BatchSummary {
        let remaining = self.remaining();
        let succeeded = self.succeeded.load(Ordering::Acquire);
        BatchSummary {
            total: self.total,
            succeeded,
            failed: (self.total - remaining).saturating_sub(succeeded),
        }
    }

    fn release(&self, succeeded: bool) {
        if succeeded {
            self.succeeded.fetch_add(1, Ordering::Relaxed);
        }
        // AcqRel: the last releaser must observe every sibling's writes.
        if self.remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.complete();
        }
    }

    fn complete(&self) {
        let summary = self.summary();
        engine_info!(
            "batch {} settled: {} of {} stored, {} failed",
            self.batch_id,
            summary.succeeded,
            summary.total,
            summary.failed
        );

        let job = self
            .on_complete
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match job {
            Some(job) => self.context.dispatch(job),
            None => engine_warn!("batch {} completed twice", self.batch_id),
        }
    }
}

/// One outstanding unit of work. Dropping it settles the operation.
pub struct SettlementGuard {
    tracker: Arc<SettlementTracker>,
    index: ArtifactIndex,
    succeeded: bool,
}

impl SettlementGuard {
    pub fn index(&self) -> ArtifactIndex {
        self.index
    }

    pub fn tracker(&self) -> &SettlementTracker {
        &self.tracker
    }

    /// Records that the artifact for this index was stored.
    pub fn mark_succeeded(&mut self) {
        self.succeeded = true;
    }
}

impl Drop for SettlementGuard {
    fn drop(&mut self) {
        self.tracker.release(self.succeeded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InlineContext;
    use std::sync::Barrier;
    use std::thread;

    fn counting_callback() -> (Arc<AtomicUsize>, CompletionJob) {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let job: CompletionJob = Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (fired, job)
    }

    #[test]
    fn empty_batch_completes_immediately() {
        let (fired, job) = counting_callback();
        let guards = SettlementTracker::guards(1, 0, Arc::new(InlineContext), job);
        assert!(guards.is_empty());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn completes_only_after_last_guard() {
        let (fired, job) = counting_callback();
        let mut guards = SettlementTracker::guards(2, 3, Arc::new(InlineContext), job);
        assert_eq!(
            guards.iter().map(SettlementGuard::index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );

        let last = guards.pop().unwrap();
        drop(guards);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(last.tracker().remaining(), 1);

        drop(last);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn summary_counts_successes_and_failures() {
        let (_fired, job) = counting_callback();
        let mut guards = SettlementTracker::guards(3, 3, Arc::new(InlineContext), job);
        guards[0].mark_succeeded();
        guards[2].mark_succeeded();
        let observer = guards.pop().unwrap();
        drop(guards);

        let summary = observer.tracker().summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn simultaneous_release_fires_once() {
        const N: usize = 64;
        for round in 0..50 {
            let (fired, job) = counting_callback();
            let guards = SettlementTracker::guards(round, N, Arc::new(InlineContext), job);
            let barrier = Arc::new(Barrier::new(N));

            let handles: Vec<_> = guards
                .into_iter()
                .map(|guard| {
                    let barrier = barrier.clone();
                    thread::spawn(move || {
                        barrier.wait();
                        drop(guard);
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(fired.load(Ordering::SeqCst), 1, "round {round}");
        }
    }

    #[test]
    fn panicking_operation_still_settles() {
        let (fired, job) = counting_callback();
        let mut guards = SettlementTracker::guards(4, 1, Arc::new(InlineContext), job);
        let guard = guards.pop().unwrap();

        let result = thread::spawn(move || {
            let _guard = guard;
            panic!("operation blew up");
        })
        .join();

        assert!(result.is_err());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
