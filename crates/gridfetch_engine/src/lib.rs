//! Gridfetch engine: concurrent batch downloads with exactly-once completion.
mod context;
mod engine;
mod fetch;
mod filename;
mod persist;
mod settle;
mod types;

pub use context::{
    CompletionContext, CompletionJob, InlineContext, MainThreadDispatcher, MainThreadQueue,
};
pub use engine::{BatchCoordinator, EngineConfig, EngineError};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::{artifact_filename, artifact_path, ARTIFACT_EXTENSION};
pub use persist::{ensure_output_dir, load_artifact, AtomicFileWriter, PersistError};
pub use settle::{SettlementGuard, SettlementTracker};
pub use types::{
    ArtifactIndex, BatchSummary, FailureKind, FetchError, FetchMetadata, FetchOutcome, FetchOutput,
};

/// Identifies one batch in log output.
pub type BatchId = u64;
