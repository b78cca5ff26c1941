use std::fmt;

use bytes::Bytes;

/// Position of a url within its batch; doubles as the artifact storage key.
pub type ArtifactIndex = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Bytes,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

/// Result of a single fetch. Ephemeral; consumed by the coordinator.
pub type FetchOutcome = Result<FetchOutput, FetchError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

/// Why one url of a batch produced no artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// DNS, connect, timeout, malformed url or a broken body stream.
    Transport,
    /// Transport succeeded but the status was outside 200..=299.
    HttpStatus(u16),
    /// Acceptable status with nothing in the body.
    EmptyBody,
    /// The bytes arrived but could not be stored.
    Write,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport error"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::EmptyBody => write!(f, "empty body"),
            FailureKind::Write => write!(f, "write error"),
        }
    }
}

/// Per-batch tally, logged when the batch completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}
