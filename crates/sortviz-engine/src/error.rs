use thiserror::Error;

/// Errors reported by the sort engine and its session wrapper.
///
/// None of these are fatal to the process: a rejected request leaves the
/// engine exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: String,
    },
    #[error("a sort run is already active")]
    ConcurrentRunRejected,
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("sort run cancelled")]
    Cancelled,
    #[error("failed to spawn sort worker: {0}")]
    WorkerSpawn(String),
    #[error("sort worker thread panicked")]
    WorkerPanicked,
}

impl EngineError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, EngineError::Cancelled)
    }
}
