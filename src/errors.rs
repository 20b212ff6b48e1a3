use thiserror::Error;

/// Failures of the file-backed store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but does not hold a JSON string map.
    #[error("storage format error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A refused playback-start attempt, e.g. the host's autoplay policy.
///
/// Only ever observed through the play outcome callback; the persister logs
/// the refusal and moves on without retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("playback start rejected: {0}")]
pub struct PlayRejected(pub String);
