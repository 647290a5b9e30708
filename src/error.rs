use thiserror::Error;

/// Error type shared by every fallible operation in the crate.
///
/// The variants map onto the failure classes callers need to tell apart:
/// - `ShapeMismatch` — a caller-supplied vector or dataset disagrees with
///   the network's declared topology.
/// - `OutOfRange`    — an accessor index beyond the declared layer/node/
///   weight bounds.
/// - `Format`        — a persisted model file is malformed or internally
///   inconsistent, or a loss/activation identifier is unknown.
/// - `Domain`        — an activation was evaluated outside its valid
///   domain (notably `relu` at exactly 0).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("index out of range: {0}")]
    OutOfRange(String),

    #[error("model format error: {0}")]
    Format(String),

    #[error("domain error: {0}")]
    Domain(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetworkError>;
