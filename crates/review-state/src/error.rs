//! Error types shared by the review state crate and its adapters.

use thiserror::Error;

/// Result alias used across the crate
pub type ReviewResult<T> = Result<T, ReviewError>;

/// Failures raised by storage, transport and payload handling.
///
/// None of these are surfaced to the user by the selection subsystem;
/// callers log them and continue from whatever state is available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("request timed out after {0} ms")]
    Timeout(u64),
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for ReviewError {
    fn from(err: serde_json::Error) -> Self {
        ReviewError::Malformed(err.to_string())
    }
}
