use std::time::Duration;
use thiserror::Error;

/// Typed failures of the host-facing surfaces: configuration lookup and
/// corpus loading.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("corpus error: {0}")]
    Corpus(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failures reported by the classification oracle, split by retryability.
///
/// `Transient` covers overload and rate-limit style responses; callers may
/// retry with backoff, honoring `retry_after` when the service supplied one.
/// `Permanent` covers malformed requests and unknown targets; retrying
/// cannot help and callers must surface the failure immediately.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("transient oracle failure: {message}")]
    Transient {
        message: String,
        retry_after: Option<Duration>,
    },

    #[error("permanent oracle failure: {message}")]
    Permanent { message: String },
}

impl OracleError {
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient { message: message.into(), retry_after: None }
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        Self::Permanent { message: message.into() }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}
