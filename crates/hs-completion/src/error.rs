//! Completion service error types.

use thiserror::Error;

/// Errors that can occur while calling the completion service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("completion service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("completion service returned no message")]
    EmptyResponse,

    #[error("client setup error: {0}")]
    Setup(String),
}

/// Convenience alias for completion results.
pub type CompletionResult<T> = Result<T, CompletionError>;
