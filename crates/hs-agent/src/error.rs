//! Agent error types.

use hs_completion::CompletionError;
use hs_gateway::GatewayError;
use thiserror::Error;

/// Errors surfaced by the intent router.
///
/// None of these end a session except `Startup`, which is only produced
/// before the router exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed action payload {segment:?}: {reason}")]
    MalformedActionPayload { segment: String, reason: String },

    #[error("query returned no usable result")]
    EmptyQueryResult,

    #[error("startup failed: {0}")]
    Startup(String),
}

impl From<GatewayError> for AgentError {
    fn from(e: GatewayError) -> Self {
        AgentError::Transport(e.to_string())
    }
}

impl From<CompletionError> for AgentError {
    fn from(e: CompletionError) -> Self {
        AgentError::Transport(e.to_string())
    }
}

/// Convenience alias for agent results.
pub type AgentResult<T> = Result<T, AgentError>;
