use async_trait::async_trait;
use hs_protocol::Turn;

use crate::error::CompletionResult;

/// A chat model that answers an ordered list of turns with the next
/// assistant utterance.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, turns: &[Turn]) -> CompletionResult<String>;
}
