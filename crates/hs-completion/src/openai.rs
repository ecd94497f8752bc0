//! OpenAI-compatible chat-completion client.
//!
//! Works with any server exposing `POST /chat/completions` (LM Studio,
//! llama.cpp server, vLLM, OpenAI itself).

use std::time::Duration;

use async_trait::async_trait;
use hs_protocol::Turn;
use serde::{Deserialize, Serialize};

use crate::config::CompletionConfig;
use crate::error::{CompletionError, CompletionResult};
use crate::model::ChatModel;

/// Chat completion request body.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    temperature: f32,
    max_tokens: u32,
}

/// Chat completion response (only fields we need).
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible completion endpoint.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    config: CompletionConfig,
}

impl OpenAiChatClient {
    pub fn new(config: CompletionConfig) -> CompletionResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::Setup(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ChatModel for OpenAiChatClient {
    async fn complete(&self, turns: &[Turn]) -> CompletionResult<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: turns,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let mut request = self.client.post(self.config.chat_url()).json(&body);
        if !self.config.api_key.is_empty() {
            request = request.bearer_auth(&self.config.api_key);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "completion request failed");
            CompletionError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "completion service returned non-200");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Decode(e.to_string()))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(CompletionError::EmptyResponse)
    }
}
