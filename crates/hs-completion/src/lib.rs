//! Completion client for Hearthside.
//!
//! Wraps an OpenAI-compatible chat endpoint behind the `ChatModel` trait
//! and layers the two conversation operations the router needs on top:
//! `classify` (pick a directive) and `generate` (produce its payload).
//! Both append the model's reply to the transcript they are given.

pub mod client;
pub mod config;
pub mod error;
pub mod mock;
pub mod model;
pub mod openai;

pub use client::{CLASSIFY_REMINDER, CompletionClient};
pub use config::CompletionConfig;
pub use error::{CompletionError, CompletionResult};
pub use mock::ScriptedModel;
pub use model::ChatModel;
pub use openai::OpenAiChatClient;
