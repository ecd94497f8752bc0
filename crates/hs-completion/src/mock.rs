//! Scripted chat model for testing: replays canned replies in order.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use hs_protocol::Turn;

use crate::error::{CompletionError, CompletionResult};
use crate::model::ChatModel;

/// A `ChatModel` that answers from a queue and records every request.
///
/// Once the queue is empty every call fails with a transport error, so
/// a test that makes more calls than it scripted fails loudly.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<CompletionResult<String>>>,
    requests: Mutex<Vec<Vec<Turn>>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Build from a list of successful replies.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let m = Self::new();
        for r in replies {
            m.push_reply(r);
        }
        m
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub fn push_failure(&self, error: CompletionError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<Vec<Turn>> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Replies still waiting to be served.
    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

impl Default for ScriptedModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, turns: &[Turn]) -> CompletionResult<String> {
        self.requests.lock().unwrap().push(turns.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::Transport("script exhausted".into())))
    }
}
