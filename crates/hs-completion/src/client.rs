//! Transcript-level completion operations.

use hs_protocol::{DirectiveTemplate, Transcript};

use crate::error::CompletionResult;
use crate::model::ChatModel;

/// Instruction appended as a user turn before every classification
/// request. It stays in the transcript, so later requests carry every
/// earlier reminder.
pub const CLASSIFY_REMINDER: &str =
    "FOLLOW THE SYSTEM MESSAGE. OUTPUT ONLY ONE WORD: QUERY, FOLLOWUP, ANSWER OR ACTION.";

/// Classify/generate on top of a `ChatModel`.
pub struct CompletionClient<'a> {
    model: &'a dyn ChatModel,
}

impl<'a> CompletionClient<'a> {
    pub fn new(model: &'a dyn ChatModel) -> Self {
        Self { model }
    }

    /// Ask the model which directive the conversation calls for.
    ///
    /// Appends `CLASSIFY_REMINDER` as a user turn, sends the transcript,
    /// appends the reply as an assistant turn and returns it trimmed. On
    /// failure the reminder stays in the transcript.
    pub async fn classify(&self, transcript: &mut Transcript) -> CompletionResult<String> {
        transcript.push_user(CLASSIFY_REMINDER);
        let reply = self.model.complete(transcript.turns()).await?;
        Ok(record(transcript, reply))
    }

    /// Ask the model for a directive's payload.
    ///
    /// Appends `template` rendered with `input` as a user turn, sends the
    /// transcript, appends the reply as an assistant turn and returns it
    /// trimmed. On failure the user turn stays in the transcript.
    pub async fn generate(
        &self,
        transcript: &mut Transcript,
        template: &DirectiveTemplate,
        input: &str,
    ) -> CompletionResult<String> {
        transcript.push_user(template.render(input));
        let reply = self.model.complete(transcript.turns()).await?;
        Ok(record(transcript, reply))
    }
}

fn record(transcript: &mut Transcript, reply: String) -> String {
    let reply = reply.trim().to_string();
    transcript.push_assistant(reply.clone());
    reply
}
