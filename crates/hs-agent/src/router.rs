//! Intent router: the classify → generate → dispatch loop.
//!
//! Each cycle takes one input (typed by the operator, or the result of the
//! previous QUERY), asks the model which directive applies, asks it again
//! for that directive's payload, and routes the payload:
//! - ACTION → one gateway `execute` per command, in response order
//! - QUERY → gateway `query`; a non-empty result becomes the next input
//! - FOLLOWUP / ANSWER → shown to the operator

use hs_completion::{ChatModel, CompletionClient};
use hs_gateway::Gateway;
use hs_protocol::{DirectiveKind, Transcript};
use tracing::Instrument;

use crate::actions;
use crate::catalog::DirectiveCatalog;
use crate::config::SessionConfig;
use crate::console::{Console, RouterEvent};
use crate::error::{AgentError, AgentResult};

/// Where the router is in its cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterState {
    /// Next input comes from the operator.
    AwaitingUserInput,
    /// Next input is this query result; the operator is not prompted.
    AwaitingQueryFeedback(String),
    Classifying,
    Dispatching,
    Terminated,
}

/// Owns the conversation and drives one cycle at a time.
pub struct IntentRouter<'a> {
    gateway: &'a dyn Gateway,
    completion: CompletionClient<'a>,
    catalog: &'a DirectiveCatalog,
    exit_keywords: Vec<String>,
    transcript: Transcript,
    state: RouterState,
    cycles: u64,
}

impl<'a> IntentRouter<'a> {
    pub fn new(
        gateway: &'a dyn Gateway,
        model: &'a dyn ChatModel,
        catalog: &'a DirectiveCatalog,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            completion: CompletionClient::new(model),
            catalog,
            exit_keywords: SessionConfig::default().exit_keywords,
            transcript: Transcript::new(system_prompt),
            state: RouterState::AwaitingUserInput,
            cycles: 0,
        }
    }

    /// Replace the default exit keywords (`exit`, `bye`, `end`).
    pub fn with_exit_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exit_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn state(&self) -> &RouterState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Number of cycles that reached classification.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn is_exit_keyword(&self, input: &str) -> bool {
        let input = input.trim();
        self.exit_keywords
            .iter()
            .any(|k| input.eq_ignore_ascii_case(k))
    }

    /// Run cycles until the session terminates.
    pub async fn run(&mut self, console: &mut dyn Console) {
        while self.state != RouterState::Terminated {
            self.step(console).await;
        }
        tracing::info!(cycles = self.cycles, "conversation ended");
    }

    /// Run a single cycle and return the state it left the router in.
    pub async fn step(&mut self, console: &mut dyn Console) -> &RouterState {
        let input = match std::mem::replace(&mut self.state, RouterState::AwaitingUserInput) {
            RouterState::Terminated => {
                self.state = RouterState::Terminated;
                return &self.state;
            }
            RouterState::AwaitingQueryFeedback(result) => {
                tracing::debug!("feeding query result back as input");
                result
            }
            _ => match console.read_line().await {
                None => {
                    tracing::info!("operator input closed");
                    return self.terminate(console);
                }
                Some(line) if self.is_exit_keyword(&line) => return self.terminate(console),
                Some(line) if line.trim().is_empty() => return &self.state,
                Some(line) => line,
            },
        };

        self.cycles += 1;
        let span = tracing::info_span!("cycle", n = self.cycles);
        let next = match self.run_cycle(&input, console).instrument(span).await {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!(error = %e, "cycle aborted");
                console.show(&RouterEvent::Failed(e));
                RouterState::AwaitingUserInput
            }
        };
        self.state = next;
        &self.state
    }

    fn terminate(&mut self, console: &mut dyn Console) -> &RouterState {
        console.show(&RouterEvent::Exiting);
        self.state = RouterState::Terminated;
        &self.state
    }

    async fn run_cycle(
        &mut self,
        input: &str,
        console: &mut dyn Console,
    ) -> AgentResult<RouterState> {
        self.transcript.push_user(input);

        self.state = RouterState::Classifying;
        let reply = self.completion.classify(&mut self.transcript).await?;
        let kind = DirectiveKind::from_classifier_reply(&reply);
        tracing::info!(reply = %reply, kind = %kind, "classified");
        console.show(&RouterEvent::Classified { reply, kind });

        let spec = self.catalog.get(kind);
        let payload = self
            .completion
            .generate(&mut self.transcript, &spec.template, input)
            .await?;
        console.show(&RouterEvent::Generated {
            kind,
            text: payload.clone(),
        });

        self.state = RouterState::Dispatching;
        let next = match kind {
            DirectiveKind::Action => {
                self.dispatch_actions(&payload, console).await;
                RouterState::AwaitingUserInput
            }
            DirectiveKind::Query => self.dispatch_query(&payload, console).await,
            DirectiveKind::Followup | DirectiveKind::Answer => {
                console.show(&RouterEvent::Reply {
                    kind,
                    text: payload,
                });
                RouterState::AwaitingUserInput
            }
        };
        Ok(next)
    }

    async fn dispatch_actions(&self, payload: &str, console: &mut dyn Console) {
        let mut sent = 0usize;
        let mut failed = 0usize;

        for item in actions::payloads(payload) {
            let command = match item {
                Ok(command) => command,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed action segment");
                    failed += 1;
                    console.show(&RouterEvent::Failed(e));
                    continue;
                }
            };

            match self.gateway.execute(&command).await {
                Ok(result) => {
                    sent += 1;
                    tracing::info!(intent = %command.name, target = ?command.target(), "action sent");
                    console.show(&RouterEvent::ActionDone { command, result });
                }
                Err(e) => {
                    failed += 1;
                    tracing::warn!(intent = %command.name, error = %e, "action failed");
                    console.show(&RouterEvent::ActionFailed {
                        command,
                        error: e.into(),
                    });
                }
            }
        }

        tracing::info!(sent, failed, "action dispatch complete");
    }

    async fn dispatch_query(&self, template: &str, console: &mut dyn Console) -> RouterState {
        match self.gateway.query(template).await {
            Ok(result) if !result.trim().is_empty() => {
                tracing::info!(len = result.len(), "query succeeded");
                console.show(&RouterEvent::QueryResult(result.clone()));
                RouterState::AwaitingQueryFeedback(result)
            }
            Ok(_) => {
                tracing::warn!("query returned empty result");
                console.show(&RouterEvent::Failed(AgentError::EmptyQueryResult));
                RouterState::AwaitingUserInput
            }
            Err(e) => {
                tracing::warn!(error = %e, "query failed");
                console.show(&RouterEvent::Failed(e.into()));
                RouterState::AwaitingUserInput
            }
        }
    }
}
