//! Operator console: where input comes from and outcomes go.

use std::fmt;
use std::io::Write;

use async_trait::async_trait;
use hs_protocol::{ActionCommand, DirectiveKind};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::error::AgentError;

/// Everything the router reports to the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum RouterEvent {
    /// Raw classifier reply and the directive it resolved to.
    Classified { reply: String, kind: DirectiveKind },
    /// Raw generation reply.
    Generated { kind: DirectiveKind, text: String },
    /// FOLLOWUP question or ANSWER text for the operator.
    Reply { kind: DirectiveKind, text: String },
    /// An intent call went through.
    ActionDone {
        command: ActionCommand,
        result: serde_json::Value,
    },
    /// An intent call was rejected or never arrived.
    ActionFailed {
        command: ActionCommand,
        error: AgentError,
    },
    /// Query result that will be fed back as the next turn.
    QueryResult(String),
    /// A recoverable failure in the current cycle.
    Failed(AgentError),
    /// The session is over.
    Exiting,
}

impl fmt::Display for RouterEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterEvent::Classified { reply, kind } => {
                write!(f, "Model response: {reply} (-> {kind})")
            }
            RouterEvent::Generated { kind, text } => write!(f, "Model {kind}: {text}"),
            RouterEvent::Reply { text, .. } => write!(f, "Assistant: {text}"),
            RouterEvent::ActionDone { command, result } => {
                write!(f, "Action {} sent successfully: {result}", command.name)
            }
            RouterEvent::ActionFailed { command, error } => {
                write!(f, "Action {} failed: {error}", command.name)
            }
            RouterEvent::QueryResult(text) => write!(f, "Query result: {text}"),
            RouterEvent::Failed(error) => write!(f, "Error: {error}"),
            RouterEvent::Exiting => f.write_str("Exiting the conversation."),
        }
    }
}

/// Line-oriented operator interface.
#[async_trait]
pub trait Console: Send {
    /// Next line from the operator, or `None` once input is closed.
    async fn read_line(&mut self) -> Option<String>;

    /// Report an event to the operator.
    fn show(&mut self, event: &RouterEvent);
}

/// Consecutive read errors after which input counts as closed.
const MAX_READ_ERRORS: u32 = 3;

/// Console that reads lines from `R` and prints to stdout.
pub struct LineConsole<R> {
    lines: Lines<R>,
    prompt: String,
}

/// Console on the process's stdin/stdout.
pub type StdConsole = LineConsole<BufReader<Stdin>>;

impl<R: AsyncBufRead + Unpin> LineConsole<R> {
    pub fn from_reader(reader: R, prompt: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            prompt: prompt.into(),
        }
    }
}

impl StdConsole {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()), prompt)
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new("User: ")
    }
}

#[async_trait]
impl<R> Console for LineConsole<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    /// An unreadable line (e.g. invalid UTF-8) is logged and the operator
    /// is asked again.
    async fn read_line(&mut self) -> Option<String> {
        let mut errors = 0;
        loop {
            print!("{}", self.prompt);
            let _ = std::io::stdout().flush();
            match self.lines.next_line().await {
                Ok(line) => return line,
                Err(e) => {
                    errors += 1;
                    tracing::warn!(error = %e, errors, "failed to read operator input");
                    if errors >= MAX_READ_ERRORS {
                        tracing::warn!("operator input keeps failing, treating it as closed");
                        return None;
                    }
                }
            }
        }
    }

    fn show(&mut self, event: &RouterEvent) {
        println!("{event}");
    }
}
