use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the raw user input when a generation
/// template is rendered.
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// The four response kinds the classifier can choose between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DirectiveKind {
    /// Read-only state query against the automation backend.
    Query,
    /// Clarifying question back to the operator.
    Followup,
    /// Direct answer from what the model already knows.
    Answer,
    /// One or more device-control commands.
    Action,
}

impl DirectiveKind {
    /// All kinds, in the order they are listed in the routing prompt.
    pub const ALL: [DirectiveKind; 4] = [
        DirectiveKind::Query,
        DirectiveKind::Followup,
        DirectiveKind::Answer,
        DirectiveKind::Action,
    ];

    /// Scan order for classifier replies. QUERY is the fallback and is
    /// never scanned for.
    const SCAN_ORDER: [DirectiveKind; 3] = [
        DirectiveKind::Followup,
        DirectiveKind::Answer,
        DirectiveKind::Action,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DirectiveKind::Query => "QUERY",
            DirectiveKind::Followup => "FOLLOWUP",
            DirectiveKind::Answer => "ANSWER",
            DirectiveKind::Action => "ACTION",
        }
    }

    /// Resolve a free-text classifier reply to a directive.
    ///
    /// Matching is case-sensitive substring containment. When several
    /// names appear, FOLLOWUP beats ANSWER beats ACTION; a reply with none
    /// of them resolves to QUERY.
    pub fn from_classifier_reply(reply: &str) -> Self {
        Self::SCAN_ORDER
            .into_iter()
            .find(|kind| reply.contains(kind.name()))
            .unwrap_or(DirectiveKind::Query)
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A generation instruction with a single `{input}` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveTemplate(&'static str);

impl DirectiveTemplate {
    pub const fn new(text: &'static str) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn placeholder_count(&self) -> usize {
        self.0.matches(INPUT_PLACEHOLDER).count()
    }

    /// Substitute `input` at the placeholder.
    ///
    /// Only the first placeholder is replaced, and `input` is inserted
    /// verbatim: braces or placeholder text inside it are not expanded.
    pub fn render(&self, input: &str) -> String {
        match self.0.split_once(INPUT_PLACEHOLDER) {
            Some((head, tail)) => {
                let mut out = String::with_capacity(head.len() + input.len() + tail.len());
                out.push_str(head);
                out.push_str(input);
                out.push_str(tail);
                out
            }
            None => self.0.to_string(),
        }
    }
}
