//! ACTION payload parsing.
//!
//! The model answers an ACTION directive with one or more JSON intent
//! calls joined by `*`. Each segment is parsed on its own, lazily, so a
//! bad segment is reported and skipped while the rest still run.
//!
//! The split happens before anything else, so a `*` inside a JSON string
//! value also splits the segment. Markdown fence markers are then removed
//! per segment; any other text stays and makes the segment malformed.

use std::collections::VecDeque;
use std::str::Split;

use hs_protocol::ActionCommand;
use serde_json::Value;

use crate::error::AgentError;

/// Separator between intent calls in an ACTION response.
pub const SEGMENT_DELIMITER: char = '*';

/// Lazy iterator over the commands in an ACTION response.
///
/// Yields one item per command, in response order: an array segment
/// yields each of its elements. Items that are not structurally valid
/// commands come out as `AgentError::MalformedActionPayload`. Cloning
/// the iterator restarts from the clone point.
#[derive(Clone)]
pub struct ActionPayloads<'a> {
    segments: Split<'a, char>,
    pending: VecDeque<Result<ActionCommand, AgentError>>,
}

/// Parse an ACTION response.
pub fn payloads(response: &str) -> ActionPayloads<'_> {
    ActionPayloads {
        segments: response.split(SEGMENT_DELIMITER),
        pending: VecDeque::new(),
    }
}

impl Iterator for ActionPayloads<'_> {
    type Item = Result<ActionCommand, AgentError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(item);
            }
            let raw = self.segments.next()?;
            let segment = strip_fence_markers(raw);
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            self.pending.extend(parse_segment(segment));
        }
    }
}

fn parse_segment(segment: &str) -> Vec<Result<ActionCommand, AgentError>> {
    let value: Value = match serde_json::from_str(segment) {
        Ok(v) => v,
        Err(e) => return vec![Err(malformed(segment, e))],
    };

    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| {
                let text = item.to_string();
                serde_json::from_value(item).map_err(|e| malformed(&text, e))
            })
            .collect(),
        other => vec![serde_json::from_value(other).map_err(|e| malformed(segment, e))],
    }
}

fn malformed(segment: &str, err: serde_json::Error) -> AgentError {
    AgentError::MalformedActionPayload {
        segment: segment.to_string(),
        reason: err.to_string(),
    }
}

/// Remove markdown fence markers (`` ```json `` and `` ``` ``) from a
/// segment, keeping everything else.
fn strip_fence_markers(segment: &str) -> String {
    segment.replace("```json", "").replace("```", "")
}
