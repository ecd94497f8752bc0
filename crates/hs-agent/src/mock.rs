//! Scripted console for testing: feeds canned lines, records events.

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::console::{Console, RouterEvent};

/// A `Console` that reads from a fixed script and records what it shows.
///
/// Returns `None` (end of input) once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    events: Vec<RouterEvent>,
    prompts: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            events: Vec::new(),
            prompts: 0,
        }
    }

    /// Every event shown, oldest first.
    pub fn events(&self) -> &[RouterEvent] {
        &self.events
    }

    /// How many times the router asked the operator for input.
    pub fn prompts(&self) -> usize {
        self.prompts
    }

    /// Script lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn read_line(&mut self) -> Option<String> {
        self.prompts += 1;
        self.inputs.pop_front()
    }

    fn show(&mut self, event: &RouterEvent) {
        self.events.push(event.clone());
    }
}
