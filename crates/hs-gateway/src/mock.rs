//! Mock gateway for testing without a backend.
//!
//! Records every call in order and serves canned responses.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use hs_protocol::ActionCommand;
use serde_json::json;

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::Gateway;

/// A recorded gateway call.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Query(String),
    Execute(ActionCommand),
}

/// Mock implementation of the `Gateway` trait.
///
/// Query responses are looked up by exact template first, then taken
/// from a FIFO queue. Executes succeed with a fixed `action_done` body
/// unless the command's target was marked as failing.
pub struct MockGateway {
    calls: Mutex<Vec<GatewayCall>>,
    templates: Mutex<HashMap<String, String>>,
    queued: Mutex<VecDeque<GatewayResult<String>>>,
    failing_targets: Mutex<HashSet<String>>,
    unreachable: Mutex<bool>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            templates: Mutex::new(HashMap::new()),
            queued: Mutex::new(VecDeque::new()),
            failing_targets: Mutex::new(HashSet::new()),
            unreachable: Mutex::new(false),
        }
    }

    /// Mock that answers the start-up inventory templates.
    pub fn with_home_sample() -> Self {
        let m = Self::new();
        m.set_template("{{ areas() }}", "['kitchen', 'living_room', 'bedroom']");
        m.set_template("{{ labels() }}", "['temperature', 'lighting']");
        m.set_template(
            crate::snapshot::ENTITIES_TEMPLATE,
            "light.kitchen, light.lamp1, sensor.living_room_temperature",
        );
        m
    }

    /// Answer `template` with `response` every time it is queried.
    pub fn set_template(&self, template: impl Into<String>, response: impl Into<String>) {
        self.templates
            .lock()
            .unwrap()
            .insert(template.into(), response.into());
    }

    /// Queue a response for the next query that has no template match.
    pub fn push_query(&self, result: GatewayResult<String>) {
        self.queued.lock().unwrap().push_back(result);
    }

    /// Make executes whose target (`data.name`/`data.area`/...) equals
    /// `target` fail with an HTTP 500.
    pub fn fail_target(&self, target: impl Into<String>) {
        self.failing_targets.lock().unwrap().insert(target.into());
    }

    /// Make every call fail with a transport error.
    pub fn set_unreachable(&self, unreachable: bool) {
        *self.unreachable.lock().unwrap() = unreachable;
    }

    /// All calls, in the order they were made.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Templates passed to `query`, in order.
    pub fn queries(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                GatewayCall::Query(t) => Some(t.clone()),
                GatewayCall::Execute(_) => None,
            })
            .collect()
    }

    /// Commands passed to `execute`, in order.
    pub fn executed(&self) -> Vec<ActionCommand> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                GatewayCall::Execute(cmd) => Some(cmd.clone()),
                GatewayCall::Query(_) => None,
            })
            .collect()
    }

    fn check_reachable(&self) -> GatewayResult<()> {
        if *self.unreachable.lock().unwrap() {
            Err(GatewayError::Transport("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn query(&self, template: &str) -> GatewayResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push(GatewayCall::Query(template.to_string()));
        self.check_reachable()?;

        if let Some(response) = self.templates.lock().unwrap().get(template) {
            return Ok(response.clone());
        }
        self.queued.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(GatewayError::Status {
                status: 400,
                body: format!("no canned response for template: {template}"),
            })
        })
    }

    async fn execute(&self, command: &ActionCommand) -> GatewayResult<serde_json::Value> {
        self.calls
            .lock()
            .unwrap()
            .push(GatewayCall::Execute(command.clone()));
        self.check_reachable()?;

        let failing = command
            .target()
            .is_some_and(|t| self.failing_targets.lock().unwrap().contains(t));
        if failing {
            return Err(GatewayError::Status {
                status: 500,
                body: format!("failed to handle intent {}", command.name),
            });
        }
        Ok(json!({
            "response_type": "action_done",
            "intent": command.name,
        }))
    }
}
