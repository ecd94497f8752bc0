//! Shared test harness for E2E integration tests.
//!
//! Stands up two wiremock servers, one playing the automation backend and
//! one the completion service, and wires the real clients to them.

#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hs_agent::prompt::load_system_prompt;
use hs_agent::{DirectiveCatalog, IntentRouter, SessionConfig};
use hs_completion::{CompletionConfig, OpenAiChatClient};
use hs_gateway::{GatewayConfig, HomeAssistantClient};

pub const TOKEN: &str = "e2e-token";
pub const AREAS: &str = "['kitchen', 'living_room', 'bedroom']";
pub const LABELS: &str = "['temperature', 'lighting']";

/// End-to-end harness: backend + completion mocks and real clients.
pub struct TestHarness {
    pub backend: MockServer,
    pub completion: MockServer,
    pub gateway: HomeAssistantClient,
    pub model: OpenAiChatClient,
    pub catalog: DirectiveCatalog,
    pub session: SessionConfig,
}

impl TestHarness {
    /// Harness whose backend already answers the start-up snapshot.
    pub async fn start() -> Self {
        let h = Self::bare().await;
        h.mount_snapshot().await;
        h
    }

    /// Harness with nothing mounted.
    pub async fn bare() -> Self {
        let backend = MockServer::start().await;
        let completion = MockServer::start().await;

        let gateway = HomeAssistantClient::new(GatewayConfig {
            base_url: backend.uri(),
            token: TOKEN.into(),
            timeout_secs: 2,
        })
        .unwrap();
        let model = OpenAiChatClient::new(CompletionConfig {
            base_url: format!("{}/v1", completion.uri()),
            timeout_secs: 2,
            ..CompletionConfig::default()
        })
        .unwrap();

        Self {
            backend,
            completion,
            gateway,
            model,
            catalog: DirectiveCatalog::standard(),
            session: SessionConfig::default(),
        }
    }

    /// Answer the areas/labels templates the system prompt is built from.
    pub async fn mount_snapshot(&self) {
        for (template, body) in [("{{ areas() }}", AREAS), ("{{ labels() }}", LABELS)] {
            Mock::given(method("POST"))
                .and(path("/api/template"))
                .and(wiremock::matchers::body_json(json!({ "template": template })))
                .respond_with(ResponseTemplate::new(200).set_body_string(body))
                .mount(&self.backend)
                .await;
        }
    }

    /// Queue completion replies; each is served exactly once, in order.
    pub async fn script_completions(&self, replies: &[&str]) {
        for reply in replies {
            Mock::given(method("POST"))
                .and(path("/v1/chat/completions"))
                .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(reply)))
                .up_to_n_times(1)
                .mount(&self.completion)
                .await;
        }
    }

    /// Queue a single failing completion call.
    pub async fn fail_next_completion(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream unavailable"))
            .up_to_n_times(1)
            .mount(&self.completion)
            .await;
    }

    /// Answer one template query (other than the snapshot) with `body`.
    pub async fn answer_query(&self, template: &str, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path("/api/template"))
            .and(wiremock::matchers::body_json(json!({ "template": template })))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.backend)
            .await;
    }

    /// Accept every intent call with an `action_done` reply.
    pub async fn accept_intents(&self) {
        Mock::given(method("POST"))
            .and(path("/api/intent/handle"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"response_type": "action_done"})),
            )
            .mount(&self.backend)
            .await;
    }

    /// Build a router with the real system prompt.
    pub async fn router(&self) -> IntentRouter<'_> {
        let prompt = load_system_prompt(&self.gateway, &self.catalog, &self.session)
            .await
            .expect("snapshot should load");
        IntentRouter::new(&self.gateway, &self.model, &self.catalog, prompt)
    }

    /// Message lists of every completion request received, oldest first.
    pub async fn completion_requests(&self) -> Vec<Vec<Value>> {
        self.completion
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| {
                let body: Value = r.body_json().unwrap();
                body["messages"].as_array().cloned().unwrap_or_default()
            })
            .collect()
    }

    /// JSON bodies posted to `/api/intent/handle`, oldest first.
    pub async fn intent_bodies(&self) -> Vec<Value> {
        self.backend
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == "/api/intent/handle")
            .map(|r| r.body_json().unwrap())
            .collect()
    }

    /// Templates posted to `/api/template`, oldest first.
    pub async fn template_queries(&self) -> Vec<String> {
        self.backend
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == "/api/template")
            .map(|r| {
                let body: Value = r.body_json().unwrap();
                body["template"].as_str().unwrap_or_default().to_string()
            })
            .collect()
    }
}

/// Build an OpenAI-style chat completion body.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-e2e",
        "object": "chat.completion",
        "model": "local-model",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

/// Content of the user turn the classifier saw (the one before the reminder).
pub fn classified_input(messages: &[Value]) -> &str {
    messages[messages.len() - 2]["content"].as_str().unwrap()
}
