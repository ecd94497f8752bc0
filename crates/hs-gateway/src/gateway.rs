//! Backend gateway: HTTP client for the automation backend.
//!
//! Two calls, both at-most-once with no retry:
//! - `query` renders a template server-side and returns the text
//! - `execute` fires an intent and returns the backend's JSON reply

use std::time::Duration;

use async_trait::async_trait;
use hs_protocol::ActionCommand;
use serde::Serialize;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};

const TEMPLATE_PATH: &str = "/api/template";
const INTENT_PATH: &str = "/api/intent/handle";

// ── Gateway trait ─────────────────────────────────────────────

/// Abstraction over the automation backend.
///
/// Enables mocking in tests without a running backend.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Render a template against live state and return the raw text.
    async fn query(&self, template: &str) -> GatewayResult<String>;

    /// Issue a device-control intent.
    async fn execute(&self, command: &ActionCommand) -> GatewayResult<serde_json::Value>;
}

// ── HomeAssistantClient ───────────────────────────────────────

#[derive(Serialize)]
struct TemplateRequest<'a> {
    template: &'a str,
}

/// Client for a Home Assistant compatible REST API.
pub struct HomeAssistantClient {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl HomeAssistantClient {
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Setup(e.to_string()))?;
        Ok(Self { client, config })
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> GatewayResult<reqwest::Response> {
        let url = self.config.endpoint(path);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.token)
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, path, "backend returned non-success status");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Gateway for HomeAssistantClient {
    async fn query(&self, template: &str) -> GatewayResult<String> {
        tracing::debug!(template, "sending template query");
        let response = self
            .post(TEMPLATE_PATH, &TemplateRequest { template })
            .await?;
        response
            .text()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn execute(&self, command: &ActionCommand) -> GatewayResult<serde_json::Value> {
        tracing::debug!(intent = %command.name, target = ?command.target(), "sending intent");
        let response = self.post(INTENT_PATH, command).await?;
        response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HomeAssistantClient {
        HomeAssistantClient::new(GatewayConfig {
            base_url: server.uri(),
            token: "test-token".into(),
            timeout_secs: 2,
        })
        .unwrap()
    }

    fn kitchen_on() -> ActionCommand {
        serde_json::from_value(json!({"name": "HassTurnOn", "data": {"area": "kitchen"}})).unwrap()
    }

    #[tokio::test]
    async fn query_returns_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/template"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(json!({"template": "{{ states('sensor.temp') }}"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("21.5"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let text = client.query("{{ states('sensor.temp') }}").await.unwrap();
        assert_eq!(text, "21.5");
    }

    #[tokio::test]
    async fn query_non_success_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/template"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Error rendering template"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.query("{{ broken").await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::Status {
                status: 400,
                body: "Error rendering template".into()
            }
        );
    }

    #[tokio::test]
    async fn query_unreachable_is_transport_error() {
        let client = HomeAssistantClient::new(GatewayConfig {
            base_url: "http://127.0.0.1:1".into(),
            token: "t".into(),
            timeout_secs: 1,
        })
        .unwrap();
        let err = client.query("{{ areas() }}").await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }

    #[tokio::test]
    async fn query_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/template"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = HomeAssistantClient::new(GatewayConfig {
            base_url: server.uri(),
            token: "test-token".into(),
            timeout_secs: 1,
        })
        .unwrap();
        let err = client.query("{{ now() }}").await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }

    #[tokio::test]
    async fn execute_posts_command_and_returns_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/intent/handle"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(json!({"name": "HassTurnOn", "data": {"area": "kitchen"}})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"speech": {"plain": {"speech": "Turned on the lights"}}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let reply = client.execute(&kitchen_on()).await.unwrap();
        assert_eq!(reply["speech"]["plain"]["speech"], "Turned on the lights");
    }

    #[tokio::test]
    async fn execute_non_json_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/intent/handle"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.execute(&kitchen_on()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn execute_unauthorized_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/intent/handle"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.execute(&kitchen_on()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Status { status: 401, .. }));
    }
}
