use serde::Deserialize;

/// Environment variable that overrides the configured access token.
pub const TOKEN_ENV: &str = "HEARTHSIDE_BACKEND_TOKEN";

/// Backend connection configuration, loadable from TOML or environment.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the backend (e.g., "http://homeassistant.local:8123").
    pub base_url: String,
    /// Long-lived access token sent as a bearer token.
    #[serde(default)]
    pub token: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Replace the token with `HEARTHSIDE_BACKEND_TOKEN` when it is set.
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.is_empty() {
                self.token = token;
            }
        }
    }

    /// Join an API path onto the base URL without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
