//! Agent configuration, loadable from TOML with environment overrides.

use hs_completion::CompletionConfig;
use hs_gateway::GatewayConfig;
use serde::Deserialize;

/// Top-level configuration for the agent.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Automation backend connection settings.
    pub backend: GatewayConfig,
    /// Completion service settings. Optional, defaults to a local server.
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Conversation settings.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Per-session conversation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Name the assistant is given in the system prompt.
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,
    /// Inputs that end the session (compared case-insensitively).
    #[serde(default = "default_exit_keywords")]
    pub exit_keywords: Vec<String>,
    /// Also list every entity id in the system prompt.
    #[serde(default)]
    pub include_entities: bool,
}

fn default_assistant_name() -> String {
    "Al".into()
}

fn default_exit_keywords() -> Vec<String> {
    vec!["exit".into(), "bye".into(), "end".into()]
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            assistant_name: default_assistant_name(),
            exit_keywords: default_exit_keywords(),
            include_entities: false,
        }
    }
}

impl AgentConfig {
    /// Load config from a TOML file path and apply environment overrides.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;
        config.apply_env();
        Ok(config)
    }

    /// Apply secrets from the environment over the file values.
    pub fn apply_env(&mut self) {
        self.backend.apply_env();
        self.completion.apply_env();
    }
}
