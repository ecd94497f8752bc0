//! Hearthside: talk to your home.
//!
//! Wires the backend gateway, the completion service and the operator
//! console into a single interactive session.

use anyhow::Context;
use tracing::Instrument;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use hs_agent::config::AgentConfig;
use hs_agent::prompt::load_system_prompt;
use hs_agent::{DirectiveCatalog, IntentRouter, StdConsole};
use hs_completion::OpenAiChatClient;
use hs_gateway::HomeAssistantClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout belongs to the operator; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "hearthside starting");

    // ── Load config ─────────────────────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/etc/hearthside/agent.toml".to_string());

    let config = AgentConfig::from_file(&config_path)
        .with_context(|| format!("failed to load config from {config_path}"))?;
    tracing::info!(
        backend = %config.backend.base_url,
        completion = %config.completion.base_url,
        model = %config.completion.model,
        "config loaded"
    );

    // ── Backend + system prompt ─────────────────────────────────
    let gateway = HomeAssistantClient::new(config.backend.clone())?;
    let catalog = DirectiveCatalog::standard();
    let system_prompt = load_system_prompt(&gateway, &catalog, &config.session)
        .await
        .context("cannot start without the home snapshot")?;

    // ── Completion service ──────────────────────────────────────
    let model = OpenAiChatClient::new(config.completion.clone())?;

    let mut router = IntentRouter::new(&gateway, &model, &catalog, system_prompt)
        .with_exit_keywords(config.session.exit_keywords.iter().cloned());
    let mut console = StdConsole::default();

    let session_id = Uuid::now_v7();
    tracing::info!(%session_id, "hearthside ready");

    tokio::select! {
        () = router.run(&mut console).instrument(tracing::info_span!("session", %session_id)) => {}
        // Graceful shutdown on SIGINT
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    tracing::info!("hearthside stopped");
    Ok(())
}
