//! System prompt assembly.

use hs_gateway::{Gateway, HomeSnapshot, fetch_snapshot};

use crate::catalog::DirectiveCatalog;
use crate::config::SessionConfig;
use crate::error::{AgentError, AgentResult};

/// Build the routing prompt from the catalog descriptions and the home
/// inventory.
pub fn build_system_prompt(
    catalog: &DirectiveCatalog,
    snapshot: &HomeSnapshot,
    assistant_name: &str,
) -> String {
    let mut prompt = format!(
        "You are '{assistant_name}', a precise assistant that controls the devices in a house. \
         Complete the following task as instructed.\n\
         You can take one of these actions:\n"
    );
    for spec in catalog.iter() {
        prompt.push_str(&format!("{}: {}\n", spec.name(), spec.description));
    }
    prompt.push_str(&format!("Available areas: {}\n", snapshot.areas.trim()));
    prompt.push_str(&format!("Available labels: {}\n", snapshot.labels.trim()));
    if let Some(entities) = &snapshot.entities {
        prompt.push_str(&format!("Known entities: {}\n", entities.trim()));
    }
    prompt.push_str(
        "Ask a FOLLOWUP when the target is unclear and use common sense. Never pick an entity by default.\n\
         Use QUERY to look things up and ACTION to change things.\n\
         To take an action, output only its name: one word.\n",
    );
    prompt
}

/// Fetch the inventory and build the prompt. A gateway failure here is a
/// start-up failure.
pub async fn load_system_prompt(
    gateway: &dyn Gateway,
    catalog: &DirectiveCatalog,
    session: &SessionConfig,
) -> AgentResult<String> {
    let snapshot = fetch_snapshot(gateway, session.include_entities)
        .await
        .map_err(|e| AgentError::Startup(format!("failed to fetch home snapshot: {e}")))?;
    Ok(build_system_prompt(
        catalog,
        &snapshot,
        &session.assistant_name,
    ))
}
