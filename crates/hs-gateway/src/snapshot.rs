//! Start-up inventory of the home, rendered into the system prompt.

use crate::error::GatewayResult;
use crate::gateway::Gateway;

pub const AREAS_TEMPLATE: &str = "{{ areas() }}";
pub const LABELS_TEMPLATE: &str = "{{ labels() }}";
pub const ENTITIES_TEMPLATE: &str = "{{ states | map(attribute='entity_id') | list | join(', ') }}";

/// Areas, labels and (optionally) entity ids, as the backend renders them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeSnapshot {
    pub areas: String,
    pub labels: String,
    pub entities: Option<String>,
}

/// Fetch the inventory. Any failure is returned as-is: the caller should
/// not start a session with a partial prompt.
pub async fn fetch_snapshot(
    gateway: &dyn Gateway,
    include_entities: bool,
) -> GatewayResult<HomeSnapshot> {
    let areas = gateway.query(AREAS_TEMPLATE).await?;
    let labels = gateway.query(LABELS_TEMPLATE).await?;
    let entities = if include_entities {
        Some(gateway.query(ENTITIES_TEMPLATE).await?)
    } else {
        None
    };

    tracing::info!(
        areas_len = areas.len(),
        labels_len = labels.len(),
        entities = entities.is_some(),
        "home snapshot fetched"
    );
    Ok(HomeSnapshot {
        areas,
        labels,
        entities,
    })
}
