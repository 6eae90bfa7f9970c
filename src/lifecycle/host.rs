// ABOUTME: Host node setup: build a client, probe liveness, persist settings.
// ABOUTME: Dependent nodes read the persisted settings through host relationships.

use tracing::info;

use crate::config::HostProperties;
use crate::engine::error::ConnectError;
use crate::engine::{ClientFactory, SettingsOverride};
use crate::error::Result;
use crate::graph::NodeInstance;
use crate::state::keys;

/// Build a client from the host node's declared settings merged with caller
/// overrides, confirm the engine answers, and persist the merged settings for
/// every instance that resolves this host through a relationship.
pub async fn setup_host(
    factory: &dyn ClientFactory,
    instance: &NodeInstance,
    overrides: &SettingsOverride,
) -> Result<()> {
    let props: HostProperties = instance.declared()?;
    let settings = props.settings().merged(overrides);
    let engine = factory.connect(&settings).await?;
    engine
        .ping()
        .await
        .map_err(|e| ConnectError::Unreachable {
            endpoint: settings.endpoint_label(),
            message: e.to_string(),
        })?;
    info!(endpoint = %settings.endpoint_label(), "engine is reachable");
    instance.runtime().set(keys::ENGINE_SETTINGS, &settings)
}
