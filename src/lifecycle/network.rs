// ABOUTME: Network lifecycle: create an owned network or adopt an external one.
// ABOUTME: Only internally-created networks are ever deleted.

use tracing::info;

use crate::config::NetworkProperties;
use crate::engine::traits::{NetworkError, NetworkSpec, NetworkView};
use crate::engine::{ClientFactory, OperationContext, SettingsSource, resolve_engine};
use crate::error::{Error, Result};
use crate::state::keys;
use crate::types::NetworkId;

/// Create or adopt the node's network and persist its id and name.
///
/// External networks must pre-exist; internal ones must not. A name collision
/// with an existing network is a fatal configuration error, never an
/// adoption.
pub async fn create_network(
    factory: &dyn ClientFactory,
    ctx: &OperationContext<'_>,
    from: SettingsSource,
) -> Result<()> {
    let instance = ctx.instance;
    let props: NetworkProperties = instance.declared()?;
    let name = props.network_name(instance.node_name()).to_string();
    let engine = resolve_engine(factory, ctx, from).await?;

    let existing = match engine.inspect_network(&name).await {
        Ok(view) => Some(view),
        Err(NetworkError::NotFound(_)) => None,
        Err(e) => return Err(e.into()),
    };

    let view = match (props.external, existing) {
        (true, Some(view)) => view,
        (true, None) => return Err(Error::ExternalNetworkMissing(name)),
        (false, Some(_)) => return Err(Error::NetworkAlreadyExists(name)),
        (false, None) => {
            let id = engine
                .create_network(&NetworkSpec {
                    name: name.clone(),
                    driver: props.driver.clone(),
                    options: props.options.clone(),
                })
                .await?;
            NetworkView {
                id,
                name: name.clone(),
            }
        }
    };

    info!(network = %view.name, "network ready");
    instance.runtime().set(keys::NETWORK_ID, &view.id)?;
    instance.runtime().set(keys::NETWORK_NAME, &name)
}

/// Remove the network created by this node. A no-op for external networks
/// and for nodes whose create never persisted an id.
pub async fn delete_network(
    factory: &dyn ClientFactory,
    ctx: &OperationContext<'_>,
    from: SettingsSource,
) -> Result<()> {
    let instance = ctx.instance;
    let Some(id) = instance.runtime().get::<NetworkId>(keys::NETWORK_ID)? else {
        return Ok(());
    };
    let props: NetworkProperties = instance.declared()?;
    if props.external {
        return Ok(());
    }
    let engine = resolve_engine(factory, ctx, from).await?;
    engine.remove_network(&id).await?;
    Ok(())
}
