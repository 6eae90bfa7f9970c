// ABOUTME: Volume lifecycle: create a driver-backed volume or adopt a source.
// ABOUTME: Ownership is tracked so adopted sources are never deleted.

use tracing::info;

use crate::config::VolumeProperties;
use crate::engine::traits::VolumeSpec;
use crate::engine::{ClientFactory, OperationContext, SettingsSource, resolve_engine};
use crate::error::Result;
use crate::state::keys;
use crate::types::VolumeId;

/// Create the node's volume, or adopt its declared source verbatim as the
/// mountpoint without touching the engine.
pub async fn create_volume(
    factory: &dyn ClientFactory,
    ctx: &OperationContext<'_>,
    from: SettingsSource,
) -> Result<()> {
    let instance = ctx.instance;
    let props: VolumeProperties = instance.declared()?;
    let name = props.volume_name(instance.node_name()).to_string();

    let mountpoint = match &props.source {
        Some(source) => {
            instance.runtime().set(keys::VOLUME_CREATED, &false)?;
            source.clone()
        }
        None => {
            let engine = resolve_engine(factory, ctx, from).await?;
            let view = engine
                .create_volume(&VolumeSpec {
                    name: name.clone(),
                    driver: props.driver.clone(),
                    driver_opts: props.driver_opts.clone(),
                })
                .await?;
            info!(volume = %view.name, "created volume");
            instance.runtime().set(keys::VOLUME_CREATED, &true)?;
            instance.runtime().set(keys::VOLUME_ID, &view.name)?;
            // The volume's id doubles as the mount source containers bind.
            view.name.into_inner()
        }
    };

    instance.runtime().set(keys::VOLUME_NAME, &name)?;
    instance.runtime().set(keys::VOLUME_MOUNTPOINT, &mountpoint)
}

/// Force-remove the volume created by this node. A no-op when the node
/// adopted an external source.
pub async fn delete_volume(
    factory: &dyn ClientFactory,
    ctx: &OperationContext<'_>,
    from: SettingsSource,
) -> Result<()> {
    let instance = ctx.instance;
    let created = instance
        .runtime()
        .get::<bool>(keys::VOLUME_CREATED)?
        .unwrap_or(false);
    if !created {
        return Ok(());
    }
    let id: VolumeId = instance.runtime_require(keys::VOLUME_ID)?;
    let name: String = instance.runtime_require(keys::VOLUME_NAME)?;
    let engine = resolve_engine(factory, ctx, from).await?;
    engine.remove_volume(&id, true).await?;
    info!(volume = name, "removed volume");
    Ok(())
}
