// ABOUTME: Container lifecycle: absent -> created -> started -> stopped -> absent.
// ABOUTME: Create composes image, volume, network, and peer-connection resolution.

use std::collections::BTreeMap;
use tracing::info;

use crate::config::{ContainerProperties, VolumeProperties};
use crate::engine::traits::{ContainerError, ContainerSpec, NetworkError, VolumeBinding};
use crate::engine::{ClientFactory, OperationContext, SettingsSource, resolve_engine};
use crate::error::{Error, Result};
use crate::graph::{NodeInstance, RelationshipKind};
use crate::lifecycle::params::{self, CreateOverrides};
use crate::lifecycle::peers;
use crate::state::keys;
use crate::state::{NetworkDescriptor, VolumeAttachment};
use crate::types::{ContainerId, ImageId};

/// Create the container: resolve its image, volumes, networks, and peer
/// connections, merge creation parameters, issue the create call, then join
/// every network in the merged set with per-network aliases.
///
/// Persists everything the later transitions need: container id, the merged
/// network set, resolved volumes, the image reference, and peer links.
/// Partial failure after the create call leaves the container
/// created-but-not-fully-wired; a retried delete converges.
pub async fn create_container(
    factory: &dyn ClientFactory,
    ctx: &OperationContext<'_>,
    from: SettingsSource,
    overrides: &CreateOverrides,
) -> Result<()> {
    let instance = ctx.instance;
    let props: ContainerProperties = instance.declared()?;

    let image: ImageId = instance
        .related_one(RelationshipKind::FromImage)?
        .target()
        .runtime_require(keys::IMAGE)?;
    let volumes = resolve_volumes(instance)?;
    let mut networks = resolve_networks(instance)?;

    let engine = resolve_engine(factory, ctx, from).await?;
    let (links, peer_networks) = peers::synthesize(factory, instance).await?;

    let collisions: Vec<String> = networks
        .keys()
        .filter(|name| peer_networks.contains_key(*name))
        .cloned()
        .collect();
    if !collisions.is_empty() {
        return Err(Error::NetworkNameCollision { names: collisions });
    }
    networks.extend(peer_networks);

    let base = ContainerSpec {
        image: image.to_string(),
        name: props.container_name(instance.node_name()).to_string(),
        command: props.command.clone(),
        entrypoint: None,
        environment: props.environment.clone(),
        ports: props.port_bindings.clone(),
        volumes: volumes
            .values()
            .map(|v| {
                (
                    v.volume_mountpoint.clone(),
                    VolumeBinding {
                        bind: v.mount_at.clone(),
                        mode: v.mode.clone(),
                    },
                )
            })
            .collect(),
        labels: BTreeMap::new(),
        user: None,
        working_dir: None,
    };
    let spec = params::merge_parameters(base, &props.additional_create_parameters, overrides);

    let container_id = engine.create_container(&spec).await?;
    info!(container = %container_id, name = spec.name, "created container");

    for descriptor in networks.values() {
        let aliases = props
            .network_aliases
            .resolve(&descriptor.network_name, instance.node_name());
        engine
            .connect_container(&descriptor.network_id, &container_id, &aliases)
            .await?;
    }

    instance.runtime().set(keys::CONTAINER_ID, &container_id)?;
    instance.runtime().set(keys::NETWORKS, &networks)?;
    instance.runtime().set(keys::VOLUMES, &volumes)?;
    instance.runtime().set(keys::IMAGE, &image)?;
    instance.runtime().set(keys::CONNECTED, &links)
}

/// Start the container, then capture the engine-assigned address on every
/// persisted network descriptor. Addresses exist only from this point on.
pub async fn start_container(
    factory: &dyn ClientFactory,
    ctx: &OperationContext<'_>,
    from: SettingsSource,
) -> Result<()> {
    let instance = ctx.instance;
    let id: ContainerId = instance.runtime_require(keys::CONTAINER_ID)?;
    let engine = resolve_engine(factory, ctx, from).await?;
    engine.start_container(&id).await?;

    let view = engine.inspect_container(&id).await?;
    let mut networks: BTreeMap<String, NetworkDescriptor> = instance
        .runtime()
        .get(keys::NETWORKS)?
        .unwrap_or_default();
    for (name, descriptor) in networks.iter_mut() {
        if let Some(endpoint) = view.networks.get(name) {
            descriptor.ip = Some(endpoint.ip_address.clone());
        }
    }
    instance.runtime().set(keys::NETWORKS, &networks)
}

/// Stop the container. A container the engine no longer knows counts as
/// already stopped.
pub async fn stop_container(
    factory: &dyn ClientFactory,
    ctx: &OperationContext<'_>,
    from: SettingsSource,
) -> Result<()> {
    let instance = ctx.instance;
    let id: ContainerId = instance.runtime_require(keys::CONTAINER_ID)?;
    let engine = resolve_engine(factory, ctx, from).await?;
    match engine.inspect_container(&id).await {
        Ok(_) => {}
        Err(ContainerError::NotFound(_)) => return Ok(()),
        Err(e) => return Err(e.into()),
    }
    match engine.stop_container(&id).await {
        Ok(()) | Err(ContainerError::NotRunning(_)) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Tear down every peer connection, then remove the container.
///
/// Peer networks go first: the local container is attached to them too, and
/// the engine refuses to remove a network with live attachments. The peer is
/// disconnected before each network is removed for the same reason.
pub async fn delete_container(
    factory: &dyn ClientFactory,
    ctx: &OperationContext<'_>,
    from: SettingsSource,
) -> Result<()> {
    let instance = ctx.instance;
    let engine = resolve_engine(factory, ctx, from).await?;

    let connected: BTreeMap<String, crate::state::PeerLink> = instance
        .runtime()
        .get(keys::CONNECTED)?
        .unwrap_or_default();
    // A retried delete finds these already gone; tolerate that so the retry
    // converges instead of failing on its own partial predecessor.
    for (peer, link) in &connected {
        match engine
            .disconnect_container(&link.network_id, &link.container_id)
            .await
        {
            Ok(()) | Err(NetworkError::NotFound(_)) | Err(NetworkError::NotConnected(_)) => {}
            Err(e) => return Err(e.into()),
        }
        match engine.remove_network(&link.network_id).await {
            Ok(()) | Err(NetworkError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }
        info!(peer = peer.as_str(), "removed peer connection network");
    }

    let id: ContainerId = instance.runtime_require(keys::CONTAINER_ID)?;
    match engine.inspect_container(&id).await {
        Ok(_) => {}
        Err(ContainerError::NotFound(_)) => return Ok(()),
        Err(e) => return Err(e.into()),
    }
    engine.remove_container(&id, false).await?;
    info!(container = %id, "removed container");
    Ok(())
}

/// Resolve every volume relationship into an attachment keyed by the volume
/// node's name. Declared mode and mount path come from the target node's
/// configuration, name and mountpoint from its persisted state.
fn resolve_volumes(instance: &NodeInstance) -> Result<BTreeMap<String, VolumeAttachment>> {
    let mut volumes = BTreeMap::new();
    for rel in instance.related(RelationshipKind::ConnectedToVolume) {
        let target = rel.target();
        let vprops: VolumeProperties = target.declared()?;
        let mount_at = vprops.mount_at.clone().ok_or_else(|| Error::MissingMountPath {
            node: target.node_name().to_string(),
        })?;
        volumes.insert(
            target.node_name().to_string(),
            VolumeAttachment {
                volume_name: target.runtime_require(keys::VOLUME_NAME)?,
                volume_mountpoint: target.runtime_require(keys::VOLUME_MOUNTPOINT)?,
                mode: vprops.mode.clone(),
                mount_at,
            },
        );
    }
    Ok(volumes)
}

/// Resolve every network relationship into a descriptor keyed by network
/// name, read from each target's persisted state.
fn resolve_networks(instance: &NodeInstance) -> Result<BTreeMap<String, NetworkDescriptor>> {
    let mut networks = BTreeMap::new();
    for rel in instance.related(RelationshipKind::ConnectedToNetwork) {
        let target = rel.target();
        let descriptor = NetworkDescriptor {
            network_id: target.runtime_require(keys::NETWORK_ID)?,
            network_name: target.runtime_require(keys::NETWORK_NAME)?,
            ip: None,
            network_options: None,
        };
        networks.insert(descriptor.network_name.clone(), descriptor);
    }
    Ok(networks)
}
