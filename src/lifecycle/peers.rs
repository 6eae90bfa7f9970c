// ABOUTME: Peer-connection synthesis: point-to-point networks between containers.
// ABOUTME: Each ephemeral network is created on the peer's own engine endpoint.

use std::collections::BTreeMap;
use tracing::info;

use crate::engine::traits::NetworkSpec;
use crate::engine::{ClientFactory, engine_for_instance};
use crate::error::Result;
use crate::graph::{NodeInstance, RelationshipKind};
use crate::state::keys;
use crate::state::{NetworkDescriptor, PeerLink};
use crate::types::ContainerId;

/// For each peer-container relationship, create an ephemeral bridge network
/// on the peer's engine, attach the peer, and capture its resulting address.
///
/// The peer may live behind a different host relationship than the local
/// container, so every connection re-derives its own client. Returns the
/// per-peer links keyed by peer node name and the synthesized network
/// descriptors keyed by network name; the local container joins those
/// networks during its own create.
///
/// The network name is derived from the two node names only; scaled replicas
/// of the same node pair collide on it.
pub(crate) async fn synthesize(
    factory: &dyn ClientFactory,
    instance: &NodeInstance,
) -> Result<(
    BTreeMap<String, PeerLink>,
    BTreeMap<String, NetworkDescriptor>,
)> {
    let mut links = BTreeMap::new();
    let mut networks = BTreeMap::new();

    for rel in instance.related(RelationshipKind::ConnectedToContainer) {
        let peer = rel.target();
        let peer_engine = engine_for_instance(factory, peer).await?;
        let peer_id: ContainerId = peer.runtime_require(keys::CONTAINER_ID)?;

        let network_name = format!("{}_to_{}", instance.node_name(), peer.node_name());
        let network_id = peer_engine
            .create_network(&NetworkSpec {
                name: network_name.clone(),
                driver: None,
                options: BTreeMap::new(),
            })
            .await?;
        peer_engine
            .connect_container(&network_id, &peer_id, &[])
            .await?;

        let view = peer_engine.inspect_container(&peer_id).await?;
        let ip = view
            .networks
            .get(&network_name)
            .map(|endpoint| endpoint.ip_address.clone())
            .filter(|ip| !ip.is_empty());
        info!(
            peer = peer.node_name(),
            network = network_name,
            "connected peer container"
        );

        links.insert(
            peer.node_name().to_string(),
            PeerLink {
                ip,
                network_id: network_id.clone(),
                container_id: peer_id,
            },
        );
        networks.insert(
            network_name.clone(),
            NetworkDescriptor {
                network_id,
                network_name,
                ip: None,
                network_options: None,
            },
        );
    }

    Ok((links, networks))
}
