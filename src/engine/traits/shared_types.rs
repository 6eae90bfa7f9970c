// ABOUTME: Request and view types shared across the engine capability traits.
// ABOUTME: Deliberately engine-agnostic; the bollard layer maps them to wire types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{ContainerId, NetworkId, VolumeId};

/// Fully-merged parameters for a container create call.
///
/// This is the explicit, named-field counterpart of the open parameter dict
/// the engine API accepts; the merge that produces it lives in
/// `lifecycle::params` and is auditable independent of the client call shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub image: String,
    pub name: String,
    pub command: Option<Vec<String>>,
    pub entrypoint: Option<Vec<String>>,
    /// Environment variables, wholesale-replaced on override (no deep merge).
    pub environment: BTreeMap<String, String>,
    /// Container port (`"8080"` or `"8080/tcp"`) to host port; `None` lets
    /// the engine pick one.
    pub ports: BTreeMap<String, Option<u16>>,
    /// Mount source (volume name or host path) to bind path and access mode.
    pub volumes: BTreeMap<String, VolumeBinding>,
    pub labels: BTreeMap<String, String>,
    pub user: Option<String>,
    pub working_dir: Option<String>,
}

/// Where and how a mount source is bound inside the container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeBinding {
    pub bind: String,
    pub mode: String,
}

/// Live container state as reported by an inspect call.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerView {
    pub id: ContainerId,
    pub name: String,
    /// Network name to live attachment info.
    pub networks: BTreeMap<String, EndpointView>,
}

/// One live network attachment of a container.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointView {
    pub network_id: String,
    pub ip_address: String,
    pub aliases: Vec<String>,
}

/// Parameters for a network create call.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSpec {
    pub name: String,
    pub driver: Option<String>,
    pub options: BTreeMap<String, String>,
}

/// A network as reported by an inspect call.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkView {
    pub id: NetworkId,
    pub name: String,
}

/// Parameters for a volume create call.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeSpec {
    pub name: String,
    pub driver: Option<String>,
    pub driver_opts: BTreeMap<String, String>,
}

/// A volume as reported by the engine. Docker identifies volumes by name,
/// so the name doubles as the volume's id.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeView {
    pub name: VolumeId,
    pub mountpoint: String,
}
