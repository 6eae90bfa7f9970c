// ABOUTME: Runtime state descriptors persisted into the host's property store.
// ABOUTME: Each descriptor records exactly what its paired delete operation needs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{ContainerId, NetworkId};

/// Property-store keys. Create operations write these; the paired
/// start/stop/delete operations on the same instance read them back.
pub mod keys {
    pub const ENGINE_SETTINGS: &str = "engine_settings";
    pub const IMAGE: &str = "image";
    pub const CONTAINER_ID: &str = "container_id";
    pub const NETWORKS: &str = "networks";
    pub const VOLUMES: &str = "volumes";
    pub const CONNECTED: &str = "connected";
    pub const NETWORK_ID: &str = "network_id";
    pub const NETWORK_NAME: &str = "network_name";
    pub const VOLUME_ID: &str = "volume_id";
    pub const VOLUME_NAME: &str = "volume_name";
    pub const VOLUME_MOUNTPOINT: &str = "volume_mountpoint";
    pub const VOLUME_CREATED: &str = "volume_created";
}

/// A network a container is (or will be) attached to. The IP is populated
/// only after the container starts; the engine assigns addresses at start
/// time, not create time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    pub network_id: NetworkId,
    pub network_name: String,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub network_options: Option<Value>,
}

/// A resolved volume attachment: where the data lives on the engine side and
/// where (and how) the container mounts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeAttachment {
    pub volume_name: String,
    pub volume_mountpoint: String,
    pub mode: String,
    pub mount_at: String,
}

/// One peer-container connection: the three facts required to tear the
/// connection down later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerLink {
    pub ip: Option<String>,
    pub network_id: NetworkId,
    pub container_id: ContainerId,
}
