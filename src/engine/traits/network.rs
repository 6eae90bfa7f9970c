// ABOUTME: Network operations trait for the container engine.
// ABOUTME: Inspect, create, remove networks; connect and disconnect containers.

use super::sealed::Sealed;
use super::shared_types::{NetworkSpec, NetworkView};
use crate::types::{ContainerId, NetworkId};
use async_trait::async_trait;

/// Network operations: inspect, create, connect, disconnect, remove.
#[async_trait]
pub trait NetworkOps: Sealed + Send + Sync {
    /// Look up a network by name or id; `NotFound` when absent.
    async fn inspect_network(&self, name_or_id: &str) -> Result<NetworkView, NetworkError>;

    /// Create a network.
    async fn create_network(&self, spec: &NetworkSpec) -> Result<NetworkId, NetworkError>;

    /// Remove a network.
    async fn remove_network(&self, id: &NetworkId) -> Result<(), NetworkError>;

    /// Connect a container to a network with optional aliases.
    async fn connect_container(
        &self,
        network: &NetworkId,
        container: &ContainerId,
        aliases: &[String],
    ) -> Result<(), NetworkError>;

    /// Disconnect a container from a network.
    async fn disconnect_container(
        &self,
        network: &NetworkId,
        container: &ContainerId,
    ) -> Result<(), NetworkError>;
}

/// Errors from network operations.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("network not found: {0}")]
    NotFound(String),

    #[error("network already exists: {0}")]
    AlreadyExists(String),

    #[error("container not connected to network: {0}")]
    NotConnected(String),

    #[error("network in use, cannot remove: {0}")]
    InUse(String),

    #[error("engine error: {0}")]
    Runtime(String),
}
