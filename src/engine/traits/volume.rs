// ABOUTME: Volume operations trait for the container engine.
// ABOUTME: Inspect, create, and remove named driver-backed volumes.

use super::sealed::Sealed;
use super::shared_types::{VolumeSpec, VolumeView};
use crate::types::VolumeId;
use async_trait::async_trait;

/// Volume operations: inspect, create, remove.
#[async_trait]
pub trait VolumeOps: Sealed + Send + Sync {
    /// Look up a volume by name; `NotFound` when absent.
    async fn inspect_volume(&self, name: &str) -> Result<VolumeView, VolumeError>;

    /// Create a named volume.
    async fn create_volume(&self, spec: &VolumeSpec) -> Result<VolumeView, VolumeError>;

    /// Remove a volume by id (its name).
    async fn remove_volume(&self, id: &VolumeId, force: bool) -> Result<(), VolumeError>;
}

/// Errors from volume operations.
#[derive(Debug, thiserror::Error)]
pub enum VolumeError {
    #[error("volume not found: {0}")]
    NotFound(String),

    #[error("volume in use, cannot remove: {0}")]
    InUse(String),

    #[error("engine error: {0}")]
    Runtime(String),
}
