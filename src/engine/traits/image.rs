// ABOUTME: Image operations trait for the container engine.
// ABOUTME: Resolve, pull, build from a context directory, and remove images.

use super::sealed::Sealed;
use crate::types::ImageId;
use async_trait::async_trait;
use std::path::Path;

/// Image operations: resolve, pull, build, remove.
#[async_trait]
pub trait ImageOps: Sealed + Send + Sync {
    /// Look up an image by reference; `Ok(None)` when the engine has no such
    /// image (or reports one without an identifier).
    async fn resolve_image(&self, reference: &str) -> Result<Option<ImageId>, ImageError>;

    /// Pull an image (`repository:tag`) from a registry.
    async fn pull_image(&self, reference: &str) -> Result<(), ImageError>;

    /// Build an image tagged `tag` from the given context directory.
    async fn build_image(&self, tag: &str, context: &Path) -> Result<(), ImageError>;

    /// Remove an image by identifier.
    async fn remove_image(&self, image: &ImageId, force: bool) -> Result<(), ImageError>;
}

/// Errors from image operations.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image not found: {0}")]
    NotFound(String),

    #[error("pull failed: {0}")]
    PullFailed(String),

    #[error("build failed: {0}")]
    BuildFailed(String),

    #[error("image in use, cannot remove: {0}")]
    InUse(String),

    #[error("engine error: {0}")]
    Runtime(String),
}
