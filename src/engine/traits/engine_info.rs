// ABOUTME: Liveness probe trait for the container engine.
// ABOUTME: Used once at host setup to confirm the endpoint answers.

use super::sealed::Sealed;
use async_trait::async_trait;

/// Engine liveness.
#[async_trait]
pub trait EngineInfo: Sealed + Send + Sync {
    /// Ping the engine; an error means the endpoint is unreachable or unwell.
    async fn ping(&self) -> Result<(), EngineInfoError>;
}

/// Errors from the liveness probe.
#[derive(Debug, thiserror::Error)]
pub enum EngineInfoError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("engine error: {0}")]
    Runtime(String),
}
