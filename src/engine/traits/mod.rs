// ABOUTME: Composable capability traits for the container engine boundary.
// ABOUTME: Defines ImageOps, ContainerOps, NetworkOps, VolumeOps, EngineInfo.

mod container;
mod engine_info;
mod image;
mod network;
pub(crate) mod sealed;
mod shared_types;
mod volume;

pub use container::{ContainerError, ContainerOps};
pub use engine_info::{EngineInfo, EngineInfoError};
pub use image::{ImageError, ImageOps};
pub use network::{NetworkError, NetworkOps};
pub use shared_types::*;
pub use volume::{VolumeError, VolumeOps};

/// The full engine surface a lifecycle operation works against.
///
/// Everything is behind one object so a resolved client can be handed around
/// as `Arc<dyn Engine>` regardless of which capability an operation needs.
pub trait Engine:
    ImageOps + ContainerOps + NetworkOps + VolumeOps + EngineInfo + Send + Sync + std::fmt::Debug
{
}

impl<T> Engine for T where
    T: ImageOps + ContainerOps + NetworkOps + VolumeOps + EngineInfo + Send + Sync + std::fmt::Debug
{
}
