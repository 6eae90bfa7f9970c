// ABOUTME: Typed declared-property structs for each node kind.
// ABOUTME: Deserialized from the graph's immutable property maps via serde.

mod container;
mod host;
mod image;
mod network;
mod volume;

pub use container::{AliasSpec, ContainerProperties};
pub use host::HostProperties;
pub use image::{ImageProperties, ImageSource};
pub use network::NetworkProperties;
pub use volume::VolumeProperties;
