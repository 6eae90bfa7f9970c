// ABOUTME: Type-safe identifiers for engine-side resources.
// ABOUTME: Uses phantom types to prevent ID confusion at compile time.

mod id;

pub use id::{ContainerId, ImageId, NetworkId, VolumeId};
