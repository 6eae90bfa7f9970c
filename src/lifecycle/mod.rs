// ABOUTME: Lifecycle operations exposed to the orchestration host.
// ABOUTME: One function per transition; each resolves its own engine client.

mod container;
mod host;
mod image;
mod network;
mod params;
mod peers;
mod volume;

pub use container::{create_container, delete_container, start_container, stop_container};
pub use host::setup_host;
pub use image::{create_image, delete_image};
pub use network::{create_network, delete_network};
pub use params::{CreateOverrides, merge_parameters};
pub use volume::{create_volume, delete_volume};
