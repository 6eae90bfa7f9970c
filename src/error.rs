// ABOUTME: Crate-wide error type for dockhand lifecycle operations.
// ABOUTME: Configuration errors are fatal; engine errors convert via From.

use thiserror::Error;

use crate::engine::error::ConnectError;
use crate::engine::traits::{ContainerError, ImageError, NetworkError, VolumeError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("{node} needs exactly one {kind} relationship but has {found}")]
    RelationshipMultiplicity {
        node: String,
        kind: &'static str,
        found: usize,
    },

    #[error("unknown relationship kind: {0}")]
    UnknownRelationshipKind(String),

    #[error("invalid properties on {node}: {source}")]
    InvalidProperties {
        node: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing runtime property `{key}` on {node}")]
    MissingRuntimeProperty { node: String, key: &'static str },

    #[error("failed to decode runtime property `{key}`: {source}")]
    StateDecode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode runtime property `{key}`: {source}")]
    StateEncode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{node} declares neither a repository nor a dockerfile image source")]
    MissingImageSource { node: String },

    #[error("image {name} was built but the engine reports no identifier")]
    BuildProducedNoImage { name: String },

    #[error("network {0} already exists")]
    NetworkAlreadyExists(String),

    #[error("external network {0} does not exist")]
    ExternalNetworkMissing(String),

    #[error("peer connection networks collide with declared networks: {names:?}")]
    NetworkNameCollision { names: Vec<String> },

    #[error("volume node {node} declares no mount_at path")]
    MissingMountPath { node: String },

    #[error("operation context has no {0} side")]
    MissingContextSide(&'static str),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Volume(#[from] VolumeError),

    #[error("failed to fetch build resource {path}: {source}")]
    Resource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
