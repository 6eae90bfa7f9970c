// ABOUTME: Kind-tagged directed edges between node instances.
// ABOUTME: Relationship kinds form a closed enum mapped from the host's dotted type names.

use std::str::FromStr;
use std::sync::Arc;

use crate::error::Error;
use crate::graph::NodeInstance;

/// The closed set of relationship kinds this adapter understands.
///
/// The orchestration host tags edges with dotted type-hierarchy strings;
/// integration code maps those onto this enum via [`FromStr`]. An edge whose
/// hierarchy carries none of these kinds is a configuration error at the
/// integration boundary, not something handled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    UsingDockerHost,
    ConnectedToContainer,
    ConnectedToVolume,
    ConnectedToNetwork,
    FromImage,
}

impl RelationshipKind {
    /// The host-side type name for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipKind::UsingDockerHost => "docker.using_docker_host",
            RelationshipKind::ConnectedToContainer => "docker.container_connected_to_container",
            RelationshipKind::ConnectedToVolume => "docker.container_connected_to_volume",
            RelationshipKind::ConnectedToNetwork => "docker.container_connected_to_network",
            RelationshipKind::FromImage => "docker.container_from_image",
        }
    }
}

impl FromStr for RelationshipKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "docker.using_docker_host" => Ok(RelationshipKind::UsingDockerHost),
            "docker.container_connected_to_container" => Ok(RelationshipKind::ConnectedToContainer),
            "docker.container_connected_to_volume" => Ok(RelationshipKind::ConnectedToVolume),
            "docker.container_connected_to_network" => Ok(RelationshipKind::ConnectedToNetwork),
            "docker.container_from_image" => Ok(RelationshipKind::FromImage),
            other => Err(Error::UnknownRelationshipKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed edge from the owning instance to `target`.
///
/// An edge may carry more than one kind (the host models kinds as a
/// hierarchy), so matching is containment, not equality.
#[derive(Debug, Clone)]
pub struct Relationship {
    kinds: Vec<RelationshipKind>,
    target: Arc<NodeInstance>,
}

impl Relationship {
    pub fn new(kinds: Vec<RelationshipKind>, target: Arc<NodeInstance>) -> Self {
        Self { kinds, target }
    }

    pub fn has_kind(&self, kind: RelationshipKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn kinds(&self) -> &[RelationshipKind] {
        &self.kinds
    }

    pub fn target(&self) -> &Arc<NodeInstance> {
        &self.target
    }
}
