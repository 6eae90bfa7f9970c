// ABOUTME: Declared properties of a network node.
// ABOUTME: External networks are adopted, internal ones created and owned.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Declared configuration of a network node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NetworkProperties {
    /// Network name; the node's own name when absent.
    pub name: Option<String>,
    /// `true` adopts a pre-existing network and never deletes it.
    pub external: bool,
    pub driver: Option<String>,
    pub options: BTreeMap<String, String>,
}

impl NetworkProperties {
    pub fn network_name<'a>(&'a self, node_name: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(node_name)
    }
}
