// ABOUTME: Declared properties of a container node.
// ABOUTME: Base creation parameters, per-network aliases, and declared overrides.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::lifecycle::CreateOverrides;

/// Declared configuration of a container node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContainerProperties {
    /// Container name; the node's own name when absent.
    pub name: Option<String>,
    pub command: Option<Vec<String>>,
    /// Container port (`"8080"` or `"8080/tcp"`) to host port.
    pub port_bindings: BTreeMap<String, Option<u16>>,
    pub environment: BTreeMap<String, String>,
    pub network_aliases: AliasSpec,
    /// Declared overrides applied on top of the computed base parameters.
    pub additional_create_parameters: CreateOverrides,
}

impl ContainerProperties {
    pub fn container_name<'a>(&'a self, node_name: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(node_name)
    }
}

/// Network aliases for a container, either one list per network name or a
/// single flat list applied to every network.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AliasSpec {
    PerNetwork(BTreeMap<String, Vec<String>>),
    Flat(Vec<String>),
}

impl Default for AliasSpec {
    fn default() -> Self {
        AliasSpec::Flat(Vec::new())
    }
}

impl AliasSpec {
    /// Aliases for one network. An empty resolution falls back to the
    /// instance's own identifier as the sole alias.
    pub fn resolve(&self, network: &str, fallback: &str) -> Vec<String> {
        let aliases = match self {
            AliasSpec::PerNetwork(map) => map.get(network).cloned().unwrap_or_default(),
            AliasSpec::Flat(list) => list.clone(),
        };
        if aliases.is_empty() {
            vec![fallback.to_string()]
        } else {
            aliases
        }
    }
}
