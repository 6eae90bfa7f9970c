// ABOUTME: Declared properties of a volume node.
// ABOUTME: A declared source adopts an external mount; otherwise a volume is created.

use serde::Deserialize;
use std::collections::BTreeMap;

fn default_mode() -> String {
    "rw".to_string()
}

/// Declared configuration of a volume node.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VolumeProperties {
    /// Volume name; the node's own name when absent.
    pub name: Option<String>,
    pub driver: Option<String>,
    pub driver_opts: BTreeMap<String, String>,
    /// Externally supplied mount source. When present no volume is created
    /// and the source is used verbatim as the mountpoint.
    pub source: Option<String>,
    /// Access mode for containers mounting this volume.
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Path inside the container where this volume is bound.
    pub mount_at: Option<String>,
}

impl Default for VolumeProperties {
    fn default() -> Self {
        Self {
            name: None,
            driver: None,
            driver_opts: BTreeMap::new(),
            source: None,
            mode: default_mode(),
            mount_at: None,
        }
    }
}

impl VolumeProperties {
    pub fn volume_name<'a>(&'a self, node_name: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(node_name)
    }
}
