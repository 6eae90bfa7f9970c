// ABOUTME: Container create parameter overrides and the precedence merge.
// ABOUTME: Declared overrides beat base parameters, caller overrides beat both.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::engine::traits::{ContainerSpec, VolumeBinding};

/// Optional per-field overrides for a container create call.
///
/// A `Some` field wholesale-replaces the corresponding base field; there is
/// no deep merge. Overriding one environment variable means supplying the
/// whole environment mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateOverrides {
    pub image: Option<String>,
    pub name: Option<String>,
    pub command: Option<Vec<String>>,
    pub entrypoint: Option<Vec<String>>,
    pub environment: Option<BTreeMap<String, String>>,
    pub ports: Option<BTreeMap<String, Option<u16>>>,
    pub volumes: Option<BTreeMap<String, VolumeBinding>>,
    pub labels: Option<BTreeMap<String, String>>,
    pub user: Option<String>,
    pub working_dir: Option<String>,
}

impl CreateOverrides {
    fn apply(&self, spec: &mut ContainerSpec) {
        if let Some(image) = &self.image {
            spec.image = image.clone();
        }
        if let Some(name) = &self.name {
            spec.name = name.clone();
        }
        if let Some(command) = &self.command {
            spec.command = Some(command.clone());
        }
        if let Some(entrypoint) = &self.entrypoint {
            spec.entrypoint = Some(entrypoint.clone());
        }
        if let Some(environment) = &self.environment {
            spec.environment = environment.clone();
        }
        if let Some(ports) = &self.ports {
            spec.ports = ports.clone();
        }
        if let Some(volumes) = &self.volumes {
            spec.volumes = volumes.clone();
        }
        if let Some(labels) = &self.labels {
            spec.labels = labels.clone();
        }
        if let Some(user) = &self.user {
            spec.user = Some(user.clone());
        }
        if let Some(working_dir) = &self.working_dir {
            spec.working_dir = Some(working_dir.clone());
        }
    }
}

/// Merge creation parameters with documented precedence: base, then declared
/// overrides, then caller overrides. Most specific wins per field.
pub fn merge_parameters(
    mut base: ContainerSpec,
    declared: &CreateOverrides,
    caller: &CreateOverrides,
) -> ContainerSpec {
    declared.apply(&mut base);
    caller.apply(&mut base);
    base
}
