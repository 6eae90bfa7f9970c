// ABOUTME: In-memory engine and factory doubles used by the test suite.
// ABOUTME: Record every call so tests can assert exact sequences and parameters.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::engine::error::ConnectError;
use crate::engine::traits::sealed::Sealed;
use crate::engine::traits::{
    ContainerError, ContainerOps, ContainerSpec, ContainerView, EndpointView, Engine, EngineInfo,
    EngineInfoError, ImageError, ImageOps, NetworkError, NetworkOps, NetworkSpec, NetworkView,
    VolumeError, VolumeOps, VolumeSpec, VolumeView,
};
use crate::engine::{ClientFactory, EngineSettings};
use crate::types::{ContainerId, ImageId, NetworkId, VolumeId};

/// One recorded engine call, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Ping,
    ResolveImage(String),
    PullImage(String),
    BuildImage(String),
    RemoveImage(String),
    CreateContainer(ContainerSpec),
    StartContainer(String),
    StopContainer(String),
    RemoveContainer(String),
    InspectContainer(String),
    InspectNetwork(String),
    CreateNetwork(NetworkSpec),
    RemoveNetwork(String),
    ConnectContainer {
        network: String,
        container: String,
        aliases: Vec<String>,
    },
    DisconnectContainer {
        network: String,
        container: String,
    },
    InspectVolume(String),
    CreateVolume(VolumeSpec),
    RemoveVolume(String),
}

#[derive(Debug, Clone)]
struct FakeNetwork {
    id: String,
    name: String,
}

#[derive(Debug, Clone)]
struct FakeAttachment {
    network_id: String,
    ip: Option<String>,
    aliases: Vec<String>,
}

#[derive(Debug, Clone)]
struct FakeContainer {
    id: String,
    name: String,
    running: bool,
    /// Network name to attachment.
    attachments: BTreeMap<String, FakeAttachment>,
}

#[derive(Debug, Default)]
struct FakeState {
    images: BTreeMap<String, String>,
    networks: Vec<FakeNetwork>,
    containers: Vec<FakeContainer>,
    volumes: BTreeMap<String, String>,
    next_id: u64,
    next_ip: u64,
    builds_produce_no_image: bool,
    ping_fails: bool,
}

impl FakeState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn next_ip(&mut self) -> String {
        self.next_ip += 1;
        format!("172.18.0.{}", self.next_ip + 1)
    }

    fn network(&self, name_or_id: &str) -> Option<FakeNetwork> {
        self.networks
            .iter()
            .find(|n| n.id == name_or_id || n.name == name_or_id)
            .cloned()
    }

    fn container_index(&self, id_or_name: &str) -> Option<usize> {
        self.containers
            .iter()
            .position(|c| c.id == id_or_name || c.name == id_or_name)
    }
}

/// In-memory engine double with seedable state.
#[derive(Debug, Default)]
pub struct FakeEngine {
    calls: Mutex<Vec<EngineCall>>,
    state: Mutex<FakeState>,
}

impl FakeEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().push(call);
    }

    /// Make subsequent builds succeed without registering an image, to mimic
    /// an engine that reports a build with no identifier.
    pub fn builds_produce_no_image(&self) {
        self.state.lock().builds_produce_no_image = true;
    }

    pub fn ping_fails(&self) {
        self.state.lock().ping_fails = true;
    }

    pub fn seed_image(&self, reference: &str, id: &str) {
        self.state
            .lock()
            .images
            .insert(reference.to_string(), id.to_string());
    }

    pub fn seed_network(&self, name: &str) -> NetworkId {
        let mut state = self.state.lock();
        let id = state.next_id("net");
        state.networks.push(FakeNetwork {
            id: id.clone(),
            name: name.to_string(),
        });
        NetworkId::new(id)
    }

    pub fn seed_container(&self, name: &str, running: bool) -> ContainerId {
        let mut state = self.state.lock();
        let id = state.next_id("ctr");
        state.containers.push(FakeContainer {
            id: id.clone(),
            name: name.to_string(),
            running,
            attachments: BTreeMap::new(),
        });
        ContainerId::new(id)
    }

    /// Forget a container, as if something outside this system removed it.
    pub fn drop_container(&self, id: &ContainerId) {
        let mut state = self.state.lock();
        if let Some(index) = state.container_index(id.as_str()) {
            state.containers.remove(index);
        }
    }

    pub fn has_network(&self, id: &NetworkId) -> bool {
        self.state.lock().network(id.as_str()).is_some()
    }

    pub fn has_container(&self, id: &ContainerId) -> bool {
        self.state.lock().container_index(id.as_str()).is_some()
    }

    pub fn has_volume(&self, name: &str) -> bool {
        self.state.lock().volumes.contains_key(name)
    }
}

impl Sealed for FakeEngine {}

#[async_trait]
impl EngineInfo for FakeEngine {
    async fn ping(&self) -> Result<(), EngineInfoError> {
        self.record(EngineCall::Ping);
        if self.state.lock().ping_fails {
            return Err(EngineInfoError::ConnectionFailed(
                "no response from engine".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ImageOps for FakeEngine {
    async fn resolve_image(&self, reference: &str) -> Result<Option<ImageId>, ImageError> {
        self.record(EngineCall::ResolveImage(reference.to_string()));
        Ok(self
            .state
            .lock()
            .images
            .get(reference)
            .cloned()
            .map(ImageId::new))
    }

    async fn pull_image(&self, reference: &str) -> Result<(), ImageError> {
        self.record(EngineCall::PullImage(reference.to_string()));
        self.state
            .lock()
            .images
            .insert(reference.to_string(), format!("sha256:pulled-{}", reference));
        Ok(())
    }

    async fn build_image(&self, tag: &str, _context: &Path) -> Result<(), ImageError> {
        self.record(EngineCall::BuildImage(tag.to_string()));
        let mut state = self.state.lock();
        if !state.builds_produce_no_image {
            state
                .images
                .insert(tag.to_string(), format!("sha256:built-{}", tag));
        }
        Ok(())
    }

    async fn remove_image(&self, image: &ImageId, _force: bool) -> Result<(), ImageError> {
        self.record(EngineCall::RemoveImage(image.to_string()));
        let mut state = self.state.lock();
        let reference = state
            .images
            .iter()
            .find(|(_, id)| id.as_str() == image.as_str())
            .map(|(r, _)| r.clone());
        match reference {
            Some(reference) => {
                state.images.remove(&reference);
                Ok(())
            }
            None => Err(ImageError::NotFound(image.to_string())),
        }
    }
}

#[async_trait]
impl ContainerOps for FakeEngine {
    async fn create_container(&self, spec: &ContainerSpec) -> Result<ContainerId, ContainerError> {
        self.record(EngineCall::CreateContainer(spec.clone()));
        let mut state = self.state.lock();
        if state.container_index(&spec.name).is_some() {
            return Err(ContainerError::AlreadyExists(spec.name.clone()));
        }
        let id = state.next_id("ctr");
        state.containers.push(FakeContainer {
            id: id.clone(),
            name: spec.name.clone(),
            running: false,
            attachments: BTreeMap::new(),
        });
        Ok(ContainerId::new(id))
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.record(EngineCall::StartContainer(id.to_string()));
        let mut state = self.state.lock();
        let Some(index) = state.container_index(id.as_str()) else {
            return Err(ContainerError::NotFound(id.to_string()));
        };
        state.containers[index].running = true;
        // Addresses are assigned at start time, as the real engine does.
        let mut pending: Vec<String> = state.containers[index]
            .attachments
            .iter()
            .filter(|(_, a)| a.ip.is_none())
            .map(|(name, _)| name.clone())
            .collect();
        pending.sort();
        for name in pending {
            let ip = state.next_ip();
            let container = &mut state.containers[index];
            if let Some(attachment) = container.attachments.get_mut(&name) {
                attachment.ip = Some(ip);
            }
        }
        Ok(())
    }

    async fn stop_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.record(EngineCall::StopContainer(id.to_string()));
        let mut state = self.state.lock();
        let Some(index) = state.container_index(id.as_str()) else {
            return Err(ContainerError::NotFound(id.to_string()));
        };
        state.containers[index].running = false;
        Ok(())
    }

    async fn remove_container(&self, id: &ContainerId, _force: bool) -> Result<(), ContainerError> {
        self.record(EngineCall::RemoveContainer(id.to_string()));
        let mut state = self.state.lock();
        let Some(index) = state.container_index(id.as_str()) else {
            return Err(ContainerError::NotFound(id.to_string()));
        };
        state.containers.remove(index);
        Ok(())
    }

    async fn inspect_container(&self, id: &ContainerId) -> Result<ContainerView, ContainerError> {
        self.record(EngineCall::InspectContainer(id.to_string()));
        let state = self.state.lock();
        let Some(index) = state.container_index(id.as_str()) else {
            return Err(ContainerError::NotFound(id.to_string()));
        };
        let container = &state.containers[index];
        let networks = container
            .attachments
            .iter()
            .map(|(name, attachment)| {
                (
                    name.clone(),
                    EndpointView {
                        network_id: attachment.network_id.clone(),
                        ip_address: attachment.ip.clone().unwrap_or_default(),
                        aliases: attachment.aliases.clone(),
                    },
                )
            })
            .collect();
        Ok(ContainerView {
            id: ContainerId::new(container.id.clone()),
            name: container.name.clone(),
            networks,
        })
    }
}

#[async_trait]
impl NetworkOps for FakeEngine {
    async fn inspect_network(&self, name_or_id: &str) -> Result<NetworkView, NetworkError> {
        self.record(EngineCall::InspectNetwork(name_or_id.to_string()));
        self.state
            .lock()
            .network(name_or_id)
            .map(|n| NetworkView {
                id: NetworkId::new(n.id),
                name: n.name,
            })
            .ok_or_else(|| NetworkError::NotFound(name_or_id.to_string()))
    }

    async fn create_network(&self, spec: &NetworkSpec) -> Result<NetworkId, NetworkError> {
        self.record(EngineCall::CreateNetwork(spec.clone()));
        let mut state = self.state.lock();
        let id = state.next_id("net");
        state.networks.push(FakeNetwork {
            id: id.clone(),
            name: spec.name.clone(),
        });
        Ok(NetworkId::new(id))
    }

    async fn remove_network(&self, id: &NetworkId) -> Result<(), NetworkError> {
        self.record(EngineCall::RemoveNetwork(id.to_string()));
        let mut state = self.state.lock();
        let Some(index) = state.networks.iter().position(|n| n.id == id.as_str()) else {
            return Err(NetworkError::NotFound(id.to_string()));
        };
        state.networks.remove(index);
        Ok(())
    }

    async fn connect_container(
        &self,
        network: &NetworkId,
        container: &ContainerId,
        aliases: &[String],
    ) -> Result<(), NetworkError> {
        self.record(EngineCall::ConnectContainer {
            network: network.to_string(),
            container: container.to_string(),
            aliases: aliases.to_vec(),
        });
        let mut state = self.state.lock();
        let Some(net) = state.network(network.as_str()) else {
            return Err(NetworkError::NotFound(network.to_string()));
        };
        let Some(index) = state.container_index(container.as_str()) else {
            return Err(NetworkError::Runtime(format!(
                "no such container: {}",
                container
            )));
        };
        // Running containers get an address immediately, created ones at start.
        let ip = if state.containers[index].running {
            Some(state.next_ip())
        } else {
            None
        };
        state.containers[index].attachments.insert(
            net.name.clone(),
            FakeAttachment {
                network_id: net.id,
                ip,
                aliases: aliases.to_vec(),
            },
        );
        Ok(())
    }

    async fn disconnect_container(
        &self,
        network: &NetworkId,
        container: &ContainerId,
    ) -> Result<(), NetworkError> {
        self.record(EngineCall::DisconnectContainer {
            network: network.to_string(),
            container: container.to_string(),
        });
        let mut state = self.state.lock();
        let Some(net) = state.network(network.as_str()) else {
            return Err(NetworkError::NotFound(network.to_string()));
        };
        let Some(index) = state.container_index(container.as_str()) else {
            return Err(NetworkError::NotConnected(container.to_string()));
        };
        state.containers[index].attachments.remove(&net.name);
        Ok(())
    }
}

#[async_trait]
impl VolumeOps for FakeEngine {
    async fn inspect_volume(&self, name: &str) -> Result<VolumeView, VolumeError> {
        self.record(EngineCall::InspectVolume(name.to_string()));
        self.state
            .lock()
            .volumes
            .get(name)
            .map(|mountpoint| VolumeView {
                name: VolumeId::new(name.to_string()),
                mountpoint: mountpoint.clone(),
            })
            .ok_or_else(|| VolumeError::NotFound(name.to_string()))
    }

    async fn create_volume(&self, spec: &VolumeSpec) -> Result<VolumeView, VolumeError> {
        self.record(EngineCall::CreateVolume(spec.clone()));
        let mountpoint = format!("/var/lib/docker/volumes/{}/_data", spec.name);
        self.state
            .lock()
            .volumes
            .insert(spec.name.clone(), mountpoint.clone());
        Ok(VolumeView {
            name: VolumeId::new(spec.name.clone()),
            mountpoint,
        })
    }

    async fn remove_volume(&self, id: &VolumeId, _force: bool) -> Result<(), VolumeError> {
        self.record(EngineCall::RemoveVolume(id.to_string()));
        match self.state.lock().volumes.remove(id.as_str()) {
            Some(_) => Ok(()),
            None => Err(VolumeError::NotFound(id.to_string())),
        }
    }
}

/// Factory double: records every connect and routes per endpoint address.
#[derive(Debug)]
pub struct FakeFactory {
    default: Arc<FakeEngine>,
    routes: Mutex<BTreeMap<String, Arc<FakeEngine>>>,
    connects: Mutex<Vec<EngineSettings>>,
}

impl FakeFactory {
    /// Every connect, regardless of settings, yields `engine`.
    pub fn single(engine: Arc<FakeEngine>) -> Self {
        Self {
            default: engine,
            routes: Mutex::new(BTreeMap::new()),
            connects: Mutex::new(Vec::new()),
        }
    }

    /// Route connects for a specific endpoint address to a different engine.
    pub fn route(&self, host: &str, engine: Arc<FakeEngine>) {
        self.routes.lock().insert(host.to_string(), engine);
    }

    /// Settings seen by every connect call, in order.
    pub fn connects(&self) -> Vec<EngineSettings> {
        self.connects.lock().clone()
    }
}

#[async_trait]
impl ClientFactory for FakeFactory {
    async fn connect(
        &self,
        settings: &EngineSettings,
    ) -> std::result::Result<Arc<dyn Engine>, ConnectError> {
        self.connects.lock().push(settings.clone());
        let engine = settings
            .host
            .as_ref()
            .and_then(|host| self.routes.lock().get(host).cloned())
            .unwrap_or_else(|| self.default.clone());
        Ok(engine)
    }
}
