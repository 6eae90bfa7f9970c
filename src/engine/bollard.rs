// ABOUTME: Bollard-based engine implementation behind the capability traits.
// ABOUTME: Maps engine-agnostic specs onto the Docker HTTP API wire types.

use crate::engine::traits::sealed::Sealed;
use crate::engine::traits::{
    ContainerError, ContainerOps, ContainerSpec, ContainerView, EndpointView, EngineInfo,
    EngineInfoError, ImageError, ImageOps, NetworkError, NetworkOps, NetworkSpec, NetworkView,
    VolumeError, VolumeOps, VolumeSpec, VolumeView,
};
use crate::types::{ContainerId, ImageId, NetworkId, VolumeId};
use async_trait::async_trait;
use bollard::Docker;
use bollard::models::{
    EndpointSettings, HostConfig, NetworkConnectRequest, NetworkCreateRequest,
    NetworkDisconnectRequest, PortBinding, VolumeCreateRequest,
};
use bollard::query_parameters::{
    BuildImageOptions, CreateContainerOptions, CreateImageOptions, InspectContainerOptions,
    InspectNetworkOptions, RemoveContainerOptions, RemoveImageOptions, RemoveVolumeOptions,
    StopContainerOptions,
};
use bytes::Bytes;
use futures::StreamExt;
use http_body_util::{Either, Full};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_image_pull_error(e: bollard::errors::Error, reference: &str) -> ImageError {
    ImageError::PullFailed(format!("{}: {}", reference, e))
}

fn map_image_remove_error(e: bollard::errors::Error, image: &str) -> ImageError {
    match &e {
        bollard::errors::Error::DockerResponseServerError { status_code, .. }
            if *status_code == 404 =>
        {
            ImageError::NotFound(image.to_string())
        }
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 409 => ImageError::InUse(message.clone()),
        _ => ImageError::Runtime(format!("failed to remove {}: {}", image, e)),
    }
}

fn map_container_create_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::ImageNotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 409 => ContainerError::AlreadyExists(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_container_start_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 304 => ContainerError::AlreadyRunning(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_container_stop_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 304 => ContainerError::NotRunning(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_container_not_found_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_network_not_found_error(e: bollard::errors::Error) -> NetworkError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => NetworkError::NotFound(message.clone()),
        _ => NetworkError::Runtime(e.to_string()),
    }
}

fn map_network_create_error(e: bollard::errors::Error) -> NetworkError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 409 => NetworkError::AlreadyExists(message.clone()),
        _ => NetworkError::Runtime(e.to_string()),
    }
}

fn map_network_remove_error(e: bollard::errors::Error) -> NetworkError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => NetworkError::NotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 403 => NetworkError::InUse(message.clone()),
        _ => NetworkError::Runtime(e.to_string()),
    }
}

fn map_network_disconnect_error(e: bollard::errors::Error) -> NetworkError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => NetworkError::NotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 403 => NetworkError::NotConnected(message.clone()),
        _ => NetworkError::Runtime(e.to_string()),
    }
}

fn map_volume_not_found_error(e: bollard::errors::Error, name: &str) -> VolumeError {
    match &e {
        bollard::errors::Error::DockerResponseServerError { status_code, .. }
            if *status_code == 404 =>
        {
            VolumeError::NotFound(name.to_string())
        }
        _ => VolumeError::Runtime(e.to_string()),
    }
}

fn map_volume_remove_error(e: bollard::errors::Error, name: &str) -> VolumeError {
    match &e {
        bollard::errors::Error::DockerResponseServerError { status_code, .. }
            if *status_code == 404 =>
        {
            VolumeError::NotFound(name.to_string())
        }
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 409 => VolumeError::InUse(message.clone()),
        _ => VolumeError::Runtime(e.to_string()),
    }
}

// =============================================================================
// BollardEngine
// =============================================================================

/// Engine implementation using bollard against one Docker endpoint.
#[derive(Debug)]
pub struct BollardEngine {
    client: Docker,
}

impl BollardEngine {
    /// Create a new BollardEngine from a Docker client.
    pub fn new(client: Docker) -> Self {
        Self { client }
    }
}

/// Tar up a build-context directory into an in-memory archive.
fn archive_context(context: &Path) -> std::io::Result<Bytes> {
    let mut builder = tar::Builder::new(Vec::new());
    builder.append_dir_all(".", context)?;
    Ok(Bytes::from(builder.into_inner()?))
}

// Implement Sealed trait to allow engine trait implementations
impl Sealed for BollardEngine {}

#[async_trait]
impl EngineInfo for BollardEngine {
    async fn ping(&self) -> Result<(), EngineInfoError> {
        self.client
            .ping()
            .await
            .map_err(|e| EngineInfoError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ImageOps for BollardEngine {
    async fn resolve_image(&self, reference: &str) -> Result<Option<ImageId>, ImageError> {
        match self.client.inspect_image(reference).await {
            Ok(details) => Ok(details.id.map(ImageId::new)),
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => Ok(None),
            Err(e) => Err(ImageError::Runtime(format!(
                "failed to inspect {}: {}",
                reference, e
            ))),
        }
    }

    async fn pull_image(&self, reference: &str) -> Result<(), ImageError> {
        let opts = CreateImageOptions {
            from_image: Some(reference.to_string()),
            ..Default::default()
        };

        // Pull returns a stream of progress updates - consume it
        let mut stream = self.client.create_image(Some(opts), None, None);
        while let Some(result) = stream.next().await {
            result.map_err(|e| map_image_pull_error(e, reference))?;
        }

        Ok(())
    }

    async fn build_image(&self, tag: &str, context: &Path) -> Result<(), ImageError> {
        let archive = archive_context(context).map_err(|e| {
            ImageError::BuildFailed(format!("failed to archive build context: {}", e))
        })?;

        let opts = BuildImageOptions {
            t: Some(tag.to_string()),
            rm: true,
            forcerm: true,
            ..Default::default()
        };

        let body = Either::Left(Full::new(archive));
        let mut stream = self.client.build_image(opts, None, Some(body));

        while let Some(result) = stream.next().await {
            let info = result.map_err(|e| ImageError::BuildFailed(format!("{}: {}", tag, e)))?;
            if let Some(error) = info.error_detail.and_then(|d| d.message) {
                return Err(ImageError::BuildFailed(format!("{}: {}", tag, error)));
            }
        }

        Ok(())
    }

    async fn remove_image(&self, image: &ImageId, force: bool) -> Result<(), ImageError> {
        let opts = RemoveImageOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_image(image.as_str(), Some(opts), None)
            .await
            .map_err(|e| map_image_remove_error(e, image.as_str()))?;

        Ok(())
    }
}

#[async_trait]
impl ContainerOps for BollardEngine {
    async fn create_container(&self, spec: &ContainerSpec) -> Result<ContainerId, ContainerError> {
        let env: Vec<String> = spec
            .environment
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();

        // Mount sources bind as "{source}:{target}:{mode}" strings.
        let binds: Vec<String> = spec
            .volumes
            .iter()
            .map(|(source, binding)| format!("{}:{}:{}", source, binding.bind, binding.mode))
            .collect();

        let mut port_bindings: HashMap<String, Option<Vec<PortBinding>>> = HashMap::new();
        let mut exposed_ports: Vec<String> = Vec::new();
        for (port, host_port) in &spec.ports {
            let port_key = if port.contains('/') {
                port.clone()
            } else {
                format!("{}/tcp", port)
            };

            exposed_ports.push(port_key.clone());
            port_bindings.insert(
                port_key,
                Some(vec![PortBinding {
                    host_ip: None,
                    host_port: host_port.map(|p| p.to_string()),
                }]),
            );
        }

        let host_config = HostConfig {
            binds: if binds.is_empty() { None } else { Some(binds) },
            port_bindings: if port_bindings.is_empty() {
                None
            } else {
                Some(port_bindings)
            },
            ..Default::default()
        };

        let labels: HashMap<String, String> = spec
            .labels
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let body = bollard::models::ContainerCreateBody {
            image: Some(spec.image.clone()),
            cmd: spec.command.clone(),
            entrypoint: spec.entrypoint.clone(),
            env: if env.is_empty() { None } else { Some(env) },
            labels: if labels.is_empty() {
                None
            } else {
                Some(labels)
            },
            user: spec.user.clone(),
            working_dir: spec.working_dir.clone(),
            exposed_ports: if exposed_ports.is_empty() {
                None
            } else {
                Some(exposed_ports)
            },
            host_config: Some(host_config),
            ..Default::default()
        };

        let opts = CreateContainerOptions {
            name: Some(spec.name.clone()),
            ..Default::default()
        };

        let response = self
            .client
            .create_container(Some(opts), body)
            .await
            .map_err(map_container_create_error)?;

        Ok(ContainerId::new(response.id))
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.client
            .start_container(
                id.as_str(),
                None::<bollard::query_parameters::StartContainerOptions>,
            )
            .await
            .map_err(map_container_start_error)
    }

    async fn stop_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.client
            .stop_container(id.as_str(), None::<StopContainerOptions>)
            .await
            .map_err(map_container_stop_error)
    }

    async fn remove_container(&self, id: &ContainerId, force: bool) -> Result<(), ContainerError> {
        let opts = RemoveContainerOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_container(id.as_str(), Some(opts))
            .await
            .map_err(map_container_not_found_error)?;

        Ok(())
    }

    async fn inspect_container(&self, id: &ContainerId) -> Result<ContainerView, ContainerError> {
        let details = self
            .client
            .inspect_container(id.as_str(), None::<InspectContainerOptions>)
            .await
            .map_err(map_container_not_found_error)?;

        let mut networks = BTreeMap::new();
        if let Some(ref network_settings) = details.network_settings
            && let Some(ref nets) = network_settings.networks
        {
            for (name, endpoint) in nets {
                networks.insert(
                    name.clone(),
                    EndpointView {
                        network_id: endpoint.network_id.clone().unwrap_or_default(),
                        ip_address: endpoint.ip_address.clone().unwrap_or_default(),
                        aliases: endpoint.aliases.clone().unwrap_or_default(),
                    },
                );
            }
        }

        Ok(ContainerView {
            id: id.clone(),
            name: details
                .name
                .unwrap_or_default()
                .trim_start_matches('/')
                .to_string(),
            networks,
        })
    }
}

#[async_trait]
impl NetworkOps for BollardEngine {
    async fn inspect_network(&self, name_or_id: &str) -> Result<NetworkView, NetworkError> {
        let network = self
            .client
            .inspect_network(name_or_id, None::<InspectNetworkOptions>)
            .await
            .map_err(map_network_not_found_error)?;

        Ok(NetworkView {
            id: NetworkId::new(network.id.unwrap_or_default()),
            name: network.name.unwrap_or_else(|| name_or_id.to_string()),
        })
    }

    async fn create_network(&self, spec: &NetworkSpec) -> Result<NetworkId, NetworkError> {
        let options: HashMap<String, String> = spec
            .options
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let request = NetworkCreateRequest {
            name: spec.name.clone(),
            driver: spec.driver.clone(),
            options: if options.is_empty() {
                None
            } else {
                Some(options)
            },
            ..Default::default()
        };

        let response = self
            .client
            .create_network(request)
            .await
            .map_err(map_network_create_error)?;

        Ok(NetworkId::new(response.id))
    }

    async fn remove_network(&self, id: &NetworkId) -> Result<(), NetworkError> {
        self.client
            .remove_network(id.as_str())
            .await
            .map_err(map_network_remove_error)
    }

    async fn connect_container(
        &self,
        network: &NetworkId,
        container: &ContainerId,
        aliases: &[String],
    ) -> Result<(), NetworkError> {
        let request = NetworkConnectRequest {
            container: container.to_string(),
            endpoint_config: Some(EndpointSettings {
                aliases: if aliases.is_empty() {
                    None
                } else {
                    Some(aliases.to_vec())
                },
                ..Default::default()
            }),
        };

        self.client
            .connect_network(network.as_str(), request)
            .await
            .map_err(map_network_not_found_error)
    }

    async fn disconnect_container(
        &self,
        network: &NetworkId,
        container: &ContainerId,
    ) -> Result<(), NetworkError> {
        let request = NetworkDisconnectRequest {
            container: container.to_string(),
            force: Some(false),
        };

        self.client
            .disconnect_network(network.as_str(), request)
            .await
            .map_err(map_network_disconnect_error)
    }
}

#[async_trait]
impl VolumeOps for BollardEngine {
    async fn inspect_volume(&self, name: &str) -> Result<VolumeView, VolumeError> {
        let volume = self
            .client
            .inspect_volume(name)
            .await
            .map_err(|e| map_volume_not_found_error(e, name))?;

        Ok(VolumeView {
            name: VolumeId::new(volume.name),
            mountpoint: volume.mountpoint,
        })
    }

    async fn create_volume(&self, spec: &VolumeSpec) -> Result<VolumeView, VolumeError> {
        let driver_opts: HashMap<String, String> = spec
            .driver_opts
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let options = VolumeCreateRequest {
            name: Some(spec.name.clone()),
            driver: spec.driver.clone(),
            driver_opts: if driver_opts.is_empty() {
                None
            } else {
                Some(driver_opts)
            },
            ..Default::default()
        };

        let volume = self
            .client
            .create_volume(options)
            .await
            .map_err(|e| VolumeError::Runtime(e.to_string()))?;

        Ok(VolumeView {
            name: VolumeId::new(volume.name),
            mountpoint: volume.mountpoint,
        })
    }

    async fn remove_volume(&self, id: &VolumeId, force: bool) -> Result<(), VolumeError> {
        let opts = RemoveVolumeOptions { force };

        self.client
            .remove_volume(id.as_str(), Some(opts))
            .await
            .map_err(|e| map_volume_remove_error(e, id.as_str()))
    }
}
