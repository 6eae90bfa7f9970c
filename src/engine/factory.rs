// ABOUTME: Engine client factory and per-instance client resolution.
// ABOUTME: Clients are resolved from explicit settings or a using_docker_host relationship.

use async_trait::async_trait;
use bollard::Docker;
use std::sync::Arc;

use crate::engine::bollard::BollardEngine;
use crate::engine::error::ConnectError;
use crate::engine::settings::EngineSettings;
use crate::engine::traits::Engine;
use crate::error::{Error, Result};
use crate::graph::{NodeInstance, RelationshipKind};
use crate::state::keys;

/// Engine request timeout in seconds.
const CLIENT_TIMEOUT: u64 = 120;

/// Builds a configured engine client from connection settings.
///
/// Each operation resolves its own client; nothing is cached or shared across
/// instances. The factory is a trait so the test suite can substitute a
/// recording double.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn connect(
        &self,
        settings: &EngineSettings,
    ) -> std::result::Result<Arc<dyn Engine>, ConnectError>;
}

/// Production factory backed by bollard.
#[derive(Debug, Default)]
pub struct BollardFactory;

#[async_trait]
impl ClientFactory for BollardFactory {
    async fn connect(
        &self,
        settings: &EngineSettings,
    ) -> std::result::Result<Arc<dyn Engine>, ConnectError> {
        let client = build_client(settings)?;
        Ok(Arc::new(BollardEngine::new(client)))
    }
}

fn build_client(settings: &EngineSettings) -> std::result::Result<Docker, ConnectError> {
    let map_err = |e: bollard::errors::Error| ConnectError::ClientBuild {
        endpoint: settings.endpoint_label(),
        message: e.to_string(),
    };

    match &settings.host {
        None => Docker::connect_with_local_defaults().map_err(map_err),
        Some(host) if host.starts_with("unix://") => {
            Docker::connect_with_unix(host, CLIENT_TIMEOUT, bollard::API_DEFAULT_VERSION)
                .map_err(map_err)
        }
        Some(host) if settings.tls && !settings.tls_settings.is_empty() => {
            let tls = &settings.tls_settings;
            let (Some(key), Some(cert), Some(ca)) =
                (&tls.client_key, &tls.client_cert, &tls.ca_cert)
            else {
                return Err(ConnectError::InvalidSettings {
                    message: format!(
                        "TLS for {} needs ca_cert, client_cert and client_key together",
                        host
                    ),
                });
            };
            Docker::connect_with_ssl(host, key, cert, ca, CLIENT_TIMEOUT, bollard::API_DEFAULT_VERSION)
                .map_err(map_err)
        }
        // TLS enabled with no explicit material: fall back to the system
        // defaults (DOCKER_HOST / DOCKER_CERT_PATH environment).
        Some(_) if settings.tls => Docker::connect_with_ssl_defaults().map_err(map_err),
        Some(host) => Docker::connect_with_http(host, CLIENT_TIMEOUT, bollard::API_DEFAULT_VERSION)
            .map_err(map_err),
    }
}

/// Which side of the current operation supplies connection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSource {
    /// The instance the operation runs on.
    Own,
    /// The source side of a relationship operation.
    Source,
    /// The target side of a relationship operation.
    Target,
}

/// The instances visible to one operation. Node operations carry only the
/// instance itself; relationship operations also carry both edge endpoints.
#[derive(Debug, Clone, Copy)]
pub struct OperationContext<'a> {
    pub instance: &'a NodeInstance,
    pub source: Option<&'a NodeInstance>,
    pub target: Option<&'a NodeInstance>,
}

impl<'a> OperationContext<'a> {
    pub fn node(instance: &'a NodeInstance) -> Self {
        Self {
            instance,
            source: None,
            target: None,
        }
    }

    pub fn relationship(source: &'a NodeInstance, target: &'a NodeInstance) -> Self {
        Self {
            instance: source,
            source: Some(source),
            target: Some(target),
        }
    }

    /// The instance whose relationships supply connection settings.
    pub fn settings_instance(&self, from: SettingsSource) -> Result<&'a NodeInstance> {
        match from {
            SettingsSource::Own => Ok(self.instance),
            SettingsSource::Source => self.source.ok_or(Error::MissingContextSide("source")),
            SettingsSource::Target => self.target.ok_or(Error::MissingContextSide("target")),
        }
    }
}

/// Resolve an engine client for the selected side of an operation context.
pub async fn resolve_engine(
    factory: &dyn ClientFactory,
    ctx: &OperationContext<'_>,
    from: SettingsSource,
) -> Result<Arc<dyn Engine>> {
    engine_for_instance(factory, ctx.settings_instance(from)?).await
}

/// Resolve an engine client from an instance's `using_docker_host`
/// relationships.
///
/// Zero host relationships means the implicit local endpoint. Exactly one
/// means the target host's previously persisted settings are used verbatim;
/// they are never re-derived from declared properties. More than one is a
/// fatal configuration error.
pub async fn engine_for_instance(
    factory: &dyn ClientFactory,
    instance: &NodeInstance,
) -> Result<Arc<dyn Engine>> {
    let hosts = instance.related(RelationshipKind::UsingDockerHost);
    let settings = match hosts.as_slice() {
        [] => EngineSettings::default(),
        [host] => host
            .target()
            .runtime_require::<EngineSettings>(keys::ENGINE_SETTINGS)?,
        other => {
            return Err(Error::RelationshipMultiplicity {
                node: instance.node_name().to_string(),
                kind: RelationshipKind::UsingDockerHost.as_str(),
                found: other.len(),
            });
        }
    };
    Ok(factory.connect(&settings).await?)
}
