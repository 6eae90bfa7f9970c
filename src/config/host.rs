// ABOUTME: Declared properties of an engine host node.
// ABOUTME: Carries the endpoint address and TLS material for client construction.

use serde::Deserialize;

use crate::engine::{EngineSettings, TlsSettings};

/// Declared connection configuration of a host node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostProperties {
    /// Endpoint address, e.g. `unix:///var/run/docker.sock` or
    /// `tcp://10.0.0.5:2376`. `None` means the local default endpoint.
    pub host: Option<String>,
    pub tls: bool,
    pub tls_settings: TlsSettings,
}

impl HostProperties {
    pub fn settings(&self) -> EngineSettings {
        EngineSettings {
            host: self.host.clone(),
            tls: self.tls,
            tls_settings: self.tls_settings.clone(),
        }
    }
}
