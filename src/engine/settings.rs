// ABOUTME: Engine connection descriptor: endpoint address and TLS material.
// ABOUTME: Settings are merged once per call and never mutated after a client is built.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Connection parameters for one engine endpoint.
///
/// The default value (`host: None`, no TLS) is the implicit local endpoint
/// used when an instance declares no `using_docker_host` relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Endpoint address (`tcp://host:port` or `unix:///path`); `None` means
    /// the local default socket.
    #[serde(default)]
    pub host: Option<String>,

    /// Whether to speak TLS. With empty [`TlsSettings`] this means "TLS with
    /// system defaults" and is passed through as-is.
    #[serde(default)]
    pub tls: bool,

    #[serde(default)]
    pub tls_settings: TlsSettings,
}

impl EngineSettings {
    /// Apply caller overrides, most specific wins per field.
    pub fn merged(&self, overrides: &SettingsOverride) -> EngineSettings {
        EngineSettings {
            host: overrides.host.clone().or_else(|| self.host.clone()),
            tls: overrides.tls.unwrap_or(self.tls),
            tls_settings: overrides
                .tls_settings
                .clone()
                .unwrap_or_else(|| self.tls_settings.clone()),
        }
    }

    /// Human-readable endpoint label for error messages.
    pub fn endpoint_label(&self) -> String {
        self.host
            .clone()
            .unwrap_or_else(|| "local engine".to_string())
    }
}

/// TLS material for an engine endpoint. All-empty means "use system defaults"
/// when TLS is enabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TlsSettings {
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,

    #[serde(default)]
    pub client_cert: Option<PathBuf>,

    #[serde(default)]
    pub client_key: Option<PathBuf>,
}

impl TlsSettings {
    pub fn is_empty(&self) -> bool {
        self.ca_cert.is_none() && self.client_cert.is_none() && self.client_key.is_none()
    }
}

/// Per-call overrides for [`EngineSettings`]; `None` fields keep the declared
/// value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SettingsOverride {
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub tls: Option<bool>,

    #[serde(default)]
    pub tls_settings: Option<TlsSettings>,
}
