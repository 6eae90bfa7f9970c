// ABOUTME: Engine connection errors with SNAFU pattern.
// ABOUTME: Unifies settings validation and transport failures for programmatic handling.

use snafu::Snafu;

/// Unified error for building or probing an engine client.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConnectError {
    #[snafu(display("invalid engine connection settings: {message}"))]
    InvalidSettings { message: String },

    #[snafu(display("failed to build engine client for {endpoint}: {message}"))]
    ClientBuild { endpoint: String, message: String },

    #[snafu(display("engine at {endpoint} is unreachable: {message}"))]
    Unreachable { endpoint: String, message: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectErrorKind {
    /// The merged settings cannot describe a client (e.g. partial TLS material).
    InvalidSettings,
    /// The client could not be constructed from the settings.
    ClientBuild,
    /// The client was built but the liveness probe failed.
    Unreachable,
}

impl ConnectError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ConnectErrorKind {
        match self {
            ConnectError::InvalidSettings { .. } => ConnectErrorKind::InvalidSettings,
            ConnectError::ClientBuild { .. } => ConnectErrorKind::ClientBuild,
            ConnectError::Unreachable { .. } => ConnectErrorKind::Unreachable,
        }
    }
}
