// ABOUTME: Container engine boundary: client factory, capability traits, bollard impl.
// ABOUTME: One engine endpoint per resolved client; nothing is shared across instances.

mod bollard;
pub mod error;
mod factory;
mod settings;
#[doc(hidden)]
pub mod testing;
pub mod traits;

pub use bollard::BollardEngine;
pub use factory::{
    BollardFactory, ClientFactory, OperationContext, SettingsSource, engine_for_instance,
    resolve_engine,
};
pub use settings::{EngineSettings, SettingsOverride, TlsSettings};
