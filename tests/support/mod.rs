// ABOUTME: Test support utilities.
// ABOUTME: Graph builders and a directory-backed resource loader for integration tests.

// Each test binary only uses some of these helpers.
#![allow(dead_code)]

use serde_json::{Map, Value};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};

use dockhand::build_context::ResourceLoader;
use dockhand::engine::EngineSettings;
use dockhand::graph::NodeInstance;
use dockhand::state::keys;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("dockhand=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Unwrap a `json!({...})` literal into a property map.
pub fn props(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// A bare instance named `name` with instance id `{name}_1`.
pub fn instance(name: &str) -> NodeInstance {
    NodeInstance::new(name, format!("{name}_1"))
}

/// A host instance whose setup already persisted `settings`.
pub fn host_with_settings(name: &str, settings: &EngineSettings) -> Arc<NodeInstance> {
    let host = instance(name);
    host.runtime().set(keys::ENGINE_SETTINGS, settings).unwrap();
    Arc::new(host)
}

/// An image instance whose create already persisted the image id.
pub fn image_with_id(name: &str, image: &str) -> Arc<NodeInstance> {
    let node = instance(name);
    node.runtime().set(keys::IMAGE, &image.to_string()).unwrap();
    Arc::new(node)
}

/// A network instance whose create already persisted id and name.
pub fn network_with_state(name: &str, id: &str, network_name: &str) -> Arc<NodeInstance> {
    let node = instance(name);
    node.runtime()
        .set(keys::NETWORK_ID, &id.to_string())
        .unwrap();
    node.runtime()
        .set(keys::NETWORK_NAME, &network_name.to_string())
        .unwrap();
    Arc::new(node)
}

/// Resource loader resolving declared paths relative to a root directory.
pub struct DirLoader {
    root: PathBuf,
}

impl DirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceLoader for DirLoader {
    fn fetch(&self, path: &str, destination: Option<&Path>) -> io::Result<PathBuf> {
        let source = self.root.join(path);
        if !source.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such resource: {path}"),
            ));
        }
        match destination {
            Some(dest) => {
                if let Some(parent) = dest.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::copy(&source, dest)?;
                Ok(dest.to_path_buf())
            }
            None => Ok(source),
        }
    }
}

/// Resource loader with no resources at all.
pub struct EmptyLoader;

impl ResourceLoader for EmptyLoader {
    fn fetch(&self, path: &str, _destination: Option<&Path>) -> io::Result<PathBuf> {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such resource: {path}"),
        ))
    }
}
