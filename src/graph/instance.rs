// ABOUTME: A single runtime occurrence of a declared orchestration-graph node.
// ABOUTME: Bundles declared properties, the persisted property store, and relationships.

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::graph::{Relationship, RelationshipKind};

/// The mutable key-value state store attached to an instance.
///
/// Values survive across operations on the same instance; every entry is
/// written by exactly one create/setup operation and read back by the paired
/// start/stop/delete. The store is shared (`Arc`) because relationship edges
/// hold their target instance, and the target's persisted state must be
/// visible through every edge pointing at it.
#[derive(Debug, Clone, Default)]
pub struct RuntimeProperties {
    entries: Arc<Mutex<Map<String, Value>>>,
}

impl RuntimeProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and decode a persisted value, `None` if the key was never written.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let entries = self.entries.lock();
        match entries.get(key) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|source| Error::StateDecode {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    /// Encode and persist a value under `key`, replacing any previous entry.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let encoded = serde_json::to_value(value).map_err(|source| Error::StateEncode {
            key: key.to_string(),
            source,
        })?;
        self.entries.lock().insert(key.to_string(), encoded);
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// A point-in-time copy of the whole store, for host hand-off and tests.
    pub fn snapshot(&self) -> Map<String, Value> {
        self.entries.lock().clone()
    }
}

/// A node instance: declared configuration plus persisted runtime state plus
/// the instance's outgoing relationship edges.
#[derive(Debug, Default)]
pub struct NodeInstance {
    node_name: String,
    instance_id: String,
    properties: Map<String, Value>,
    runtime: RuntimeProperties,
    relationships: Vec<Relationship>,
}

impl NodeInstance {
    pub fn new(node_name: impl Into<String>, instance_id: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            instance_id: instance_id.into(),
            ..Default::default()
        }
    }

    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_relationship(
        mut self,
        kinds: Vec<RelationshipKind>,
        target: Arc<NodeInstance>,
    ) -> Self {
        self.relationships.push(Relationship::new(kinds, target));
        self
    }

    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Deserialize the declared property map into a typed config struct.
    pub fn declared<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.properties.clone())).map_err(|source| {
            Error::InvalidProperties {
                node: self.node_name.clone(),
                source,
            }
        })
    }

    pub fn runtime(&self) -> &RuntimeProperties {
        &self.runtime
    }

    /// Read a runtime property that a prior operation must have persisted.
    pub fn runtime_require<T: DeserializeOwned>(&self, key: &'static str) -> Result<T> {
        self.runtime
            .get(key)?
            .ok_or_else(|| Error::MissingRuntimeProperty {
                node: self.node_name.clone(),
                key,
            })
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// All edges tagged with `kind`.
    pub fn related(&self, kind: RelationshipKind) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|rel| rel.has_kind(kind))
            .collect()
    }

    /// The single edge tagged with `kind`; any other count is a fatal
    /// configuration error.
    pub fn related_one(&self, kind: RelationshipKind) -> Result<&Relationship> {
        let matches = self.related(kind);
        match matches.as_slice() {
            [rel] => Ok(rel),
            other => Err(Error::RelationshipMultiplicity {
                node: self.node_name.clone(),
                kind: kind.as_str(),
                found: other.len(),
            }),
        }
    }
}
