// ABOUTME: Tests for network lifecycle: ownership, external adoption, name collisions.
// ABOUTME: Only internally-created networks may ever be removed.

mod support;

use dockhand::Error;
use dockhand::engine::testing::{EngineCall, FakeEngine, FakeFactory};
use dockhand::engine::{OperationContext, SettingsSource};
use dockhand::lifecycle::{create_network, delete_network};
use dockhand::state::keys;
use dockhand::types::NetworkId;
use serde_json::json;
use support::{instance, props};

#[tokio::test]
async fn create_persists_id_and_name() {
    support::init_tracing();
    let engine = FakeEngine::new();
    let factory = FakeFactory::single(engine.clone());
    let node = instance("backend").with_properties(props(json!({
        "driver": "bridge"
    })));
    let ctx = OperationContext::node(&node);

    create_network(&factory, &ctx, SettingsSource::Own)
        .await
        .unwrap();

    let id: NetworkId = node.runtime_require(keys::NETWORK_ID).unwrap();
    let name: String = node.runtime_require(keys::NETWORK_NAME).unwrap();
    assert_eq!(name, "backend");
    assert!(engine.has_network(&id));
    let created = engine.calls().iter().any(|call| {
        matches!(call, EngineCall::CreateNetwork(spec)
            if spec.name == "backend" && spec.driver.as_deref() == Some("bridge"))
    });
    assert!(created);
}

#[tokio::test]
async fn declared_name_wins_over_node_name() {
    let engine = FakeEngine::new();
    let factory = FakeFactory::single(engine.clone());
    let node = instance("backend").with_properties(props(json!({
        "name": "custom-net"
    })));
    let ctx = OperationContext::node(&node);

    create_network(&factory, &ctx, SettingsSource::Own)
        .await
        .unwrap();

    let name: String = node.runtime_require(keys::NETWORK_NAME).unwrap();
    assert_eq!(name, "custom-net");
}

#[tokio::test]
async fn existing_name_refuses_creation_without_persisting() {
    let engine = FakeEngine::new();
    engine.seed_network("backend");
    let factory = FakeFactory::single(engine.clone());
    let node = instance("backend").with_properties(props(json!({})));
    let ctx = OperationContext::node(&node);

    let err = create_network(&factory, &ctx, SettingsSource::Own)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NetworkAlreadyExists(name) if name == "backend"));
    assert!(!node.runtime().contains(keys::NETWORK_ID));
    assert!(!node.runtime().contains(keys::NETWORK_NAME));
}

#[tokio::test]
async fn external_network_is_adopted_not_created() {
    let engine = FakeEngine::new();
    let seeded = engine.seed_network("shared");
    let factory = FakeFactory::single(engine.clone());
    let node = instance("shared-net").with_properties(props(json!({
        "name": "shared",
        "external": true
    })));
    let ctx = OperationContext::node(&node);

    create_network(&factory, &ctx, SettingsSource::Own)
        .await
        .unwrap();

    assert!(
        !engine
            .calls()
            .iter()
            .any(|call| matches!(call, EngineCall::CreateNetwork(_)))
    );
    let id: NetworkId = node.runtime_require(keys::NETWORK_ID).unwrap();
    assert_eq!(id, seeded);
}

#[tokio::test]
async fn missing_external_network_is_fatal() {
    let engine = FakeEngine::new();
    let factory = FakeFactory::single(engine);
    let node = instance("shared-net").with_properties(props(json!({
        "name": "shared",
        "external": true
    })));
    let ctx = OperationContext::node(&node);

    let err = create_network(&factory, &ctx, SettingsSource::Own)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ExternalNetworkMissing(name) if name == "shared"));
}

#[tokio::test]
async fn delete_external_never_calls_the_engine() {
    let engine = FakeEngine::new();
    let factory = FakeFactory::single(engine.clone());
    let node = instance("shared-net").with_properties(props(json!({
        "external": true
    })));
    node.runtime()
        .set(keys::NETWORK_ID, &NetworkId::new("net-9".to_string()))
        .unwrap();
    let ctx = OperationContext::node(&node);

    delete_network(&factory, &ctx, SettingsSource::Own)
        .await
        .unwrap();

    assert!(engine.calls().is_empty());
    assert!(factory.connects().is_empty());
}

#[tokio::test]
async fn delete_without_persisted_id_is_a_noop() {
    let engine = FakeEngine::new();
    let factory = FakeFactory::single(engine.clone());
    let node = instance("backend").with_properties(props(json!({})));
    let ctx = OperationContext::node(&node);

    delete_network(&factory, &ctx, SettingsSource::Own)
        .await
        .unwrap();

    assert!(engine.calls().is_empty());
    assert!(factory.connects().is_empty());
}

#[tokio::test]
async fn delete_removes_an_owned_network() {
    let engine = FakeEngine::new();
    let factory = FakeFactory::single(engine.clone());
    let node = instance("backend").with_properties(props(json!({})));
    let ctx = OperationContext::node(&node);
    create_network(&factory, &ctx, SettingsSource::Own)
        .await
        .unwrap();
    let id: NetworkId = node.runtime_require(keys::NETWORK_ID).unwrap();

    delete_network(&factory, &ctx, SettingsSource::Own)
        .await
        .unwrap();

    assert!(!engine.has_network(&id));
}
