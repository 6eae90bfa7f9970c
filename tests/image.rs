// ABOUTME: Tests for image lifecycle: pull mode, build mode, idempotency, deletion.
// ABOUTME: Uses the in-memory engine double and a directory-backed resource loader.

mod support;

use dockhand::Error;
use dockhand::engine::testing::{EngineCall, FakeEngine, FakeFactory};
use dockhand::engine::{OperationContext, SettingsSource};
use dockhand::lifecycle::{create_image, delete_image};
use dockhand::state::keys;
use serde_json::json;
use support::{DirLoader, EmptyLoader, instance, props};

#[tokio::test]
async fn pull_mode_is_idempotent() {
    support::init_tracing();
    let engine = FakeEngine::new();
    let factory = FakeFactory::single(engine.clone());
    let node = instance("nginx-image").with_properties(props(json!({
        "repository": "nginx",
        "tag": "1.25"
    })));
    let ctx = OperationContext::node(&node);

    create_image(&factory, &ctx, SettingsSource::Own, &EmptyLoader)
        .await
        .unwrap();
    create_image(&factory, &ctx, SettingsSource::Own, &EmptyLoader)
        .await
        .unwrap();

    let pulls = engine
        .calls()
        .iter()
        .filter(|call| matches!(call, EngineCall::PullImage(_)))
        .count();
    assert_eq!(pulls, 1);
    let image: String = node.runtime_require(keys::IMAGE).unwrap();
    assert_eq!(image, "sha256:pulled-nginx:1.25");
}

#[tokio::test]
async fn pull_mode_defaults_to_latest_tag() {
    let engine = FakeEngine::new();
    let factory = FakeFactory::single(engine.clone());
    let node = instance("redis-image").with_properties(props(json!({
        "repository": "redis"
    })));
    let ctx = OperationContext::node(&node);

    create_image(&factory, &ctx, SettingsSource::Own, &EmptyLoader)
        .await
        .unwrap();

    assert!(
        engine
            .calls()
            .contains(&EngineCall::PullImage("redis:latest".to_string()))
    );
}

#[tokio::test]
async fn existing_image_skips_the_pull() {
    let engine = FakeEngine::new();
    engine.seed_image("nginx:1.25", "sha256:abc");
    let factory = FakeFactory::single(engine.clone());
    let node = instance("nginx-image").with_properties(props(json!({
        "repository": "nginx",
        "tag": "1.25"
    })));
    let ctx = OperationContext::node(&node);

    create_image(&factory, &ctx, SettingsSource::Own, &EmptyLoader)
        .await
        .unwrap();

    assert_eq!(
        engine.calls(),
        vec![EngineCall::ResolveImage("nginx:1.25".to_string())]
    );
    let image: String = node.runtime_require(keys::IMAGE).unwrap();
    assert_eq!(image, "sha256:abc");
}

#[tokio::test]
async fn build_mode_assembles_a_context_and_builds() {
    let engine = FakeEngine::new();
    let factory = FakeFactory::single(engine.clone());
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("app")).unwrap();
    std::fs::write(root.path().join("app/Dockerfile"), "FROM scratch\n").unwrap();
    let loader = DirLoader::new(root.path());
    let node = instance("app-image").with_properties(props(json!({
        "image_name": "app",
        "dockerfile": "app"
    })));
    let ctx = OperationContext::node(&node);

    create_image(&factory, &ctx, SettingsSource::Own, &loader)
        .await
        .unwrap();

    assert!(
        engine
            .calls()
            .contains(&EngineCall::BuildImage("app".to_string()))
    );
    let image: String = node.runtime_require(keys::IMAGE).unwrap();
    assert_eq!(image, "sha256:built-app");
}

#[tokio::test]
async fn build_without_a_resulting_image_is_fatal() {
    let engine = FakeEngine::new();
    engine.builds_produce_no_image();
    let factory = FakeFactory::single(engine);
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("app")).unwrap();
    std::fs::write(root.path().join("app/Dockerfile"), "FROM scratch\n").unwrap();
    let loader = DirLoader::new(root.path());
    let node = instance("app-image").with_properties(props(json!({
        "image_name": "app",
        "dockerfile": "app"
    })));
    let ctx = OperationContext::node(&node);

    let err = create_image(&factory, &ctx, SettingsSource::Own, &loader)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::BuildProducedNoImage { name } if name == "app"));
}

#[tokio::test]
async fn neither_mode_declared_is_fatal_before_any_engine_call() {
    let engine = FakeEngine::new();
    let factory = FakeFactory::single(engine.clone());
    let node = instance("mystery-image").with_properties(props(json!({})));
    let ctx = OperationContext::node(&node);

    let err = create_image(&factory, &ctx, SettingsSource::Own, &EmptyLoader)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingImageSource { .. }));
    assert!(engine.calls().is_empty());
    assert!(factory.connects().is_empty());
}

#[tokio::test]
async fn delete_removes_the_persisted_image() {
    let engine = FakeEngine::new();
    engine.seed_image("nginx:1.25", "sha256:abc");
    let factory = FakeFactory::single(engine.clone());
    let node = instance("nginx-image").with_properties(props(json!({
        "repository": "nginx",
        "tag": "1.25"
    })));
    node.runtime()
        .set(keys::IMAGE, &"sha256:abc".to_string())
        .unwrap();
    let ctx = OperationContext::node(&node);

    delete_image(&factory, &ctx, SettingsSource::Own)
        .await
        .unwrap();

    assert_eq!(
        engine.calls(),
        vec![EngineCall::RemoveImage("sha256:abc".to_string())]
    );
}

#[tokio::test]
async fn delete_honors_the_keep_flag() {
    let engine = FakeEngine::new();
    let factory = FakeFactory::single(engine.clone());
    let node = instance("nginx-image").with_properties(props(json!({
        "repository": "nginx",
        "keep": true
    })));
    node.runtime()
        .set(keys::IMAGE, &"sha256:abc".to_string())
        .unwrap();
    let ctx = OperationContext::node(&node);

    delete_image(&factory, &ctx, SettingsSource::Own)
        .await
        .unwrap();

    assert!(engine.calls().is_empty());
    assert!(factory.connects().is_empty());
}

#[tokio::test]
async fn delete_requires_a_persisted_image_id() {
    let engine = FakeEngine::new();
    let factory = FakeFactory::single(engine);
    let node = instance("nginx-image").with_properties(props(json!({
        "repository": "nginx"
    })));
    let ctx = OperationContext::node(&node);

    let err = delete_image(&factory, &ctx, SettingsSource::Own)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::MissingRuntimeProperty { key: "image", .. }
    ));
}
