// ABOUTME: Tests for create-parameter merge precedence.
// ABOUTME: Base loses to declared overrides, declared loses to caller overrides.

mod support;

use std::collections::BTreeMap;

use dockhand::engine::traits::ContainerSpec;
use dockhand::lifecycle::{CreateOverrides, merge_parameters};
use proptest::collection::btree_map;
use proptest::option;
use proptest::prelude::*;

fn base_spec(name: &str, environment: BTreeMap<String, String>) -> ContainerSpec {
    ContainerSpec {
        image: "sha256:base".to_string(),
        name: name.to_string(),
        command: None,
        entrypoint: None,
        environment,
        ports: BTreeMap::new(),
        volumes: BTreeMap::new(),
        labels: BTreeMap::new(),
        user: None,
        working_dir: None,
    }
}

fn env_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    btree_map("[A-Z]{1,4}", "[a-z]{1,4}", 0..4)
}

proptest! {
    /// The most specific layer that sets a field wins it.
    #[test]
    fn most_specific_layer_wins_the_name(
        base in "[a-z]{1,8}",
        declared in option::of("[a-z]{1,8}"),
        caller in option::of("[a-z]{1,8}"),
    ) {
        let merged = merge_parameters(
            base_spec(&base, BTreeMap::new()),
            &CreateOverrides { name: declared.clone(), ..Default::default() },
            &CreateOverrides { name: caller.clone(), ..Default::default() },
        );
        let expected = caller.or(declared).unwrap_or(base);
        prop_assert_eq!(merged.name, expected);
    }

    /// Environment maps replace wholesale; keys never deep-merge across layers.
    #[test]
    fn environment_replaces_wholesale(
        base in env_strategy(),
        declared in option::of(env_strategy()),
        caller in option::of(env_strategy()),
    ) {
        let merged = merge_parameters(
            base_spec("c1", base.clone()),
            &CreateOverrides { environment: declared.clone(), ..Default::default() },
            &CreateOverrides { environment: caller.clone(), ..Default::default() },
        );
        let expected = caller.or(declared).unwrap_or(base);
        prop_assert_eq!(merged.environment, expected);
    }

    /// Fields no layer sets pass through from the base untouched.
    #[test]
    fn unset_fields_pass_through(
        image in "[a-z]{1,8}",
        user in option::of("[a-z]{1,8}"),
    ) {
        let mut base = base_spec("c1", BTreeMap::new());
        base.image = image.clone();
        base.user = user.clone();
        let merged = merge_parameters(
            base,
            &CreateOverrides::default(),
            &CreateOverrides::default(),
        );
        prop_assert_eq!(merged.image, image);
        prop_assert_eq!(merged.user, user);
    }
}

#[test]
fn single_variable_override_replaces_the_whole_environment() {
    let mut base_env = BTreeMap::new();
    base_env.insert("A".to_string(), "1".to_string());
    base_env.insert("B".to_string(), "2".to_string());
    let mut caller_env = BTreeMap::new();
    caller_env.insert("C".to_string(), "3".to_string());

    let merged = merge_parameters(
        base_spec("c1", base_env),
        &CreateOverrides::default(),
        &CreateOverrides {
            environment: Some(caller_env.clone()),
            ..Default::default()
        },
    );

    assert_eq!(merged.environment, caller_env);
}

#[test]
fn declared_layer_applies_when_caller_is_silent() {
    let declared = CreateOverrides {
        user: Some("postgres".to_string()),
        working_dir: Some("/srv".to_string()),
        ..Default::default()
    };

    let merged = merge_parameters(
        base_spec("c1", BTreeMap::new()),
        &declared,
        &CreateOverrides::default(),
    );

    assert_eq!(merged.user.as_deref(), Some("postgres"));
    assert_eq!(merged.working_dir.as_deref(), Some("/srv"));
}
