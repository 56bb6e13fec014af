use serde_json::json;
use veto::{ExtensionRegistry, Schema, VetoError};

fn base_registry() -> ExtensionRegistry {
    ExtensionRegistry::new(
        Schema::object()
            .field("username", Schema::string().min(2))
            .field("email", Schema::string()),
    )
}

#[test]
fn test_validates_against_base_when_empty() {
    let registry = base_registry();
    assert!(registry
        .validate(&json!({"username": "ada", "email": "a@b"}))
        .success);
    assert!(!registry.validate(&json!({"username": "a", "email": "a@b"})).success);
}

#[test]
fn test_added_fragment_tightens_validation() {
    let registry = base_registry();
    registry.insert(
        "username-cap",
        Schema::object().field("username", Schema::string().max(6)),
    );

    assert!(registry
        .validate(&json!({"username": "short", "email": "a@b"}))
        .success);
    assert!(!registry
        .validate(&json!({"username": "much-too-long", "email": "a@b"}))
        .success);
}

#[test]
fn test_fragments_compose_in_insertion_order() {
    let registry = base_registry();
    registry.insert(
        "cap",
        Schema::object().field("username", Schema::string().max(6)),
    );
    registry.insert(
        "floor",
        Schema::object().field("username", Schema::string().min(4)),
    );

    let result = registry.validate(&json!({"username": "ab", "email": "a@b"}));
    let tree = result.errors.unwrap();
    // Base min(2) passes, fragment min(4) fails.
    assert_eq!(tree.get("username").unwrap().direct().len(), 1);
}

#[test]
fn test_removal_restores_previous_behavior() {
    let registry = base_registry();
    registry.insert(
        "cap",
        Schema::object().field("username", Schema::string().max(4)),
    );
    assert!(!registry
        .validate(&json!({"username": "toolong", "email": "a@b"}))
        .success);

    registry.remove("cap").unwrap();
    assert!(registry
        .validate(&json!({"username": "toolong", "email": "a@b"}))
        .success);
}

#[test]
fn test_reinsert_replaces_fragment() {
    let registry = base_registry();
    registry.insert(
        "cap",
        Schema::object().field("username", Schema::string().max(4)),
    );
    registry.insert(
        "cap",
        Schema::object().field("username", Schema::string().max(10)),
    );

    assert_eq!(registry.len(), 1);
    assert!(registry
        .validate(&json!({"username": "sevench", "email": "a@b"}))
        .success);
}

#[test]
fn test_remove_unknown_key_is_error() {
    let registry = base_registry();
    match registry.remove("never-added") {
        Err(VetoError::UnknownExtension(key)) => assert_eq!(key, "never-added"),
        other => panic!("expected UnknownExtension, got {:?}", other),
    }
}

#[test]
fn test_compile_is_pure_recomputation() {
    let registry = base_registry();
    registry.insert(
        "extra",
        Schema::object().field("age", Schema::number().min(0.0)),
    );

    // Two compiles see the same fragments and validate identically.
    let a = veto::veto(registry.compile());
    let b = veto::veto(registry.compile());
    let input = json!({"username": "ada", "email": "a@b", "age": -1});
    assert_eq!(a.validate(&input).success, b.validate(&input).success);
}

#[test]
fn test_shared_across_threads() {
    use std::sync::Arc;

    let registry = Arc::new(base_registry());
    registry.insert(
        "cap",
        Schema::object().field("username", Schema::string().max(8)),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let input = json!({"username": format!("user{}", i), "email": "a@b"});
                registry.validate(&input).success
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
