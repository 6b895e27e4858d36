//! Tests for sharing schemas and the registry across threads.

use schemata::{validate_batch, Schema, SchemaLike, SchemaRegistry};
use serde_json::json;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_concurrent_validation() {
    let registry = Arc::new(SchemaRegistry::new());

    registry
        .register(
            "User",
            Schema::object()
                .field("name", Schema::string())
                .field("age", Schema::number().positive()),
        )
        .unwrap();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let result = registry
                    .validate(
                        "User",
                        &json!({
                            "name": format!("User{}", i),
                            "age": 20 + i
                        }),
                    )
                    .unwrap();
                assert!(result.is_success());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_first_use_compiles_consistently() {
    let schema = Arc::new(
        Schema::object()
            .field("tags", Schema::array(Schema::string().min_len(1)).max_len(3))
            .optional_field("score", Schema::number().range(0.0..=10.0)),
    );
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let schema = Arc::clone(&schema);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let good = schema.safe_validate(&json!({"tags": ["a"], "score": i}));
                let bad = schema.safe_validate(&json!({"tags": ["a", ""]}));
                (good.is_success(), bad.into_result().unwrap_err().path.to_string())
            })
        })
        .collect();

    for handle in handles {
        let (good, bad_path) = handle.join().unwrap();
        assert!(good);
        assert_eq!(bad_path, "tags.1");
    }
    assert!(schema.is_compiled());
}

#[test]
fn test_concurrent_registration() {
    let registry = SchemaRegistry::new();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let registry = registry.clone();
            thread::spawn(move || {
                registry
                    .register(format!("Schema{}", i), Schema::number().min(i as f64))
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(registry.len(), 10);
}

#[test]
fn test_batch_validation_in_parallel() {
    let schema = Schema::object().field("id", Schema::number().positive());
    let inputs: Vec<_> = (-50..50).map(|id| json!({ "id": id })).collect();

    let outcomes = validate_batch(&schema, &inputs);
    let failures = outcomes.iter().filter(|outcome| outcome.is_failure()).count();
    assert_eq!(failures, 51);
    assert!(outcomes[99].is_success());
}
