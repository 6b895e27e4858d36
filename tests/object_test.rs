//! Integration tests for object schema validation.

use schemata::{erase, ErrorKind, ObjectSchema, Schema, SchemaLike};
use serde_json::{json, Value};

fn user_schema() -> ObjectSchema {
    Schema::object()
        .field("name", Schema::string().min_len(2))
        .field("age", Schema::number().min(0.0))
        .optional_field("email", Schema::string().pattern("@").unwrap())
}

#[test]
fn test_valid_object() {
    let output = user_schema()
        .validate(&json!({"name": "Ada", "age": 36, "email": "ada@example.com"}))
        .unwrap();
    assert_eq!(
        Value::Object(output),
        json!({"name": "Ada", "age": 36, "email": "ada@example.com"})
    );
}

#[test]
fn test_unknown_fields_dropped() {
    let output = user_schema()
        .validate(&json!({"name": "Ada", "age": 36, "role": "admin"}))
        .unwrap();
    assert_eq!(Value::Object(output), json!({"name": "Ada", "age": 36}));
}

#[test]
fn test_missing_required_field() {
    let error = user_schema().validate(&json!({"name": "Ada"})).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::MissingRequired);
    assert_eq!(error.to_string(), "age: Required");
    assert_eq!(error.error().got, None);
}

#[test]
fn test_present_null_is_not_absent() {
    let error = user_schema()
        .validate(&json!({"name": "Ada", "age": 1, "email": null}))
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NullNotAllowed);
    assert_eq!(error.path().to_strings(), vec!["email"]);
}

#[test]
fn test_nullable_field() {
    let schema = Schema::object().field("middle", Schema::string().nullable());
    let output = schema.validate(&json!({"middle": null})).unwrap();
    assert_eq!(output.get("middle"), Some(&Value::Null));
    assert!(schema.validate(&json!({})).is_err());
}

#[test]
fn test_nested_path() {
    let schema = Schema::object().field("user", Schema::object().field("name", Schema::string().min_len(2)));
    let error = schema.validate(&json!({"user": {"name": "J"}})).unwrap_err();
    assert_eq!(error.path().to_strings(), vec!["user", "name"]);
    assert_eq!(error.message(), "String must be at least 2 characters");
}

#[test]
fn test_fields_checked_in_declaration_order() {
    let error = user_schema().validate(&json!({"age": "old", "name": "A"})).unwrap_err();
    assert_eq!(error.path().to_strings(), vec!["name"]);
}

#[test]
fn test_not_an_object() {
    for (input, kind) in [
        (json!([]), ErrorKind::TypeMismatch),
        (json!("x"), ErrorKind::TypeMismatch),
        (json!(null), ErrorKind::NullNotAllowed),
    ] {
        assert_eq!(user_schema().validate(&input).unwrap_err().kind(), kind);
    }
    assert_eq!(
        user_schema().validate(&json!(1)).unwrap_err().message(),
        "Expected object, received number"
    );
}

#[test]
fn test_extend_overrides_later_wins() {
    let base = user_schema();
    let admin = base.extend(
        &Schema::object()
            .field("age", Schema::number().min(18.0))
            .field("level", Schema::number().positive()),
    );

    assert_eq!(admin.keys().collect::<Vec<_>>(), vec!["name", "age", "email", "level"]);
    let error = admin.validate(&json!({"name": "Ada", "age": 10, "level": 1})).unwrap_err();
    assert_eq!(error.message(), "Number must be greater than or equal to 18");

    // base is unchanged by extend
    assert!(base.validate(&json!({"name": "Ada", "age": 10})).is_ok());
}

#[test]
fn test_replacing_field_keeps_position() {
    let schema = Schema::object()
        .field("a", Schema::string())
        .field("b", Schema::string())
        .field("a", Schema::number());
    assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert!(schema.validate(&json!({"a": 1, "b": "x"})).is_ok());
}

#[test]
fn test_from_shape_and_shared_field() {
    let id = erase(Schema::number().positive());
    let order = ObjectSchema::from_shape(vec![("id", id.clone()), ("customer", id.clone())]);
    let invoice = Schema::object().field_shared("order_id", id);

    assert!(order.validate(&json!({"id": 1, "customer": 2})).is_ok());
    assert_eq!(
        order.validate(&json!({"id": 1, "customer": 0})).unwrap_err().to_string(),
        "customer: Number must be positive"
    );
    assert!(invoice.validate(&json!({"order_id": 9})).is_ok());
}

#[test]
fn test_empty_schema_outputs_empty_object() {
    let output = Schema::object().validate(&json!({"anything": true})).unwrap();
    assert!(output.is_empty());
}
