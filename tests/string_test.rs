//! Integration tests for string schema validation.

use regex::Regex;
use schemata::{ErrorKind, Schema, SchemaLike, StringOptions, StringSchema};
use serde_json::json;

#[test]
fn test_schema_string_factory() {
    let schema = Schema::string();
    assert_eq!(schema.validate(&json!("test")).unwrap(), "test");
}

#[test]
fn test_min_len_rejects_short_strings() {
    let schema = Schema::string().min_len(5);

    // Exactly 5 characters - should pass
    assert_eq!(schema.validate(&json!("hello")).unwrap(), "hello");

    // 4 characters - should fail
    let error = schema.validate(&json!("test")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::LengthOutOfBounds);
    assert_eq!(error.message(), "String must be at least 5 characters");
}

#[test]
fn test_max_len_rejects_long_strings() {
    let schema = Schema::string().max_len(10);

    assert!(schema.validate(&json!("1234567890")).is_ok());

    let error = schema.validate(&json!("12345678901")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::LengthOutOfBounds);
    assert_eq!(error.message(), "String must be at most 10 characters");
}

#[test]
fn test_non_empty() {
    let schema = Schema::string().non_empty();
    assert!(schema.validate(&json!("a")).is_ok());
    assert_eq!(
        schema.validate(&json!("")).unwrap_err().message(),
        "String must be at least 1 characters"
    );
}

#[test]
fn test_pattern_is_unanchored() {
    let schema = Schema::string().pattern(r"\d{3}").unwrap();
    assert!(schema.validate(&json!("abc123def")).is_ok());

    let error = schema.validate(&json!("12")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::PatternMismatch);
    assert_eq!(error.message(), r"String must match pattern /\d{3}/");
}

#[test]
fn test_invalid_pattern_is_a_build_error() {
    assert!(Schema::string().pattern(r"([a-z]").is_err());
}

#[test]
fn test_prebuilt_regex() {
    let schema = Schema::string().regex(Regex::new(r"^[A-Z]{2}$").unwrap());
    assert!(schema.validate(&json!("GB")).is_ok());
    assert!(schema.validate(&json!("gb")).is_err());
}

#[test]
fn test_short_circuits_before_pattern() {
    // "abc" is too short, so the pattern is never evaluated
    let schema = Schema::string().min_len(10).pattern(r"^\d+$").unwrap();
    let error = schema.validate(&json!("abc")).unwrap_err();
    assert_eq!(error.message(), "String must be at least 10 characters");
}

#[test]
fn test_type_check_is_exact() {
    let schema = Schema::string();
    for (input, message) in [
        (json!(1), "Expected string, received number"),
        (json!(true), "Expected string, received boolean"),
        (json!(["a"]), "Expected string, received array"),
        (json!({"a": 1}), "Expected string, received object"),
        (json!(null), "Expected string, received null"),
    ] {
        assert_eq!(schema.validate(&input).unwrap_err().message(), message);
    }
    assert_eq!(schema.validate_input(None).unwrap_err().kind(), ErrorKind::MissingRequired);
}

#[test]
fn test_length_in_utf16_code_units() {
    let schema = Schema::string().min_len(2).max_len(2);
    assert!(schema.validate(&json!("ab")).is_ok());
    assert!(schema.validate(&json!("ñé")).is_ok());
    // one astral-plane character occupies two code units
    assert!(schema.validate(&json!("😀")).is_ok());
    assert!(schema.validate(&json!("😀a")).is_err());
}

#[test]
fn test_custom_messages_per_constraint() {
    let schema = Schema::string()
        .error("name must be text")
        .min_len(2)
        .error("name too short")
        .max_len(5)
        .error("name too long");

    assert_eq!(schema.validate(&json!(1)).unwrap_err().message(), "name must be text");
    assert_eq!(schema.validate(&json!("a")).unwrap_err().message(), "name too short");
    assert_eq!(schema.validate(&json!("abcdef")).unwrap_err().message(), "name too long");
}

#[test]
fn test_with_options_matches_builders() {
    let built = Schema::string().min_len(1).max_len(3);
    let configured = StringSchema::with_options(StringOptions {
        min_len: Some(1),
        max_len: Some(3),
        pattern: None,
    });

    for input in [json!(""), json!("ab"), json!("abcd"), json!(7)] {
        assert_eq!(
            built.safe_validate(&input).into_result(),
            configured.safe_validate(&input).into_result()
        );
    }
}

#[test]
fn test_with_options_error_targets_last_constraint() {
    let schema = StringSchema::with_options(StringOptions {
        min_len: Some(2),
        max_len: None,
        pattern: Some(Regex::new("^[a-z]+$").unwrap()),
    })
    .error("lowercase only");

    assert_eq!(schema.validate(&json!("AB")).unwrap_err().message(), "lowercase only");
    assert_eq!(schema.validate(&json!("a")).unwrap_err().message(), "String must be at least 2 characters");
    assert_eq!(schema.validate(&json!(1)).unwrap_err().message(), "Expected string, received number");
}

#[test]
fn test_error_display_includes_path() {
    let schema = Schema::object().field("email", Schema::string().pattern("@").unwrap());
    let error = schema.validate(&json!({"email": "nope"})).unwrap_err();
    assert_eq!(error.to_string(), "email: String must match pattern /@/");
}
