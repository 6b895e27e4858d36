//! The result model shared by every validator.
//!
//! A validation produces a [`ValidationOutcome`]: `stillwater`'s two-variant
//! `Validation`, carrying either the validated value or exactly one
//! [`SchemaError`]. Validation is fail-fast, so a failure never aggregates.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{ErrorKind, SchemaError};
use crate::path::JsonPath;

/// Outcome of validating one input against one schema.
pub type ValidationOutcome<T> = Validation<T, SchemaError>;

/// Builds a successful outcome.
pub fn success<T>(value: T) -> ValidationOutcome<T> {
    Validation::Success(value)
}

/// Builds a failed outcome at `path`.
///
/// `got` is the offending input; `None` records that the value was absent.
pub fn failure<T>(
    path: JsonPath,
    kind: ErrorKind,
    message: impl Into<String>,
    got: Option<&Value>,
) -> ValidationOutcome<T> {
    Validation::Failure(SchemaError::new(path, kind, message).with_input(got))
}

/// A single failed check: its category and message, before a path is attached.
pub(crate) type Violation = (ErrorKind, String);

/// A constraint value together with an optional caller-supplied message.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Rule<T> {
    pub(crate) value: T,
    pub(crate) message: Option<String>,
}

impl<T> Rule<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            message: None,
        }
    }

    pub(crate) fn violation(&self, kind: ErrorKind, default: impl FnOnce(&T) -> String) -> Violation {
        let message = match &self.message {
            Some(message) => message.clone(),
            None => default(&self.value),
        };
        (kind, message)
    }
}

/// Builds the failure for an input that did not pass a type check.
///
/// Absent and null inputs get their own kinds so callers can tell a missing
/// field from a wrongly-typed one. `custom` replaces the default message.
pub(crate) fn type_failure<T>(
    expected: &str,
    value: Option<&Value>,
    path: &JsonPath,
    custom: Option<&str>,
) -> ValidationOutcome<T> {
    let (kind, default) = match value {
        None => (ErrorKind::MissingRequired, "Required".to_string()),
        Some(Value::Null) => (
            ErrorKind::NullNotAllowed,
            format!("Expected {}, received null", expected),
        ),
        Some(other) => (
            ErrorKind::TypeMismatch,
            format!("Expected {}, received {}", expected, value_type_name(other)),
        ),
    };
    let message = custom.map(str::to_string).unwrap_or(default);
    failure(path.clone(), kind, message, value)
}

/// Returns the JSON type name for a value.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
