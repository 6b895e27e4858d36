//! Schema validation error types.
//!
//! This module provides [`SchemaError`], the structured failure carried by a
//! [`ValidationOutcome`](crate::ValidationOutcome), the [`ErrorKind`] taxonomy,
//! and [`ValidationError`], the form returned by the throwing entry points.

use std::fmt::{self, Display};

use serde_json::Value;

use crate::path::JsonPath;

/// The category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The value has the wrong type.
    TypeMismatch,
    /// A string or array is too short or too long.
    LengthOutOfBounds,
    /// A number is below its minimum or above its maximum.
    RangeOutOfBounds,
    /// A number is not positive or not negative.
    SignConstraintViolated,
    /// A string does not match its pattern.
    PatternMismatch,
    /// A value is not the configured literal.
    LiteralMismatch,
    /// No union alternative accepted the value.
    UnionExhausted,
    /// A refinement predicate returned false.
    RefinementFailed,
    /// An absent value reached a schema that is not optional.
    MissingRequired,
    /// A null value reached a schema that is not nullable.
    NullNotAllowed,
}

impl ErrorKind {
    /// Returns the machine-readable code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::TypeMismatch => "invalid_type",
            ErrorKind::LengthOutOfBounds => "length",
            ErrorKind::RangeOutOfBounds => "out_of_range",
            ErrorKind::SignConstraintViolated => "sign",
            ErrorKind::PatternMismatch => "pattern",
            ErrorKind::LiteralMismatch => "invalid_literal",
            ErrorKind::UnionExhausted => "union_exhausted",
            ErrorKind::RefinementFailed => "refinement",
            ErrorKind::MissingRequired => "required",
            ErrorKind::NullNotAllowed => "null_not_allowed",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single validation failure with full context.
///
/// - **path**: where in the data structure the failure occurred
/// - **kind**: which check failed
/// - **message**: human-readable description
/// - **got**: the offending value, `None` when the value was absent
///
/// # Example
///
/// ```rust
/// use schemata::{ErrorKind, JsonPath, SchemaError};
/// use serde_json::json;
///
/// let error = SchemaError::new(
///     JsonPath::root().push_field("age"),
///     ErrorKind::RangeOutOfBounds,
///     "Number must be greater than or equal to 0",
/// )
/// .with_got(json!(-3));
///
/// assert_eq!(error.code(), "out_of_range");
/// assert_eq!(error.to_string(), "age: Number must be greater than or equal to 0");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// The path to the value that failed validation.
    pub path: JsonPath,
    /// The category of the failure.
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// The value that failed validation; `None` if it was absent.
    pub got: Option<Value>,
}

impl SchemaError {
    /// Creates a new schema error with no offending value recorded.
    pub fn new(path: JsonPath, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
            got: None,
        }
    }

    /// Sets the offending value and returns self for chaining.
    pub fn with_got(mut self, got: Value) -> Self {
        self.got = Some(got);
        self
    }

    /// Sets the offending value from an input that may be absent.
    pub fn with_input(mut self, input: Option<&Value>) -> Self {
        self.got = input.cloned();
        self
    }

    /// Returns the machine-readable error code.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Returns the path as a list of string segments.
    pub fn path_segments(&self) -> Vec<String> {
        self.path.to_strings()
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "<root>: {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for SchemaError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaError>();
    assert_sync::<SchemaError>();
};

/// The error returned by [`SchemaLike::validate`](crate::SchemaLike::validate).
///
/// Wraps the same [`SchemaError`] that
/// [`safe_validate`](crate::SchemaLike::safe_validate) reports, and renders as
/// `"<dotted path or <root>>: <message>"`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{error}")]
pub struct ValidationError {
    error: SchemaError,
}

impl ValidationError {
    /// Returns the underlying structured failure.
    pub fn error(&self) -> &SchemaError {
        &self.error
    }

    /// Returns the path at which validation failed.
    pub fn path(&self) -> &JsonPath {
        &self.error.path
    }

    /// Returns the failure category.
    pub fn kind(&self) -> ErrorKind {
        self.error.kind
    }

    /// Returns the failure message without the path prefix.
    pub fn message(&self) -> &str {
        &self.error.message
    }

    /// Consumes the error, returning the structured failure.
    pub fn into_inner(self) -> SchemaError {
        self.error
    }
}

impl From<SchemaError> for ValidationError {
    fn from(error: SchemaError) -> Self {
        Self { error }
    }
}
