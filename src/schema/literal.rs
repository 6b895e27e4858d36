//! Literal schema validation.
//!
//! A [`LiteralSchema`] accepts exactly one scalar value. Comparison is strict:
//! `1` does not match `"1"` and `true` does not match `1`.

use std::fmt::{self, Display};

use serde_json::{Number, Value};

use crate::error::ErrorKind;
use crate::path::JsonPath;
use crate::validation::{failure, success, type_failure, ValidationOutcome};

use super::compile::{routine, Routine, RoutineCache};
use super::traits::SchemaLike;
use super::SchemaKind;

/// A scalar value a [`LiteralSchema`] can be pinned to.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Literal {
    /// Creates a number literal from a float.
    ///
    /// Returns `None` for NaN and infinities, which JSON cannot represent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::{Literal, Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let half = Schema::literal(Literal::float(0.5).unwrap());
    /// assert!(half.validate(&json!(0.5)).is_ok());
    /// assert!(Literal::float(f64::NAN).is_none());
    /// ```
    pub fn float(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Literal::Number)
    }

    /// Returns true if `value` is this literal under strict equality.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Literal::Null, Value::Null) => true,
            (Literal::Bool(expected), Value::Bool(actual)) => expected == actual,
            (Literal::String(expected), Value::String(actual)) => expected == actual,
            (Literal::Number(expected), Value::Number(actual)) => numbers_equal(expected, actual),
            _ => false,
        }
    }

    /// Returns the literal as a JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(n.clone()),
            Literal::String(s) => Value::String(s.clone()),
        }
    }
}

/// Renders the literal as JSON, so strings appear quoted.
impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Number(value.into())
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Number(value.into())
    }
}

impl From<u64> for Literal {
    fn from(value: u64) -> Self {
        Literal::Number(value.into())
    }
}

impl From<Number> for Literal {
    fn from(value: Number) -> Self {
        Literal::Number(value)
    }
}

/// A schema accepting exactly one scalar value.
///
/// An absent input fails as missing. Any present input that differs from the
/// literal, `null` included, fails with a message echoing both values.
#[derive(Clone)]
pub struct LiteralSchema {
    expected: Literal,
    cache: RoutineCache<Value>,
}

impl LiteralSchema {
    /// Creates a schema pinned to `value`.
    pub fn new(value: impl Into<Literal>) -> Self {
        Self {
            expected: value.into(),
            cache: RoutineCache::new(),
        }
    }

    /// Returns the literal this schema accepts.
    pub fn expected(&self) -> &Literal {
        &self.expected
    }
}

fn check_literal(expected: &Literal, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<Value> {
    match value {
        None => type_failure("literal", value, path, None),
        Some(actual) if expected.matches(actual) => success(actual.clone()),
        Some(actual) => failure(
            path.clone(),
            ErrorKind::LiteralMismatch,
            format!("Invalid literal value, expected {}, received {}", expected, actual),
            value,
        ),
    }
}

impl SchemaLike for LiteralSchema {
    type Output = Value;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Literal
    }

    fn interpret(&self, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<Value> {
        check_literal(&self.expected, value, path)
    }

    fn build_routine(&self) -> Routine<Value> {
        let expected = self.expected.clone();
        routine(move |value, path| check_literal(&expected, value, path))
    }

    fn routine_cache(&self) -> &RoutineCache<Value> {
        &self.cache
    }

    fn output_to_value(output: Value) -> Option<Value> {
        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(schema: &LiteralSchema, value: Value) -> ValidationOutcome<Value> {
        schema.interpret(Some(&value), &JsonPath::root())
    }

    #[test]
    fn test_string_literal() {
        let schema = LiteralSchema::new("admin");
        assert_eq!(check(&schema, json!("admin")).into_result().unwrap(), json!("admin"));

        let error = check(&schema, json!("user")).into_result().unwrap_err();
        assert_eq!(error.kind, ErrorKind::LiteralMismatch);
        assert_eq!(error.message, r#"Invalid literal value, expected "admin", received "user""#);
        assert_eq!(error.got, Some(json!("user")));
    }

    #[test]
    fn test_no_coercion() {
        assert!(check(&LiteralSchema::new(1), json!("1")).is_failure());
        assert!(check(&LiteralSchema::new(true), json!(1)).is_failure());
        assert!(check(&LiteralSchema::new("true"), json!(true)).is_failure());
    }

    #[test]
    fn test_number_literal_compares_numerically() {
        let schema = LiteralSchema::new(Literal::float(2.0).unwrap());
        assert!(check(&schema, json!(2.0)).is_success());
        assert!(check(&schema, json!(2)).is_success());
        assert!(check(&schema, json!(2.5)).is_failure());

        let big = LiteralSchema::new(u64::MAX);
        assert!(check(&big, json!(u64::MAX)).is_success());
        assert!(check(&big, json!(-1)).is_failure());
    }

    #[test]
    fn test_float_literal() {
        let schema = LiteralSchema::new(Literal::float(-1.25).unwrap());
        assert!(check(&schema, json!(-1.25)).is_success());

        let error = check(&schema, json!(1.25)).into_result().unwrap_err();
        assert_eq!(error.message, "Invalid literal value, expected -1.25, received 1.25");

        assert_eq!(Literal::float(f64::INFINITY), None);
        assert_eq!(Literal::float(f64::NAN), None);
    }

    #[test]
    fn test_null_literal() {
        let schema = LiteralSchema::new(Literal::Null);
        assert_eq!(check(&schema, json!(null)).into_result().unwrap(), Value::Null);

        let error = check(&schema, json!(false)).into_result().unwrap_err();
        assert_eq!(error.message, "Invalid literal value, expected null, received false");
    }

    #[test]
    fn test_null_input_is_a_mismatch() {
        let schema = LiteralSchema::new("on");
        let error = check(&schema, json!(null)).into_result().unwrap_err();
        assert_eq!(error.kind, ErrorKind::LiteralMismatch);
        assert_eq!(error.message, r#"Invalid literal value, expected "on", received null"#);
    }

    #[test]
    fn test_absent_input_is_required() {
        let schema = LiteralSchema::new(true);
        let error = schema.interpret(None, &JsonPath::root()).into_result().unwrap_err();
        assert_eq!(error.kind, ErrorKind::MissingRequired);
        assert_eq!(error.message, "Required");
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::from("x").to_string(), r#""x""#);
        assert_eq!(Literal::from(3).to_string(), "3");
        assert_eq!(Literal::Null.to_string(), "null");
        assert_eq!(Literal::from(false).to_string(), "false");
    }
}
