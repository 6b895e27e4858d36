//! Union schema validation.
//!
//! A [`UnionSchema`] tries its alternatives in order against the same input
//! and path, and returns the first success.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{ErrorKind, SchemaError};
use crate::path::JsonPath;
use crate::validation::{failure, ValidationOutcome};

use super::compile::{routine, Routine, RoutineCache};
use super::traits::{SchemaLike, ValueValidator};
use super::SchemaKind;

/// A schema accepting any value one of its alternatives accepts.
///
/// Order is significant: the first alternative that succeeds produces the
/// output. When every alternative fails, the union reports a single failure
/// at its own path whose message joins every alternative's message with
/// `"; "`. A union with no alternatives rejects everything.
///
/// # Example
///
/// ```rust
/// use schemata::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let id = Schema::union(vec![]).or(Schema::string()).or(Schema::number());
///
/// let error = id.validate(&json!(true)).unwrap_err();
/// assert_eq!(
///     error.message(),
///     "Expected string, received boolean; Expected number, received boolean"
/// );
/// ```
#[derive(Clone)]
pub struct UnionSchema {
    alternatives: Vec<Arc<dyn ValueValidator>>,
    cache: RoutineCache<Option<Value>>,
}

impl UnionSchema {
    /// Creates a union of `alternatives`, tried in the given order.
    pub fn new(alternatives: Vec<Arc<dyn ValueValidator>>) -> Self {
        Self {
            alternatives,
            cache: RoutineCache::new(),
        }
    }

    /// Returns a union with `schema` appended as the last alternative.
    pub fn or(&self, schema: impl ValueValidator + 'static) -> Self {
        let mut alternatives = self.alternatives.clone();
        alternatives.push(Arc::new(schema));
        Self::new(alternatives)
    }

    /// Returns the number of alternatives.
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    /// Returns true if the union has no alternatives.
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

/// Builds the failure reported when no alternative matched.
fn exhausted(messages: Vec<String>, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<Option<Value>> {
    failure(path.clone(), ErrorKind::UnionExhausted, messages.join("; "), value)
}

impl SchemaLike for UnionSchema {
    type Output = Option<Value>;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Union
    }

    fn interpret(&self, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<Option<Value>> {
        let mut messages = Vec::with_capacity(self.alternatives.len());
        for alternative in &self.alternatives {
            match alternative.interpret_value(value, path) {
                Validation::Success(output) => return Validation::Success(output),
                Validation::Failure(SchemaError { message, .. }) => messages.push(message),
            }
        }
        exhausted(messages, value, path)
    }

    fn build_routine(&self) -> Routine<Option<Value>> {
        let alternatives: Vec<Routine<Option<Value>>> =
            self.alternatives.iter().map(|alternative| alternative.compile_value()).collect();

        routine(move |value, path| {
            let mut messages = Vec::with_capacity(alternatives.len());
            for alternative in &alternatives {
                match alternative(value, path) {
                    Validation::Success(output) => return Validation::Success(output),
                    Validation::Failure(SchemaError { message, .. }) => messages.push(message),
                }
            }
            exhausted(messages, value, path)
        })
    }

    fn routine_cache(&self) -> &RoutineCache<Option<Value>> {
        &self.cache
    }

    fn output_to_value(output: Option<Value>) -> Option<Value> {
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{erase, LiteralSchema, NumberSchema, StringSchema};
    use serde_json::json;

    #[test]
    fn test_first_success_wins() {
        let schema = UnionSchema::new(vec![
            erase(StringSchema::new().min_len(5)),
            erase(StringSchema::new()),
        ]);
        let output = schema
            .interpret(Some(&json!("abc")), &JsonPath::root())
            .into_result()
            .unwrap();
        assert_eq!(output, Some(json!("abc")));
    }

    #[test]
    fn test_exhausted_joins_messages_in_order() {
        let schema = UnionSchema::new(vec![
            erase(LiteralSchema::new("a")),
            erase(NumberSchema::new()),
        ]);
        let error = schema
            .interpret(Some(&json!("b")), &JsonPath::from_field("mode"))
            .into_result()
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::UnionExhausted);
        assert_eq!(
            error.message,
            r#"Invalid literal value, expected "a", received "b"; Expected number, received string"#
        );
        assert_eq!(error.path_segments(), vec!["mode"]);
        assert_eq!(error.got, Some(json!("b")));
    }

    #[test]
    fn test_empty_union_always_fails() {
        let schema = UnionSchema::new(vec![]);
        assert!(schema.is_empty());
        let error = schema
            .interpret(Some(&json!(1)), &JsonPath::root())
            .into_result()
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::UnionExhausted);
        assert_eq!(error.message, "");
    }

    #[test]
    fn test_alternative_sees_union_path() {
        let schema = UnionSchema::new(vec![erase(NumberSchema::new())]);
        let error = schema
            .interpret(Some(&json!("x")), &JsonPath::from_field("a").push_index(0))
            .into_result()
            .unwrap_err();
        assert_eq!(error.path.to_string(), "a.0");
    }

    #[test]
    fn test_or_appends() {
        let schema = UnionSchema::new(vec![]).or(StringSchema::new()).or(NumberSchema::new());
        assert_eq!(schema.len(), 2);
        assert!(schema.interpret(Some(&json!(2)), &JsonPath::root()).is_success());
    }

    #[test]
    fn test_compiled_routine_matches_interpreter() {
        let schema = UnionSchema::new(vec![
            erase(LiteralSchema::new(true)),
            erase(NumberSchema::new().positive()),
        ]);
        let routine = schema.compile();
        for input in [json!(true), json!(false), json!(3), json!(-3), json!(null)] {
            assert_eq!(
                routine(Some(&input), &JsonPath::root()).into_result(),
                schema.interpret(Some(&input), &JsonPath::root()).into_result()
            );
        }
        assert_eq!(
            routine(None, &JsonPath::root()).into_result(),
            schema.interpret(None, &JsonPath::root()).into_result()
        );
    }
}
