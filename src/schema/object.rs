//! Object schema validation.
//!
//! This module provides [`ObjectSchema`] for validating JSON objects against a
//! declared, ordered set of fields.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::path::JsonPath;
use crate::validation::{success, type_failure, ValidationOutcome};

use super::combinators::OptionalSchema;
use super::compile::{routine, Routine, RoutineCache};
use super::traits::{SchemaLike, ValueValidator};
use super::SchemaKind;

/// A schema for validating JSON objects.
///
/// Fields are validated in declaration order. A field missing from the input
/// is handed to its schema as absent, so a plain field is required and an
/// [`optional`](SchemaLike::optional) one may be left out. The first failing
/// field stops validation.
///
/// The output holds only declared fields. Undeclared input properties are
/// dropped, and optional fields that were absent stay absent.
///
/// # Example
///
/// ```rust
/// use schemata::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string().min_len(1))
///     .field("age", Schema::number().positive())
///     .optional_field("email", Schema::string());
///
/// let output = schema
///     .validate(&json!({"name": "Alice", "age": 30, "admin": true}))
///     .unwrap();
/// assert_eq!(serde_json::Value::Object(output), json!({"name": "Alice", "age": 30}));
///
/// let error = schema.validate(&json!({"age": 30})).unwrap_err();
/// assert_eq!(error.to_string(), "name: Required");
/// ```
#[derive(Clone)]
pub struct ObjectSchema {
    fields: IndexMap<String, Arc<dyn ValueValidator>>,
    type_message: Option<String>,
    cache: RoutineCache<Map<String, Value>>,
}

impl ObjectSchema {
    /// Creates a new object schema with no fields.
    pub fn new() -> Self {
        Self::from_parts(IndexMap::new(), None)
    }

    /// Creates an object schema from `(name, schema)` pairs, in order.
    ///
    /// A repeated name keeps its first position and its last schema.
    pub fn from_shape<I, K>(shape: I) -> Self
    where
        I: IntoIterator<Item = (K, Arc<dyn ValueValidator>)>,
        K: Into<String>,
    {
        let fields = shape.into_iter().map(|(name, schema)| (name.into(), schema)).collect();
        Self::from_parts(fields, None)
    }

    fn from_parts(fields: IndexMap<String, Arc<dyn ValueValidator>>, type_message: Option<String>) -> Self {
        Self {
            fields,
            type_message,
            cache: RoutineCache::new(),
        }
    }

    /// Adds a field. A field with the same name is replaced in place.
    pub fn field(&self, name: impl Into<String>, schema: impl ValueValidator + 'static) -> Self {
        self.field_shared(name, Arc::new(schema))
    }

    /// Adds a field whose schema is already shared.
    ///
    /// The same node can back fields of several objects; it is compiled once.
    pub fn field_shared(&self, name: impl Into<String>, schema: Arc<dyn ValueValidator>) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(name.into(), schema);
        Self::from_parts(fields, self.type_message.clone())
    }

    /// Adds a field that may be absent from the input.
    ///
    /// Shorthand for `.field(name, schema.optional())`.
    pub fn optional_field<S: SchemaLike>(&self, name: impl Into<String>, schema: S) -> Self {
        self.field(name, OptionalSchema::new(schema))
    }

    /// Returns a schema with the fields of `self` and `other`.
    ///
    /// Fields of `other` override same-named fields of `self`. Overridden
    /// fields keep their original position; new fields are appended.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let base = Schema::object()
    ///     .field("id", Schema::string())
    ///     .field("name", Schema::string());
    /// let extended = base.extend(
    ///     &Schema::object()
    ///         .field("id", Schema::number())
    ///         .field("email", Schema::string()),
    /// );
    ///
    /// assert_eq!(extended.keys().collect::<Vec<_>>(), vec!["id", "name", "email"]);
    /// assert!(extended.validate(&json!({"id": 7, "name": "a", "email": "b"})).is_ok());
    /// ```
    pub fn extend(&self, other: &ObjectSchema) -> Self {
        let mut fields = self.fields.clone();
        for (name, schema) in &other.fields {
            fields.insert(name.clone(), Arc::clone(schema));
        }
        Self::from_parts(fields, self.type_message.clone())
    }

    /// Sets the message reported when the input is not an object.
    pub fn error(&self, message: impl Into<String>) -> Self {
        Self::from_parts(self.fields.clone(), Some(message.into()))
    }

    /// Returns the declared field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns the schema declared for `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ValueValidator>> {
        self.fields.get(name)
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    type Output = Map<String, Value>;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Object
    }

    fn interpret(&self, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<Self::Output> {
        let Some(input) = value.and_then(Value::as_object) else {
            return type_failure("object", value, path, self.type_message.as_deref());
        };

        let mut output = Map::new();
        for (name, schema) in &self.fields {
            let field_path = path.push_field(name);
            match schema.interpret_value(input.get(name), &field_path) {
                Validation::Success(Some(validated)) => {
                    output.insert(name.clone(), validated);
                }
                Validation::Success(None) => {}
                Validation::Failure(error) => return Validation::Failure(error),
            }
        }
        success(output)
    }

    fn build_routine(&self) -> Routine<Self::Output> {
        let fields: Vec<(String, Routine<Option<Value>>)> = self
            .fields
            .iter()
            .map(|(name, schema)| (name.clone(), schema.compile_value()))
            .collect();
        let type_message = self.type_message.clone();

        routine(move |value, path| {
            let Some(input) = value.and_then(Value::as_object) else {
                return type_failure("object", value, path, type_message.as_deref());
            };

            let mut output = Map::new();
            for (name, field) in &fields {
                match field(input.get(name), &path.push_field(name)) {
                    Validation::Success(Some(validated)) => {
                        output.insert(name.clone(), validated);
                    }
                    Validation::Success(None) => {}
                    Validation::Failure(error) => return Validation::Failure(error),
                }
            }
            success(output)
        })
    }

    fn routine_cache(&self) -> &RoutineCache<Self::Output> {
        &self.cache
    }

    fn output_to_value(output: Self::Output) -> Option<Value> {
        Some(Value::Object(output))
    }
}
