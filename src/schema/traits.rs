//! Traits for schema polymorphism.
//!
//! [`SchemaLike`] is the capability every schema node implements: interpret an
//! input, build a compiled routine, and convert its typed output back into an
//! untyped value. [`ValueValidator`] erases the output type so heterogeneous
//! schemas can sit side by side as object fields or union alternatives.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::ValidationError;
use crate::path::JsonPath;
use crate::schema::combinators::{NullableSchema, OptionalSchema, PipeSchema, RefinedSchema};
use crate::schema::compile::{interpreted, Routine, RoutineCache};
use crate::schema::SchemaKind;
use crate::validation::ValidationOutcome;

/// A schema node that validates untyped JSON input.
///
/// Implementors provide the interpreter ([`interpret`](Self::interpret)), a
/// routine builder ([`build_routine`](Self::build_routine)) and the cache that
/// holds the built routine. Everything else, including the public entry
/// points and the wrapper builders, is provided.
///
/// Nodes are immutable. Builder methods take `&self` and return a new node, so
/// a node can be extended in several directions and embedded in several
/// parents at once.
///
/// # Example
///
/// ```rust
/// use schemata::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let name = Schema::string().min_len(2);
///
/// assert_eq!(name.validate(&json!("Jo")).unwrap(), "Jo");
///
/// let error = name.validate(&json!("J")).unwrap_err();
/// assert_eq!(error.to_string(), "<root>: String must be at least 2 characters");
/// ```
pub trait SchemaLike: Clone + Send + Sync + 'static {
    /// The output type produced by successful validation.
    type Output: Clone + Send + Sync + 'static;

    /// Returns the kind tag of this node.
    fn kind(&self) -> SchemaKind;

    /// Validates by walking this node's settings and its children's
    /// interpreters, without touching any compiled routine.
    fn interpret(&self, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<Self::Output>;

    /// Builds a specialized routine for this node.
    ///
    /// Composite and wrapper nodes compile their children first and capture
    /// the children's cached routines.
    fn build_routine(&self) -> Routine<Self::Output>;

    /// Returns the slot holding this node's compiled routine.
    fn routine_cache(&self) -> &RoutineCache<Self::Output>;

    /// Converts a validated output into an untyped value; `None` is absent.
    fn output_to_value(output: Self::Output) -> Option<Value>;

    /// Returns this node's compiled routine, building and caching it on first use.
    fn compile(&self) -> Routine<Self::Output> {
        self.routine_cache().get_or_build(self.kind(), || {
            if cfg!(feature = "interpreted") {
                interpreted(self)
            } else {
                self.build_routine()
            }
        })
    }

    /// Returns true once this node's routine has been built.
    fn is_compiled(&self) -> bool {
        self.routine_cache().is_populated()
    }

    /// Validates an input located at `path` using the compiled routine.
    fn validate_at(&self, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<Self::Output> {
        let routine = self.compile();
        routine(value, path)
    }

    /// Validates a value, reporting failure as a [`ValidationOutcome`].
    fn safe_validate(&self, value: &Value) -> ValidationOutcome<Self::Output> {
        self.validate_at(Some(value), &JsonPath::root())
    }

    /// Validates an input that may be absent.
    fn safe_validate_input(&self, value: Option<&Value>) -> ValidationOutcome<Self::Output> {
        self.validate_at(value, &JsonPath::root())
    }

    /// Validates a value, returning the output or a [`ValidationError`].
    fn validate(&self, value: &Value) -> Result<Self::Output, ValidationError> {
        self.validate_input(Some(value))
    }

    /// Validates an input that may be absent, returning the output or a [`ValidationError`].
    fn validate_input(&self, value: Option<&Value>) -> Result<Self::Output, ValidationError> {
        match self.safe_validate_input(value) {
            Validation::Success(output) => Ok(output),
            Validation::Failure(error) => Err(ValidationError::from(error)),
        }
    }

    /// Wraps this schema so an absent value is accepted.
    fn optional(&self) -> OptionalSchema<Self> {
        OptionalSchema::new(self.clone())
    }

    /// Wraps this schema so a null value is accepted.
    fn nullable(&self) -> NullableSchema<Self> {
        NullableSchema::new(self.clone())
    }

    /// Adds a predicate that runs on the validated output.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let even = Schema::number()
    ///     .min(0.0)
    ///     .refine(|n| n.as_i64().is_some_and(|v| v % 2 == 0), "must be even");
    ///
    /// assert_eq!(even.validate(&json!(3)).unwrap_err().message(), "must be even");
    /// assert!(even.validate(&json!(4)).is_ok());
    /// ```
    fn refine<F>(&self, predicate: F, message: impl Into<String>) -> RefinedSchema<Self>
    where
        F: Fn(&Self::Output) -> bool + Send + Sync + 'static,
    {
        RefinedSchema::new(self.clone(), predicate, message)
    }

    /// Adds a predicate with the default failure message.
    fn satisfies<F>(&self, predicate: F) -> RefinedSchema<Self>
    where
        F: Fn(&Self::Output) -> bool + Send + Sync + 'static,
    {
        RefinedSchema::new(self.clone(), predicate, RefinedSchema::<Self>::DEFAULT_MESSAGE)
    }

    /// Feeds this schema's output into `next` as its input.
    fn pipe<B: SchemaLike>(&self, next: B) -> PipeSchema<Self, B> {
        PipeSchema::new(self.clone(), next)
    }
}

/// A shared node is the node: same cache, same settings.
impl<S: SchemaLike> SchemaLike for Arc<S> {
    type Output = S::Output;

    fn kind(&self) -> SchemaKind {
        (**self).kind()
    }

    fn interpret(&self, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<Self::Output> {
        (**self).interpret(value, path)
    }

    fn build_routine(&self) -> Routine<Self::Output> {
        (**self).build_routine()
    }

    fn routine_cache(&self) -> &RoutineCache<Self::Output> {
        (**self).routine_cache()
    }

    fn output_to_value(output: Self::Output) -> Option<Value> {
        S::output_to_value(output)
    }
}

/// A type-erased schema that validates to untyped values.
///
/// Any [`SchemaLike`] is a `ValueValidator`. Object fields and union
/// alternatives are stored as `Arc<dyn ValueValidator>`.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use schemata::{Schema, ValueValidator};
///
/// let alternatives: Vec<Arc<dyn ValueValidator>> = vec![
///     Arc::new(Schema::string().min_len(1)),
///     Arc::new(Schema::number().positive()),
/// ];
/// ```
pub trait ValueValidator: Send + Sync {
    /// Returns the kind tag of the underlying node.
    fn schema_kind(&self) -> SchemaKind;

    /// Interprets the node, erasing its output.
    fn interpret_value(&self, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<Option<Value>>;

    /// Returns the node's compiled routine with its output erased.
    fn compile_value(&self) -> Routine<Option<Value>>;

    /// Returns true once the underlying node's routine has been built.
    fn is_value_compiled(&self) -> bool;
}

impl<S: SchemaLike> ValueValidator for S {
    fn schema_kind(&self) -> SchemaKind {
        self.kind()
    }

    fn interpret_value(&self, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<Option<Value>> {
        self.interpret(value, path).map(S::output_to_value)
    }

    fn compile_value(&self) -> Routine<Option<Value>> {
        let routine = self.compile();
        Arc::new(move |value: Option<&Value>, path: &JsonPath| routine(value, path).map(S::output_to_value))
    }

    fn is_value_compiled(&self) -> bool {
        self.is_compiled()
    }
}

/// Erases a schema's output type for use as a field or union alternative.
pub fn erase<S: ValueValidator + 'static>(schema: S) -> Arc<dyn ValueValidator> {
    Arc::new(schema)
}
