//! Wrapper schemas that modify how an inner schema is applied.
//!
//! - [`OptionalSchema`]: an absent value is accepted
//! - [`NullableSchema`]: a null value is accepted
//! - [`RefinedSchema`]: a predicate runs on the inner schema's output
//! - [`PipeSchema`]: the output of one schema becomes the input of another
//!
//! Wrappers are built through [`SchemaLike`] methods and compose in whatever
//! order they are applied:
//!
//! ```rust
//! use schemata::{Schema, SchemaLike};
//! use serde_json::json;
//!
//! let nickname = Schema::string().min_len(2).nullable().optional();
//!
//! assert_eq!(nickname.validate_input(None).unwrap(), None);
//! assert_eq!(nickname.validate(&json!(null)).unwrap(), Some(None));
//! assert!(nickname.validate(&json!("x")).is_err());
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::ErrorKind;
use crate::path::JsonPath;
use crate::validation::{failure, success, ValidationOutcome};

use super::compile::{routine, Routine, RoutineCache};
use super::traits::SchemaLike;
use super::SchemaKind;

/// Accepts an absent value, otherwise defers to the inner schema.
///
/// A present `null` is not absent and still reaches the inner schema.
#[derive(Clone)]
pub struct OptionalSchema<S: SchemaLike> {
    inner: S,
    cache: RoutineCache<Option<S::Output>>,
}

impl<S: SchemaLike> OptionalSchema<S> {
    /// Wraps `inner` so an absent value is accepted.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: RoutineCache::new(),
        }
    }

    /// Returns the wrapped schema.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: SchemaLike> SchemaLike for OptionalSchema<S> {
    type Output = Option<S::Output>;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Optional
    }

    fn interpret(&self, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<Self::Output> {
        match value {
            None => success(None),
            Some(_) => self.inner.interpret(value, path).map(Some),
        }
    }

    fn build_routine(&self) -> Routine<Self::Output> {
        let inner = self.inner.compile();
        routine(move |value, path| match value {
            None => success(None),
            Some(_) => inner(value, path).map(Some),
        })
    }

    fn routine_cache(&self) -> &RoutineCache<Self::Output> {
        &self.cache
    }

    fn output_to_value(output: Self::Output) -> Option<Value> {
        output.and_then(S::output_to_value)
    }
}

/// Accepts `null`, otherwise defers to the inner schema.
///
/// An absent value is not null and still reaches the inner schema.
#[derive(Clone)]
pub struct NullableSchema<S: SchemaLike> {
    inner: S,
    cache: RoutineCache<Option<S::Output>>,
}

impl<S: SchemaLike> NullableSchema<S> {
    /// Wraps `inner` so a null value is accepted.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: RoutineCache::new(),
        }
    }

    /// Returns the wrapped schema.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: SchemaLike> SchemaLike for NullableSchema<S> {
    type Output = Option<S::Output>;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Nullable
    }

    fn interpret(&self, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<Self::Output> {
        match value {
            Some(Value::Null) => success(None),
            _ => self.inner.interpret(value, path).map(Some),
        }
    }

    fn build_routine(&self) -> Routine<Self::Output> {
        let inner = self.inner.compile();
        routine(move |value, path| match value {
            Some(Value::Null) => success(None),
            _ => inner(value, path).map(Some),
        })
    }

    fn routine_cache(&self) -> &RoutineCache<Self::Output> {
        &self.cache
    }

    fn output_to_value(output: Self::Output) -> Option<Value> {
        match output {
            Some(inner) => S::output_to_value(inner),
            None => Some(Value::Null),
        }
    }
}

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Runs a predicate on the inner schema's validated output.
///
/// The predicate never sees input the inner schema rejected; the inner
/// failure is returned instead.
///
/// # Example
///
/// ```rust
/// use schemata::{ErrorKind, Schema, SchemaLike};
/// use serde_json::json;
///
/// let even = Schema::number()
///     .min(0.0)
///     .refine(|n| n.as_i64().is_some_and(|v| v % 2 == 0), "must be even");
///
/// let error = even.validate(&json!(-2)).unwrap_err();
/// assert_eq!(error.kind(), ErrorKind::RangeOutOfBounds);
///
/// let error = even.validate(&json!(3)).unwrap_err();
/// assert_eq!(error.kind(), ErrorKind::RefinementFailed);
/// ```
pub struct RefinedSchema<S: SchemaLike> {
    inner: S,
    predicate: Predicate<S::Output>,
    message: String,
    cache: RoutineCache<S::Output>,
}

impl<S: SchemaLike> RefinedSchema<S> {
    /// The message used by [`SchemaLike::satisfies`].
    pub const DEFAULT_MESSAGE: &'static str = "Failed refinement check";

    /// Wraps `inner` with `predicate`, reporting `message` when it returns false.
    pub fn new<F>(inner: S, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&S::Output) -> bool + Send + Sync + 'static,
    {
        Self {
            inner,
            predicate: Arc::new(predicate),
            message: message.into(),
            cache: RoutineCache::new(),
        }
    }

    /// Returns the wrapped schema.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns the message reported when the predicate fails.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<S: SchemaLike> Clone for RefinedSchema<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            predicate: Arc::clone(&self.predicate),
            message: self.message.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<S: SchemaLike> fmt::Debug for RefinedSchema<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefinedSchema")
            .field("kind", &self.inner.kind())
            .field("message", &self.message)
            .finish()
    }
}

fn refine_output<S: SchemaLike>(
    outcome: ValidationOutcome<S::Output>,
    predicate: &Predicate<S::Output>,
    message: &str,
    path: &JsonPath,
) -> ValidationOutcome<S::Output> {
    match outcome {
        Validation::Success(output) if predicate(&output) => success(output),
        Validation::Success(output) => {
            let got = S::output_to_value(output);
            failure(path.clone(), ErrorKind::RefinementFailed, message, got.as_ref())
        }
        Validation::Failure(error) => Validation::Failure(error),
    }
}

impl<S: SchemaLike> SchemaLike for RefinedSchema<S> {
    type Output = S::Output;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Refinement
    }

    fn interpret(&self, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<Self::Output> {
        refine_output::<S>(self.inner.interpret(value, path), &self.predicate, &self.message, path)
    }

    fn build_routine(&self) -> Routine<Self::Output> {
        let inner = self.inner.compile();
        let predicate = Arc::clone(&self.predicate);
        let message = self.message.clone();
        routine(move |value, path| refine_output::<S>(inner(value, path), &predicate, &message, path))
    }

    fn routine_cache(&self) -> &RoutineCache<Self::Output> {
        &self.cache
    }

    fn output_to_value(output: Self::Output) -> Option<Value> {
        S::output_to_value(output)
    }
}

/// Validates with `first`, then validates `first`'s output with `second`.
///
/// Both stages see the same path. The output of `first` is converted back to
/// an untyped value before `second` runs, so an absent output from an
/// optional first stage arrives at `second` as absent.
///
/// # Example
///
/// ```rust
/// use schemata::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let code = Schema::string().min_len(1).pipe(Schema::literal("ok"));
///
/// assert!(code.validate(&json!("ok")).is_ok());
/// assert!(code.validate(&json!("")).is_err());
/// assert!(code.validate(&json!("nope")).is_err());
/// ```
#[derive(Clone)]
pub struct PipeSchema<A: SchemaLike, B: SchemaLike> {
    first: A,
    second: B,
    cache: RoutineCache<B::Output>,
}

impl<A: SchemaLike, B: SchemaLike> PipeSchema<A, B> {
    /// Chains `first` into `second`.
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            cache: RoutineCache::new(),
        }
    }

    /// Returns the first stage.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Returns the second stage.
    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<A: SchemaLike, B: SchemaLike> SchemaLike for PipeSchema<A, B> {
    type Output = B::Output;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Pipe
    }

    fn interpret(&self, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<Self::Output> {
        match self.first.interpret(value, path) {
            Validation::Success(output) => {
                let intermediate = A::output_to_value(output);
                self.second.interpret(intermediate.as_ref(), path)
            }
            Validation::Failure(error) => Validation::Failure(error),
        }
    }

    fn build_routine(&self) -> Routine<Self::Output> {
        let first = self.first.compile();
        let second = self.second.compile();
        routine(move |value, path| match first(value, path) {
            Validation::Success(output) => {
                let intermediate = A::output_to_value(output);
                second(intermediate.as_ref(), path)
            }
            Validation::Failure(error) => Validation::Failure(error),
        })
    }

    fn routine_cache(&self) -> &RoutineCache<Self::Output> {
        &self.cache
    }

    fn output_to_value(output: Self::Output) -> Option<Value> {
        B::output_to_value(output)
    }
}
