//! Array schema validation.
//!
//! This module provides [`ArraySchema`] for validating homogeneous arrays with
//! an element schema and length bounds.

use serde_json::Value;
use stillwater::Validation;

use crate::error::ErrorKind;
use crate::path::JsonPath;
use crate::validation::{failure, success, type_failure, Rule, ValidationOutcome, Violation};

use super::compile::{first_violation, routine, Check, Routine, RoutineCache};
use super::traits::SchemaLike;
use super::SchemaKind;

#[derive(Debug, Clone, Copy)]
enum ArrayRule {
    MinLength,
    MaxLength,
}

#[derive(Clone, Default)]
struct ArraySettings {
    min_len: Option<Rule<usize>>,
    max_len: Option<Rule<usize>>,
    type_message: Option<String>,
    last: Option<ArrayRule>,
}

/// Length bounds for building an [`ArraySchema`] in one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrayOptions {
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
}

/// A schema for validating array values.
///
/// The array's length is checked first, then each element is validated in
/// index order. The first failing element stops validation and its failure
/// is returned as-is, with the element's index on the path.
///
/// # Example
///
/// ```rust
/// use schemata::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::array(Schema::number().min(5.0).max(10.0));
///
/// assert_eq!(schema.validate(&json!([6, 7])).unwrap().len(), 2);
///
/// let error = schema.validate(&json!([6, 7, 11])).unwrap_err();
/// assert_eq!(error.path().to_strings(), vec!["2"]);
/// assert_eq!(error.message(), "Number must be less than or equal to 10");
/// ```
#[derive(Clone)]
pub struct ArraySchema<S: SchemaLike> {
    element: S,
    settings: ArraySettings,
    cache: RoutineCache<Vec<S::Output>>,
}

impl<S: SchemaLike> ArraySchema<S> {
    /// Creates a new array schema with the given element schema.
    pub fn new(element: S) -> Self {
        Self::from_parts(element, ArraySettings::default())
    }

    /// Creates an array schema with length bounds preset.
    pub fn with_options(element: S, options: ArrayOptions) -> Self {
        let last = match (options.min_len, options.max_len) {
            (_, Some(_)) => Some(ArrayRule::MaxLength),
            (Some(_), None) => Some(ArrayRule::MinLength),
            (None, None) => None,
        };
        Self::from_parts(
            element,
            ArraySettings {
                min_len: options.min_len.map(Rule::new),
                max_len: options.max_len.map(Rule::new),
                last,
                ..ArraySettings::default()
            },
        )
    }

    fn from_parts(element: S, settings: ArraySettings) -> Self {
        Self {
            element,
            settings,
            cache: RoutineCache::new(),
        }
    }

    fn derive(&self, update: impl FnOnce(&mut ArraySettings)) -> Self {
        let mut settings = self.settings.clone();
        update(&mut settings);
        Self::from_parts(self.element.clone(), settings)
    }

    /// Returns the element schema.
    pub fn element(&self) -> &S {
        &self.element
    }

    /// Adds a minimum length constraint.
    ///
    /// The array must have at least `min` items.
    pub fn min_len(&self, min: usize) -> Self {
        self.derive(|s| {
            s.min_len = Some(Rule::new(min));
            s.last = Some(ArrayRule::MinLength);
        })
    }

    /// Adds a maximum length constraint.
    ///
    /// The array must have at most `max` items.
    pub fn max_len(&self, max: usize) -> Self {
        self.derive(|s| {
            s.max_len = Some(Rule::new(max));
            s.last = Some(ArrayRule::MaxLength);
        })
    }

    /// Requires at least one element.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::array(Schema::string()).non_empty();
    ///
    /// let error = schema.validate(&json!([])).unwrap_err();
    /// assert_eq!(error.message(), "Array must contain at least 1 element(s)");
    /// ```
    pub fn non_empty(&self) -> Self {
        self.min_len(1)
    }

    /// Sets a custom error message for the most recent length constraint,
    /// or for the type check if there is none.
    pub fn error(&self, message: impl Into<String>) -> Self {
        let message = Some(message.into());
        self.derive(|s| {
            let rule = match s.last {
                Some(ArrayRule::MinLength) => s.min_len.as_mut(),
                Some(ArrayRule::MaxLength) => s.max_len.as_mut(),
                None => {
                    s.type_message = message;
                    return;
                }
            };
            if let Some(rule) = rule {
                rule.message = message;
            }
        })
    }

    fn length_violation(&self, len: usize) -> Option<Violation> {
        self.settings
            .min_len
            .as_ref()
            .and_then(|rule| min_len_violation(rule, len))
            .or_else(|| self.settings.max_len.as_ref().and_then(|rule| max_len_violation(rule, len)))
    }
}

impl<S: SchemaLike> SchemaLike for ArraySchema<S> {
    type Output = Vec<S::Output>;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Array
    }

    fn interpret(&self, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<Self::Output> {
        let Some(items) = value.and_then(Value::as_array) else {
            return type_failure("array", value, path, self.settings.type_message.as_deref());
        };
        if let Some((kind, message)) = self.length_violation(items.len()) {
            return failure(path.clone(), kind, message, value);
        }

        let mut output = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.element.interpret(Some(item), &path.push_index(index)).into_result() {
                Ok(validated) => output.push(validated),
                Err(error) => return Validation::Failure(error),
            }
        }
        success(output)
    }

    fn build_routine(&self) -> Routine<Self::Output> {
        let element = self.element.compile();
        let type_message = self.settings.type_message.clone();
        let mut checks: Vec<Check<usize>> = Vec::new();
        if let Some(rule) = self.settings.min_len.clone() {
            checks.push(Box::new(move |len: &usize| min_len_violation(&rule, *len)));
        }
        if let Some(rule) = self.settings.max_len.clone() {
            checks.push(Box::new(move |len: &usize| max_len_violation(&rule, *len)));
        }

        routine(move |value, path| {
            let Some(items) = value.and_then(Value::as_array) else {
                return type_failure("array", value, path, type_message.as_deref());
            };
            if let Some((kind, message)) = first_violation(&checks, &items.len()) {
                return failure(path.clone(), kind, message, value);
            }

            let mut output = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match element(Some(item), &path.push_index(index)).into_result() {
                    Ok(validated) => output.push(validated),
                    Err(error) => return Validation::Failure(error),
                }
            }
            success(output)
        })
    }

    fn routine_cache(&self) -> &RoutineCache<Self::Output> {
        &self.cache
    }

    fn output_to_value(output: Self::Output) -> Option<Value> {
        let items = output
            .into_iter()
            .map(|item| S::output_to_value(item).unwrap_or(Value::Null))
            .collect();
        Some(Value::Array(items))
    }
}

fn min_len_violation(rule: &Rule<usize>, len: usize) -> Option<Violation> {
    (len < rule.value).then(|| {
        rule.violation(ErrorKind::LengthOutOfBounds, |min| {
            format!("Array must contain at least {} element(s)", min)
        })
    })
}

fn max_len_violation(rule: &Rule<usize>, len: usize) -> Option<Violation> {
    (len > rule.value).then(|| {
        rule.violation(ErrorKind::LengthOutOfBounds, |max| {
            format!("Array must contain at most {} element(s)", max)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NumberSchema, StringSchema};
    use serde_json::json;

    #[test]
    fn test_array_accepts_valid_elements() {
        let schema = ArraySchema::new(StringSchema::new());
        let result = schema.interpret(Some(&json!(["a", "b"])), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_array_rejects_non_array() {
        let schema = ArraySchema::new(StringSchema::new());
        let error = schema
            .interpret(Some(&json!({"0": "a"})), &JsonPath::root())
            .into_result()
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::TypeMismatch);
        assert_eq!(error.message, "Expected array, received object");
    }

    #[test]
    fn test_length_checked_before_elements() {
        let schema = ArraySchema::new(NumberSchema::new()).max_len(1);
        let error = schema
            .interpret(Some(&json!(["x", "y"])), &JsonPath::root())
            .into_result()
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::LengthOutOfBounds);
        assert_eq!(error.message, "Array must contain at most 1 element(s)");
        assert!(error.path.is_root());
    }

    #[test]
    fn test_first_element_failure_wins() {
        let schema = ArraySchema::new(NumberSchema::new().max(10.0));
        let error = schema
            .interpret(Some(&json!([1, 20, "x"])), &JsonPath::from_field("scores"))
            .into_result()
            .unwrap_err();
        assert_eq!(error.path.to_string(), "scores.1");
        assert_eq!(error.kind, ErrorKind::RangeOutOfBounds);
    }

    #[test]
    fn test_custom_length_message() {
        let schema = ArraySchema::new(StringSchema::new()).min_len(2).error("need two tags");
        let error = schema
            .interpret(Some(&json!(["a"])), &JsonPath::root())
            .into_result()
            .unwrap_err();
        assert_eq!(error.message, "need two tags");
    }

    #[test]
    fn test_with_options() {
        let schema = ArraySchema::with_options(
            StringSchema::new(),
            ArrayOptions {
                min_len: Some(1),
                max_len: Some(2),
            },
        );
        assert!(schema.interpret(Some(&json!([])), &JsonPath::root()).is_failure());
        assert!(schema.interpret(Some(&json!(["a"])), &JsonPath::root()).is_success());
        assert!(schema.interpret(Some(&json!(["a", "b", "c"])), &JsonPath::root()).is_failure());
    }

    #[test]
    fn test_compile_builds_element_first() {
        let element = std::sync::Arc::new(NumberSchema::new());
        let schema = ArraySchema::new(element.clone());
        assert!(!element.is_compiled());

        schema.compile();
        assert!(schema.is_compiled());
        assert_eq!(element.is_compiled(), !cfg!(feature = "interpreted"));
    }

    #[test]
    fn test_compiled_routine_matches_interpreter() {
        let schema = ArraySchema::new(NumberSchema::new().positive()).min_len(1).max_len(3);
        let routine = schema.compile();
        for input in [
            json!([]),
            json!([1, 2]),
            json!([1, -2]),
            json!([1, 2, 3, 4]),
            json!("nope"),
            json!(null),
        ] {
            assert_eq!(
                routine(Some(&input), &JsonPath::root()).into_result(),
                schema.interpret(Some(&input), &JsonPath::root()).into_result()
            );
        }
    }
}
