//! Numeric schema validation.
//!
//! This module provides [`NumberSchema`] for validating numeric values with
//! constraints like minimum/maximum value and sign requirements. Integers and
//! floats are both accepted; the validated value is returned unchanged.

use serde_json::{Number, Value};
use std::ops::RangeInclusive;

use crate::error::ErrorKind;
use crate::path::JsonPath;
use crate::validation::{failure, success, type_failure, Rule, ValidationOutcome, Violation};

use super::compile::{first_violation, routine, Check, Routine, RoutineCache};
use super::traits::SchemaLike;
use super::SchemaKind;

#[derive(Debug, Clone, Copy)]
enum NumberRule {
    Min,
    Max,
    Positive,
    Negative,
}

#[derive(Clone, Default)]
struct NumberSettings {
    min: Option<Rule<f64>>,
    max: Option<Rule<f64>>,
    positive: Option<Rule<()>>,
    negative: Option<Rule<()>>,
    type_message: Option<String>,
    last: Option<NumberRule>,
}

impl NumberSettings {
    fn first_violation(&self, n: f64) -> Option<Violation> {
        if let Some(violation) = self.min.as_ref().and_then(|rule| min_violation(rule, n)) {
            return Some(violation);
        }
        if let Some(violation) = self.max.as_ref().and_then(|rule| max_violation(rule, n)) {
            return Some(violation);
        }
        if let Some(violation) = self.positive.as_ref().and_then(|rule| positive_violation(rule, n)) {
            return Some(violation);
        }
        self.negative.as_ref().and_then(|rule| negative_violation(rule, n))
    }
}

/// Constraint values for building a [`NumberSchema`] in one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberOptions {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub positive: bool,
    pub negative: bool,
}

/// A schema for validating numeric values.
///
/// Bounds are inclusive. `positive` and `negative` are strict, so zero fails
/// both. Checks run in the order min, max, positive, negative and stop at
/// the first failure.
///
/// # Example
///
/// ```rust
/// use schemata::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::number().min(0.0).max(100.0);
///
/// assert!(schema.validate(&json!(42)).is_ok());
/// assert!(schema.validate(&json!(99.5)).is_ok());
///
/// let error = schema.validate(&json!(-50)).unwrap_err();
/// assert_eq!(error.message(), "Number must be greater than or equal to 0");
/// ```
#[derive(Clone)]
pub struct NumberSchema {
    settings: NumberSettings,
    cache: RoutineCache<Number>,
}

impl NumberSchema {
    /// Creates a new number schema with no constraints.
    pub fn new() -> Self {
        Self::from_settings(NumberSettings::default())
    }

    /// Creates a number schema from a set of constraint values.
    ///
    /// A following `error()` applies to the last constraint set, in check order.
    pub fn with_options(options: NumberOptions) -> Self {
        let last = if options.negative {
            Some(NumberRule::Negative)
        } else if options.positive {
            Some(NumberRule::Positive)
        } else if options.max.is_some() {
            Some(NumberRule::Max)
        } else {
            options.min.map(|_| NumberRule::Min)
        };
        Self::from_settings(NumberSettings {
            min: options.min.map(Rule::new),
            max: options.max.map(Rule::new),
            positive: options.positive.then(|| Rule::new(())),
            negative: options.negative.then(|| Rule::new(())),
            last,
            ..NumberSettings::default()
        })
    }

    fn from_settings(settings: NumberSettings) -> Self {
        Self {
            settings,
            cache: RoutineCache::new(),
        }
    }

    fn derive(&self, update: impl FnOnce(&mut NumberSettings)) -> Self {
        let mut settings = self.settings.clone();
        update(&mut settings);
        Self::from_settings(settings)
    }

    /// Adds a minimum value constraint (inclusive).
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::number().min(5.0);
    ///
    /// assert!(schema.validate(&json!(5)).is_ok());
    /// assert!(schema.validate(&json!(4.99)).is_err());
    /// ```
    pub fn min(&self, value: f64) -> Self {
        self.derive(|s| {
            s.min = Some(Rule::new(value));
            s.last = Some(NumberRule::Min);
        })
    }

    /// Adds a maximum value constraint (inclusive).
    pub fn max(&self, value: f64) -> Self {
        self.derive(|s| {
            s.max = Some(Rule::new(value));
            s.last = Some(NumberRule::Max);
        })
    }

    /// Adds both bounds at once; equivalent to `.min(start).max(end)`.
    pub fn range(&self, range: RangeInclusive<f64>) -> Self {
        self.min(*range.start()).max(*range.end())
    }

    /// Requires the number to be strictly greater than zero.
    pub fn positive(&self) -> Self {
        self.derive(|s| {
            s.positive = Some(Rule::new(()));
            s.last = Some(NumberRule::Positive);
        })
    }

    /// Requires the number to be strictly less than zero.
    pub fn negative(&self) -> Self {
        self.derive(|s| {
            s.negative = Some(Rule::new(()));
            s.last = Some(NumberRule::Negative);
        })
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the type error message
    /// (used when the value is not a number).
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::number()
    ///     .min(18.0)
    ///     .error("must be at least 18 years old");
    ///
    /// let error = schema.validate(&json!(16)).unwrap_err();
    /// assert_eq!(error.message(), "must be at least 18 years old");
    /// ```
    pub fn error(&self, message: impl Into<String>) -> Self {
        let message = Some(message.into());
        self.derive(|s| {
            let slot = match s.last {
                Some(NumberRule::Min) => s.min.as_mut().map(|r| &mut r.message),
                Some(NumberRule::Max) => s.max.as_mut().map(|r| &mut r.message),
                Some(NumberRule::Positive) => s.positive.as_mut().map(|r| &mut r.message),
                Some(NumberRule::Negative) => s.negative.as_mut().map(|r| &mut r.message),
                None => Some(&mut s.type_message),
            };
            if let Some(slot) = slot {
                *slot = message;
            }
        })
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for NumberSchema {
    type Output = Number;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Number
    }

    fn interpret(&self, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<Number> {
        let Some((number, n)) = as_number(value) else {
            return type_failure("number", value, path, self.settings.type_message.as_deref());
        };
        match self.settings.first_violation(n) {
            Some((kind, message)) => failure(path.clone(), kind, message, value),
            None => success(number.clone()),
        }
    }

    fn build_routine(&self) -> Routine<Number> {
        let type_message = self.settings.type_message.clone();
        let mut checks: Vec<Check<f64>> = Vec::new();
        if let Some(rule) = self.settings.min.clone() {
            checks.push(Box::new(move |n: &f64| min_violation(&rule, *n)));
        }
        if let Some(rule) = self.settings.max.clone() {
            checks.push(Box::new(move |n: &f64| max_violation(&rule, *n)));
        }
        if let Some(rule) = self.settings.positive.clone() {
            checks.push(Box::new(move |n: &f64| positive_violation(&rule, *n)));
        }
        if let Some(rule) = self.settings.negative.clone() {
            checks.push(Box::new(move |n: &f64| negative_violation(&rule, *n)));
        }

        routine(move |value, path| {
            let Some((number, n)) = as_number(value) else {
                return type_failure("number", value, path, type_message.as_deref());
            };
            match first_violation(&checks, &n) {
                Some((kind, message)) => failure(path.clone(), kind, message, value),
                None => success(number.clone()),
            }
        })
    }

    fn routine_cache(&self) -> &RoutineCache<Number> {
        &self.cache
    }

    fn output_to_value(output: Number) -> Option<Value> {
        Some(Value::Number(output))
    }
}

/// Extracts a non-NaN number together with its `f64` view.
fn as_number(value: Option<&Value>) -> Option<(&Number, f64)> {
    match value {
        Some(Value::Number(number)) => number
            .as_f64()
            .filter(|n| !n.is_nan())
            .map(|n| (number, n)),
        _ => None,
    }
}

fn min_violation(rule: &Rule<f64>, n: f64) -> Option<Violation> {
    (n < rule.value).then(|| {
        rule.violation(ErrorKind::RangeOutOfBounds, |min| {
            format!("Number must be greater than or equal to {}", min)
        })
    })
}

fn max_violation(rule: &Rule<f64>, n: f64) -> Option<Violation> {
    (n > rule.value).then(|| {
        rule.violation(ErrorKind::RangeOutOfBounds, |max| {
            format!("Number must be less than or equal to {}", max)
        })
    })
}

fn positive_violation(rule: &Rule<()>, n: f64) -> Option<Violation> {
    (n <= 0.0).then(|| {
        rule.violation(ErrorKind::SignConstraintViolated, |_| {
            "Number must be positive".to_string()
        })
    })
}

fn negative_violation(rule: &Rule<()>, n: f64) -> Option<Violation> {
    (n >= 0.0).then(|| {
        rule.violation(ErrorKind::SignConstraintViolated, |_| {
            "Number must be negative".to_string()
        })
    })
}
