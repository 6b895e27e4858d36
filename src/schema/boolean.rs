//! Boolean schema validation.

use serde_json::Value;

use crate::error::ErrorKind;
use crate::path::JsonPath;
use crate::validation::{failure, success, type_failure, Rule, ValidationOutcome, Violation};

use super::compile::{first_violation, routine, Check, Routine, RoutineCache};
use super::traits::SchemaLike;
use super::SchemaKind;

#[derive(Debug, Clone, Copy)]
enum BooleanRule {
    MustBeTrue,
    MustBeFalse,
}

#[derive(Clone, Default)]
struct BooleanSettings {
    must_be_true: Option<Rule<()>>,
    must_be_false: Option<Rule<()>>,
    type_message: Option<String>,
    last: Option<BooleanRule>,
}

/// Constraint flags for building a [`BooleanSchema`] in one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanOptions {
    pub must_be_true: bool,
    pub must_be_false: bool,
}

/// A schema for validating `true`/`false`.
///
/// Only JSON booleans pass the type check; `0`, `"true"` and `null` do not.
///
/// # Example
///
/// ```rust
/// use schemata::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let accepted = Schema::boolean().must_be_true().error("terms must be accepted");
///
/// assert_eq!(accepted.validate(&json!(true)).unwrap(), true);
/// assert_eq!(
///     accepted.validate(&json!(false)).unwrap_err().message(),
///     "terms must be accepted"
/// );
/// ```
#[derive(Clone)]
pub struct BooleanSchema {
    settings: BooleanSettings,
    cache: RoutineCache<bool>,
}

impl BooleanSchema {
    /// Creates a boolean schema accepting either value.
    pub fn new() -> Self {
        Self::from_settings(BooleanSettings::default())
    }

    /// Creates a boolean schema from a set of constraint flags.
    pub fn with_options(options: BooleanOptions) -> Self {
        let last = if options.must_be_false {
            Some(BooleanRule::MustBeFalse)
        } else {
            options.must_be_true.then_some(BooleanRule::MustBeTrue)
        };
        Self::from_settings(BooleanSettings {
            must_be_true: options.must_be_true.then(|| Rule::new(())),
            must_be_false: options.must_be_false.then(|| Rule::new(())),
            last,
            ..BooleanSettings::default()
        })
    }

    fn from_settings(settings: BooleanSettings) -> Self {
        Self {
            settings,
            cache: RoutineCache::new(),
        }
    }

    fn derive(&self, update: impl FnOnce(&mut BooleanSettings)) -> Self {
        let mut settings = self.settings.clone();
        update(&mut settings);
        Self::from_settings(settings)
    }

    /// Accepts only `true`.
    pub fn must_be_true(&self) -> Self {
        self.derive(|s| {
            s.must_be_true = Some(Rule::new(()));
            s.last = Some(BooleanRule::MustBeTrue);
        })
    }

    /// Accepts only `false`.
    pub fn must_be_false(&self) -> Self {
        self.derive(|s| {
            s.must_be_false = Some(Rule::new(()));
            s.last = Some(BooleanRule::MustBeFalse);
        })
    }

    /// Sets a custom error message for the most recent constraint, or for
    /// the type check if there is none.
    pub fn error(&self, message: impl Into<String>) -> Self {
        let message = Some(message.into());
        self.derive(|s| match s.last {
            Some(BooleanRule::MustBeTrue) => {
                if let Some(rule) = s.must_be_true.as_mut() {
                    rule.message = message;
                }
            }
            Some(BooleanRule::MustBeFalse) => {
                if let Some(rule) = s.must_be_false.as_mut() {
                    rule.message = message;
                }
            }
            None => s.type_message = message,
        })
    }

    fn checks(&self) -> Vec<Check<bool>> {
        let mut checks: Vec<Check<bool>> = Vec::new();
        if let Some(rule) = self.settings.must_be_true.clone() {
            checks.push(Box::new(move |b: &bool| must_be_true_violation(&rule, *b)));
        }
        if let Some(rule) = self.settings.must_be_false.clone() {
            checks.push(Box::new(move |b: &bool| must_be_false_violation(&rule, *b)));
        }
        checks
    }
}

impl Default for BooleanSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for BooleanSchema {
    type Output = bool;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Boolean
    }

    fn interpret(&self, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<bool> {
        let Some(b) = value.and_then(Value::as_bool) else {
            return type_failure("boolean", value, path, self.settings.type_message.as_deref());
        };
        let violation = self
            .settings
            .must_be_true
            .as_ref()
            .and_then(|rule| must_be_true_violation(rule, b))
            .or_else(|| {
                self.settings
                    .must_be_false
                    .as_ref()
                    .and_then(|rule| must_be_false_violation(rule, b))
            });
        match violation {
            Some((kind, message)) => failure(path.clone(), kind, message, value),
            None => success(b),
        }
    }

    fn build_routine(&self) -> Routine<bool> {
        let type_message = self.settings.type_message.clone();
        let checks = self.checks();
        routine(move |value, path| {
            let Some(b) = value.and_then(Value::as_bool) else {
                return type_failure("boolean", value, path, type_message.as_deref());
            };
            match first_violation(&checks, &b) {
                Some((kind, message)) => failure(path.clone(), kind, message, value),
                None => success(b),
            }
        })
    }

    fn routine_cache(&self) -> &RoutineCache<bool> {
        &self.cache
    }

    fn output_to_value(output: bool) -> Option<Value> {
        Some(Value::Bool(output))
    }
}

fn must_be_true_violation(rule: &Rule<()>, b: bool) -> Option<Violation> {
    (!b).then(|| rule.violation(ErrorKind::LiteralMismatch, |_| "Boolean must be true".to_string()))
}

fn must_be_false_violation(rule: &Rule<()>, b: bool) -> Option<Violation> {
    b.then(|| rule.violation(ErrorKind::LiteralMismatch, |_| "Boolean must be false".to_string()))
}
