//! String schema validation.
//!
//! This module provides [`StringSchema`] for validating string values with
//! minimum/maximum length and a regex pattern. Lengths count UTF-16 code
//! units. Checks run in a fixed order (min length, max length, pattern) and
//! stop at the first failure.

use regex::Regex;
use serde_json::Value;

use crate::error::ErrorKind;
use crate::path::JsonPath;
use crate::validation::{failure, success, type_failure, Rule, ValidationOutcome, Violation};

use super::compile::{first_violation, routine, Check, Routine, RoutineCache};
use super::traits::SchemaLike;
use super::SchemaKind;

/// Which constraint `error()` applies to.
#[derive(Debug, Clone, Copy)]
enum StringRule {
    MinLength,
    MaxLength,
    Pattern,
}

#[derive(Clone, Default)]
struct StringSettings {
    min_len: Option<Rule<usize>>,
    max_len: Option<Rule<usize>>,
    pattern: Option<Rule<Regex>>,
    type_message: Option<String>,
    last: Option<StringRule>,
}

impl StringSettings {
    fn first_violation(&self, s: &str) -> Option<Violation> {
        if let Some(violation) = self.min_len.as_ref().and_then(|rule| min_len_violation(rule, s)) {
            return Some(violation);
        }
        if let Some(violation) = self.max_len.as_ref().and_then(|rule| max_len_violation(rule, s)) {
            return Some(violation);
        }
        self.pattern.as_ref().and_then(|rule| pattern_violation(rule, s))
    }
}

/// Constraint values for building a [`StringSchema`] in one call.
#[derive(Debug, Clone, Default)]
pub struct StringOptions {
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub pattern: Option<Regex>,
}

/// A schema for validating string values.
///
/// # Example
///
/// ```rust
/// use schemata::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::string()
///     .min_len(3)
///     .max_len(20)
///     .pattern(r"^[a-z]+$")
///     .unwrap();
///
/// assert!(schema.validate(&json!("alice")).is_ok());
///
/// // Only the first failing check is reported.
/// let error = schema.validate(&json!("AB")).unwrap_err();
/// assert_eq!(error.message(), "String must be at least 3 characters");
/// ```
#[derive(Clone)]
pub struct StringSchema {
    settings: StringSettings,
    cache: RoutineCache<String>,
}

impl StringSchema {
    /// Creates a new string schema with no constraints.
    pub fn new() -> Self {
        Self::from_settings(StringSettings::default())
    }

    /// Creates a string schema from a set of constraint values.
    ///
    /// A following `error()` applies to the last constraint set, in check order.
    pub fn with_options(options: StringOptions) -> Self {
        let last = if options.pattern.is_some() {
            Some(StringRule::Pattern)
        } else if options.max_len.is_some() {
            Some(StringRule::MaxLength)
        } else {
            options.min_len.map(|_| StringRule::MinLength)
        };
        Self::from_settings(StringSettings {
            min_len: options.min_len.map(Rule::new),
            max_len: options.max_len.map(Rule::new),
            pattern: options.pattern.map(Rule::new),
            last,
            ..StringSettings::default()
        })
    }

    fn from_settings(settings: StringSettings) -> Self {
        Self {
            settings,
            cache: RoutineCache::new(),
        }
    }

    fn derive(&self, update: impl FnOnce(&mut StringSettings)) -> Self {
        let mut settings = self.settings.clone();
        update(&mut settings);
        Self::from_settings(settings)
    }

    /// Returns a schema that also requires at least `min` code units.
    pub fn min_len(&self, min: usize) -> Self {
        self.derive(|s| {
            s.min_len = Some(Rule::new(min));
            s.last = Some(StringRule::MinLength);
        })
    }

    /// Returns a schema that also requires at most `max` code units.
    pub fn max_len(&self, max: usize) -> Self {
        self.derive(|s| {
            s.max_len = Some(Rule::new(max));
            s.last = Some(StringRule::MaxLength);
        })
    }

    /// Returns a schema that also rejects the empty string.
    pub fn non_empty(&self) -> Self {
        self.min_len(1)
    }

    /// Returns a schema that also requires a match of `pattern`.
    ///
    /// The pattern is parsed here, once; an invalid pattern is an error.
    /// Matching is unanchored unless the pattern anchors itself.
    pub fn pattern(&self, pattern: &str) -> Result<Self, regex::Error> {
        Ok(self.regex(Regex::new(pattern)?))
    }

    /// Returns a schema that also requires a match of an already-built regex.
    ///
    /// # Example
    ///
    /// ```rust
    /// use regex::Regex;
    /// use schemata::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().regex(Regex::new(r"(?i)^hello").unwrap());
    /// assert!(schema.validate(&json!("HELLO world")).is_ok());
    /// ```
    pub fn regex(&self, regex: Regex) -> Self {
        self.derive(|s| {
            s.pattern = Some(Rule::new(regex));
            s.last = Some(StringRule::Pattern);
        })
    }

    /// Sets a custom message for the most recently added constraint.
    ///
    /// If no constraint has been added yet, the message replaces the one
    /// reported when the value is not a string.
    pub fn error(&self, message: impl Into<String>) -> Self {
        let message = Some(message.into());
        self.derive(|s| match s.last {
            Some(StringRule::MinLength) => set_message(&mut s.min_len, message),
            Some(StringRule::MaxLength) => set_message(&mut s.max_len, message),
            Some(StringRule::Pattern) => set_message(&mut s.pattern, message),
            None => s.type_message = message,
        })
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for StringSchema {
    type Output = String;

    fn kind(&self) -> SchemaKind {
        SchemaKind::String
    }

    fn interpret(&self, value: Option<&Value>, path: &JsonPath) -> ValidationOutcome<String> {
        let Some(s) = value.and_then(Value::as_str) else {
            return type_failure("string", value, path, self.settings.type_message.as_deref());
        };
        match self.settings.first_violation(s) {
            Some((kind, message)) => failure(path.clone(), kind, message, value),
            None => success(s.to_string()),
        }
    }

    fn build_routine(&self) -> Routine<String> {
        let type_message = self.settings.type_message.clone();
        let mut checks: Vec<Check<str>> = Vec::new();
        if let Some(rule) = self.settings.min_len.clone() {
            checks.push(Box::new(move |s: &str| min_len_violation(&rule, s)));
        }
        if let Some(rule) = self.settings.max_len.clone() {
            checks.push(Box::new(move |s: &str| max_len_violation(&rule, s)));
        }
        if let Some(rule) = self.settings.pattern.clone() {
            checks.push(Box::new(move |s: &str| pattern_violation(&rule, s)));
        }

        routine(move |value, path| {
            let Some(s) = value.and_then(Value::as_str) else {
                return type_failure("string", value, path, type_message.as_deref());
            };
            match first_violation(&checks, s) {
                Some((kind, message)) => failure(path.clone(), kind, message, value),
                None => success(s.to_string()),
            }
        })
    }

    fn routine_cache(&self) -> &RoutineCache<String> {
        &self.cache
    }

    fn output_to_value(output: String) -> Option<Value> {
        Some(Value::String(output))
    }
}

fn set_message<T>(rule: &mut Option<Rule<T>>, message: Option<String>) {
    if let Some(rule) = rule {
        rule.message = message;
    }
}

fn code_units(s: &str) -> usize {
    s.encode_utf16().count()
}

fn min_len_violation(rule: &Rule<usize>, s: &str) -> Option<Violation> {
    (code_units(s) < rule.value).then(|| {
        rule.violation(ErrorKind::LengthOutOfBounds, |min| {
            format!("String must be at least {} characters", min)
        })
    })
}

fn max_len_violation(rule: &Rule<usize>, s: &str) -> Option<Violation> {
    (code_units(s) > rule.value).then(|| {
        rule.violation(ErrorKind::LengthOutOfBounds, |max| {
            format!("String must be at most {} characters", max)
        })
    })
}

fn pattern_violation(rule: &Rule<Regex>, s: &str) -> Option<Violation> {
    (!rule.value.is_match(s)).then(|| {
        rule.violation(ErrorKind::PatternMismatch, |regex| {
            format!("String must match pattern /{}/", regex.as_str())
        })
    })
}
