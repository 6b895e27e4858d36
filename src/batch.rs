//! Parallel validation of many inputs against one schema.
//!
//! The schema is compiled once on the calling thread; the resulting routine is
//! then shared by rayon's worker threads.

use rayon::prelude::*;
use serde_json::Value;
use tracing::debug;

use crate::path::JsonPath;
use crate::schema::SchemaLike;
use crate::validation::ValidationOutcome;

/// Validates every input against `schema` in parallel.
///
/// Outcomes are returned in input order, each exactly what
/// [`SchemaLike::safe_validate`] would return for that input.
///
/// # Example
///
/// ```rust
/// use schemata::{validate_batch, Schema};
/// use serde_json::json;
///
/// let schema = Schema::number().positive();
/// let outcomes = validate_batch(&schema, &[json!(1), json!(-1), json!("x")]);
///
/// assert!(outcomes[0].is_success());
/// assert!(outcomes[1].is_failure());
/// assert!(outcomes[2].is_failure());
/// ```
pub fn validate_batch<S: SchemaLike>(schema: &S, inputs: &[Value]) -> Vec<ValidationOutcome<S::Output>> {
    let routine = schema.compile();
    let outcomes: Vec<ValidationOutcome<S::Output>> = inputs
        .par_iter()
        .map(|input| routine(Some(input), &JsonPath::root()))
        .collect();

    debug!(
        kind = %schema.kind(),
        inputs = inputs.len(),
        failures = outcomes.iter().filter(|outcome| outcome.is_failure()).count(),
        "validated batch"
    );
    outcomes
}
