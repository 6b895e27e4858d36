//! Compiled validation routines.
//!
//! Every schema node can be interpreted directly, walking its settings and
//! dispatching into its children's interpreters on each call. The first time a
//! node is validated through [`SchemaLike::compile`], it instead builds a
//! [`Routine`]: a closure that captures the node's constraint values and its
//! children's already-compiled routines. The routine is stored in the node's
//! [`RoutineCache`] and reused by every later validation, and by every parent
//! that embeds the node.
//!
//! Routines and the interpreter must agree on every outcome for every input.

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::path::JsonPath;
use crate::schema::traits::SchemaLike;
use crate::schema::SchemaKind;
use crate::validation::{ValidationOutcome, Violation};

/// A self-contained validation function for one schema node.
///
/// Takes the input (`None` when absent) and the path it sits at.
pub type Routine<T> =
    Arc<dyn Fn(Option<&Value>, &JsonPath) -> ValidationOutcome<T> + Send + Sync>;

/// A single pre-built constraint check over an already type-checked input.
pub(crate) type Check<T> = Box<dyn Fn(&T) -> Option<Violation> + Send + Sync>;

/// Wraps a closure as a [`Routine`].
pub(crate) fn routine<T, F>(f: F) -> Routine<T>
where
    F: Fn(Option<&Value>, &JsonPath) -> ValidationOutcome<T> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Runs checks in order and returns the first violation.
pub(crate) fn first_violation<T: ?Sized>(checks: &[Check<T>], input: &T) -> Option<Violation> {
    checks.iter().find_map(|check| check(input))
}

/// Binds a node's interpreter as its routine.
///
/// Used in place of a specialized routine when the crate is built with the
/// `interpreted` feature. Outcomes are identical either way.
pub fn interpreted<S: SchemaLike>(schema: &S) -> Routine<S::Output> {
    let node = schema.clone();
    routine(move |value: Option<&Value>, path: &JsonPath| node.interpret(value, path))
}

/// The per-node slot holding a compiled routine.
///
/// The slot transitions once from empty to populated. Concurrent first uses
/// are serialized by the underlying `OnceLock`; a routine is a pure function
/// of the node's settings, so which thread builds it is irrelevant.
///
/// Cloning a populated cache shares the routine. Builders never clone a
/// cache: a node with new settings always starts with an empty one.
pub struct RoutineCache<T> {
    slot: OnceLock<Routine<T>>,
}

impl<T> RoutineCache<T> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Returns the cached routine, building it with `build` on first use.
    pub fn get_or_build(&self, kind: SchemaKind, build: impl FnOnce() -> Routine<T>) -> Routine<T> {
        let routine = self.slot.get_or_init(|| {
            tracing::trace!(kind = %kind, "building validation routine");
            build()
        });
        Arc::clone(routine)
    }

    /// Returns true once a routine has been built.
    pub fn is_populated(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl<T> Default for RoutineCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RoutineCache<T> {
    fn clone(&self) -> Self {
        let slot = OnceLock::new();
        if let Some(routine) = self.slot.get() {
            let _ = slot.set(Arc::clone(routine));
        }
        Self { slot }
    }
}

impl<T> fmt::Debug for RoutineCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutineCache")
            .field("populated", &self.is_populated())
            .finish()
    }
}
