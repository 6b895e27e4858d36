//! Error types for validation failures.
//!
//! This module provides types for representing validation failures with their
//! path, category, message and offending value.

mod schema_error;

pub use schema_error::{ErrorKind, SchemaError, ValidationError};
