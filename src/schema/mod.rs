//! Schema definitions for validation.
//!
//! This module provides the schema node types, the [`Schema`] factory, and the
//! compile layer that turns a node into a cached routine on first use.
//!
//! Validation is fail-fast: every node stops at its first failing check and
//! returns that single failure.
//!
//! # Example
//!
//! ```rust
//! use schemata::{Schema, SchemaLike};
//! use serde_json::json;
//!
//! let schema = Schema::object()
//!     .field("user", Schema::object().field("name", Schema::string().min_len(2)));
//!
//! let error = schema.validate(&json!({"user": {"name": "J"}})).unwrap_err();
//! assert_eq!(error.path().to_strings(), vec!["user", "name"]);
//! assert_eq!(error.message(), "String must be at least 2 characters");
//! ```

mod array;
mod boolean;
mod combinators;
mod compile;
mod literal;
mod numeric;
mod object;
mod string;
mod traits;
mod union;

use std::fmt::{self, Display};
use std::sync::Arc;

pub use array::{ArrayOptions, ArraySchema};
pub use boolean::{BooleanOptions, BooleanSchema};
pub use combinators::{NullableSchema, OptionalSchema, PipeSchema, RefinedSchema};
pub use compile::{interpreted, Routine, RoutineCache};
pub use literal::{Literal, LiteralSchema};
pub use numeric::{NumberOptions, NumberSchema};
pub use object::ObjectSchema;
pub use string::{StringOptions, StringSchema};
pub use traits::{erase, SchemaLike, ValueValidator};
pub use union::UnionSchema;

/// The kind tag of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    String,
    Number,
    Boolean,
    Literal,
    Array,
    Object,
    Union,
    Optional,
    Nullable,
    Refinement,
    Pipe,
}

impl SchemaKind {
    /// Returns the lowercase name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Literal => "literal",
            SchemaKind::Array => "array",
            SchemaKind::Object => "object",
            SchemaKind::Union => "union",
            SchemaKind::Optional => "optional",
            SchemaKind::Nullable => "nullable",
            SchemaKind::Refinement => "refinement",
            SchemaKind::Pipe => "pipe",
        }
    }
}

impl Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Entry point for creating validation schemas.
///
/// Each factory returns a node with no constraints; builder methods add one
/// constraint at a time and return a new node.
///
/// # Example
///
/// ```rust
/// use schemata::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let tags = Schema::array(Schema::string().non_empty()).max_len(3);
///
/// assert!(tags.validate(&json!(["a", "b"])).is_ok());
/// assert!(tags.validate(&json!(["a", ""])).is_err());
/// ```
pub struct Schema;

impl Schema {
    /// Creates a new string schema.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a new number schema.
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    /// Creates a new boolean schema.
    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    /// Creates a schema accepting exactly one scalar value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let admin = Schema::literal("admin");
    /// assert!(admin.validate(&json!("admin")).is_ok());
    ///
    /// let error = admin.validate(&json!("user")).unwrap_err();
    /// assert_eq!(error.message(), r#"Invalid literal value, expected "admin", received "user""#);
    /// ```
    pub fn literal(value: impl Into<Literal>) -> LiteralSchema {
        LiteralSchema::new(value)
    }

    /// Creates a new array schema whose elements must match `element`.
    pub fn array<S: SchemaLike>(element: S) -> ArraySchema<S> {
        ArraySchema::new(element)
    }

    /// Creates a new object schema with no fields.
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Creates a union of alternatives tried in order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::{erase, Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let id = Schema::union(vec![erase(Schema::string()), erase(Schema::number())]);
    ///
    /// // The first matching alternative wins.
    /// assert_eq!(id.validate(&json!("123")).unwrap(), Some(json!("123")));
    /// assert!(Schema::union(vec![]).validate(&json!(1)).is_err());
    /// ```
    pub fn union(alternatives: Vec<Arc<dyn ValueValidator>>) -> UnionSchema {
        UnionSchema::new(alternatives)
    }
}
