//! # Schemata
//!
//! Declarative validation of untyped JSON data against composable schemas.
//!
//! ## Overview
//!
//! A schema is an immutable tree of nodes built through the [`Schema`]
//! factory and builder methods. Validating an input either returns the
//! validated output or the first failure found, with the path to the
//! offending value. Validation is fail-fast: checks run in a fixed order and
//! stop at the first failing one.
//!
//! The first validation through a node compiles it into a cached routine,
//! children first. Later validations, and every parent embedding the node,
//! reuse that routine. The interpreter and the compiled routine always agree.
//!
//! ## Core Types
//!
//! - [`Schema`]: Entry point for creating validation schemas
//! - [`SchemaLike`]: The capability every schema node implements
//! - [`JsonPath`]: A path to a value in nested data (e.g., `users.0.email`)
//! - [`SchemaError`]: A single validation failure with path, kind, and message
//! - [`ValidationError`]: The error returned by [`SchemaLike::validate`]
//!
//! ## Example
//!
//! ```rust
//! use schemata::{ErrorKind, Schema, SchemaLike};
//! use serde_json::json;
//!
//! let user = Schema::object()
//!     .field("name", Schema::string().min_len(1).max_len(100))
//!     .field("age", Schema::number().min(0.0))
//!     .optional_field("email", Schema::string());
//!
//! // Valid input produces the validated value
//! let output = user.validate(&json!({"name": "Ada", "age": 36})).unwrap();
//! assert_eq!(output["name"], "Ada");
//!
//! // The first failure is reported with its path
//! let outcome = user.safe_validate(&json!({"name": "", "age": -1}));
//! let error = outcome.into_result().unwrap_err();
//! assert_eq!(error.path.to_string(), "name");
//! assert_eq!(error.kind, ErrorKind::LengthOutOfBounds);
//! ```

pub mod batch;
pub mod error;
pub mod path;
pub mod registry;
pub mod schema;
pub mod validation;

pub use batch::validate_batch;
pub use error::{ErrorKind, SchemaError, ValidationError};
pub use path::{JsonPath, PathSegment};
pub use registry::{RegistryError, SchemaRegistry};
pub use schema::{
    erase, ArrayOptions, ArraySchema, BooleanOptions, BooleanSchema, Literal, LiteralSchema,
    NullableSchema, NumberOptions, NumberSchema, ObjectSchema, OptionalSchema, PipeSchema,
    RefinedSchema, Routine, RoutineCache, Schema, SchemaKind, SchemaLike, StringOptions,
    StringSchema, UnionSchema, ValueValidator,
};
pub use validation::{failure, success, ValidationOutcome};
