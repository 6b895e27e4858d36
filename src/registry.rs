//! Schema registry for named schema storage.
//!
//! This module provides the [`SchemaRegistry`] type, a thread-safe map from
//! names to type-erased schemas. Registered schemas keep their compiled
//! routines, so every validation through the registry after the first reuses
//! the same cache.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::path::JsonPath;
use crate::schema::ValueValidator;
use crate::validation::ValidationOutcome;

/// Type alias for the schema storage map.
type SchemaMap = Arc<RwLock<HashMap<String, Arc<dyn ValueValidator>>>>;

/// A thread-safe registry for storing and retrieving named schemas.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can look up and validate concurrently (read-only access)
/// - Registration operations are serialized (write access)
///
/// Cloning a registry yields a handle to the same map.
///
/// # Example
///
/// ```rust
/// use schemata::{Schema, SchemaRegistry};
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
///
/// registry.register("Email", Schema::string().pattern(r"^[^@]+@[^@]+$").unwrap()).unwrap();
///
/// // Registered schemas can back fields of other schemas.
/// let email = registry.get("Email").unwrap();
/// registry.register("User", Schema::object()
///     .field("name", Schema::string().min_len(1))
///     .field_shared("email", email)
/// ).unwrap();
///
/// let result = registry.validate("User", &json!({"name": "Al", "email": "nope"})).unwrap();
/// assert!(result.is_failure());
/// ```
pub struct SchemaRegistry {
    schemas: SchemaMap,
}

impl SchemaRegistry {
    /// Creates a new empty schema registry.
    pub fn new() -> Self {
        Self {
            schemas: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a schema with the given name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::{Schema, SchemaRegistry};
    ///
    /// let registry = SchemaRegistry::new();
    /// registry.register("Email", Schema::string()).unwrap();
    ///
    /// // Duplicate registration fails
    /// assert!(registry.register("Email", Schema::string()).is_err());
    /// ```
    pub fn register<S>(&self, name: impl Into<String>, schema: S) -> Result<(), RegistryError>
    where
        S: ValueValidator + 'static,
    {
        self.register_shared(name, Arc::new(schema))
    }

    /// Registers a schema that is already shared elsewhere.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    pub fn register_shared(
        &self,
        name: impl Into<String>,
        schema: Arc<dyn ValueValidator>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut schemas = self.schemas.write();

        if schemas.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        debug!(name = %name, kind = %schema.schema_kind(), "registering schema");
        schemas.insert(name, schema);
        Ok(())
    }

    /// Retrieves a schema by name.
    ///
    /// Returns `None` if no schema with the given name is registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::{Schema, SchemaRegistry};
    ///
    /// let registry = SchemaRegistry::new();
    /// registry.register("Email", Schema::string()).unwrap();
    ///
    /// assert!(registry.get("Email").is_some());
    /// assert!(registry.get("Unknown").is_none());
    /// ```
    pub fn get(&self, name: &str) -> Option<Arc<dyn ValueValidator>> {
        self.schemas.read().get(name).cloned()
    }

    /// Returns all registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }

    /// Compiles every registered schema that has not been compiled yet.
    ///
    /// Returns how many schemas were compiled by this call.
    pub fn warm(&self) -> usize {
        let schemas = self.schemas.read();
        let mut compiled = 0;
        for (name, schema) in schemas.iter() {
            if !schema.is_value_compiled() {
                schema.compile_value();
                compiled += 1;
                debug!(name = %name, "compiled schema");
            }
        }
        compiled
    }

    /// Validates a value against a named schema.
    ///
    /// The outer `Result` reports lookup failure; the inner outcome is the
    /// validation itself.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::SchemaNotFound` if the schema name doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::{Schema, SchemaRegistry};
    /// use serde_json::json;
    ///
    /// let registry = SchemaRegistry::new();
    /// registry.register("User", Schema::object()
    ///     .field("name", Schema::string().min_len(1))
    ///     .field("age", Schema::number().positive())
    /// ).unwrap();
    ///
    /// let result = registry.validate("User", &json!({
    ///     "name": "Alice",
    ///     "age": 30
    /// })).unwrap();
    ///
    /// assert!(result.is_success());
    /// assert!(registry.validate("Order", &json!({})).is_err());
    /// ```
    pub fn validate(
        &self,
        schema_name: &str,
        value: &Value,
    ) -> Result<ValidationOutcome<Option<Value>>, RegistryError> {
        let schema = self
            .get(schema_name)
            .ok_or_else(|| RegistryError::SchemaNotFound(schema_name.to_string()))?;

        let routine = schema.compile_value();
        Ok(routine(Some(value), &JsonPath::root()))
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SchemaRegistry {
    fn clone(&self) -> Self {
        Self {
            schemas: Arc::clone(&self.schemas),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a schema with a name that already exists.
    #[error("schema '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to validate with a schema name that doesn't exist.
    #[error("schema '{0}' not found")]
    SchemaNotFound(String),
}
