//! # uval: schema-driven validation and coercion of dynamic input
//!
//! `uval` checks loosely-typed data (a [`serde_json::Value`], typically a
//! decoded form or request body) against a declarative schema, coerces it
//! into canonical form and reports failures as a tree shaped like the input.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use uval::prelude::*;
//!
//! let schema = uval::object().entries(uval::entries! {
//!     "name" => uval::string().required().min_length(2),
//!     "age" => uval::number().min(18.0),
//!     "tags" => uval::array().of(uval::string()),
//! });
//!
//! let result = schema.validate(&json!({"name": "Alex", "age": "42", "tags": [1, "a"]}));
//! assert!(result.valid);
//! assert_eq!(result.value, json!({"name": "Alex", "age": 42, "tags": ["1", "a"]}));
//!
//! let result = schema.validate(&json!({"name": "A", "age": 10}));
//! assert_eq!(
//!     result.error.to_json_value(),
//!     json!({
//!         "name": "minimum field length 2 characters",
//!         "age": "minimum value is greater than or equal to 18"
//!     })
//! );
//! ```
//!
//! ## References
//!
//! String checks may compare against other fields of the same document:
//!
//! ```rust
//! use serde_json::json;
//! use uval::prelude::*;
//!
//! let schema = uval::object()
//!     .entry("password", uval::string().required())
//!     .entry("confirm", uval::string().equals(uval::ref_path("password")));
//!
//! assert!(schema.is_valid(&json!({"password": "s3cret", "confirm": "s3cret"})));
//! assert!(!schema.is_valid(&json!({"password": "s3cret", "confirm": "other"})));
//! ```

pub mod base;
pub mod collections;
pub mod context;
pub mod error;
pub mod format;
pub mod messages;
pub mod object;
pub mod primitives;
pub mod reference;
pub mod schema;

// Re-export serde_json for use in macros
#[doc(hidden)]
pub use serde_json;

pub use regex_lite;

pub use base::{BaseSchema, SchemaKind};
pub use collections::ArraySchema;
pub use context::{Context, ValidateOptions};
pub use error::{CastError, ErrorTree, IssueKind, ValidationResult};
pub use messages::{MessageKey, Messages};
pub use object::ObjectSchema;
pub use primitives::{BooleanSchema, Candidate, NumberSchema, StringSchema};
pub use reference::{get_path, ref_path, Reference};
pub use schema::{Schema, SchemaRef};

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Create a string schema.
pub fn string() -> StringSchema {
    StringSchema::new()
}

/// Create a number schema.
pub fn number() -> NumberSchema {
    NumberSchema::new()
}

/// Create a boolean schema.
pub fn boolean() -> BooleanSchema {
    BooleanSchema::new()
}

/// Create an array schema. Set the element schema with [`ArraySchema::of`].
pub fn array() -> ArraySchema {
    ArraySchema::new()
}

/// Create an object schema. Declare entries with [`ObjectSchema::entries`]
/// or [`ObjectSchema::entry`].
pub fn object() -> ObjectSchema {
    ObjectSchema::new()
}

/// Prelude: import everything needed to build and run schemas.
pub mod prelude {
    pub use crate::collections::ArraySchema;
    pub use crate::context::{Context, ValidateOptions};
    pub use crate::error::{CastError, ErrorTree, ValidationResult};
    pub use crate::format::{flatten_error, prettify_error};
    pub use crate::object::ObjectSchema;
    pub use crate::primitives::{BooleanSchema, Candidate, NumberSchema, StringSchema};
    pub use crate::reference::{ref_path, Reference};
    pub use crate::schema::{Schema, SchemaRef};
}
