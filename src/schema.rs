use std::sync::Arc;

use serde_json::Value;

use crate::base::SchemaKind;
use crate::context::{Context, ValidateOptions};
use crate::error::{CastError, ErrorTree, ValidationResult};

/// Core validation schema trait.
///
/// Every schema in `uval` implements this trait. It is object-safe, so
/// arrays and objects hold their children as `Arc<dyn Schema>` and recurse
/// into any schema variant.
///
/// # Example
/// ```
/// use serde_json::json;
/// use uval::prelude::*;
///
/// let schema = uval::number().min(2.0);
/// assert!(schema.is_valid(&json!("3")));
/// assert_eq!(schema.validate(&json!("3")).value, json!(3));
/// assert!(!schema.is_valid(&json!(0)));
/// ```
pub trait Schema: Send + Sync {
    fn kind(&self) -> SchemaKind;

    /// Message reported when the value has the wrong type.
    fn type_message(&self) -> &str;

    /// Validate with explicit options and reference context.
    ///
    /// Never fails: every problem is reported in the returned
    /// [`ValidationResult`].
    fn validate_with(
        &self,
        value: &Value,
        options: &ValidateOptions,
        ctx: &Context<'_>,
    ) -> ValidationResult;

    /// Validate with default options and an empty context.
    fn validate(&self, value: &Value) -> ValidationResult {
        self.validate_with(value, &ValidateOptions::default(), &Context::default())
    }

    fn is_valid(&self, value: &Value) -> bool {
        self.validate(value).valid
    }

    /// Whether `cast` treats the value as missing.
    fn is_absent(&self, value: &Value) -> bool {
        value.is_null()
    }

    /// Return the coerced value, or fail if the value does not conform.
    ///
    /// Unlike [`validate`](Self::validate), a missing value is an error here.
    fn cast(&self, value: &Value) -> Result<Value, CastError> {
        if self.is_absent(value) {
            return Err(CastError::from_tree(ErrorTree::message(self.type_message())));
        }
        self.validate(value).into_result()
    }
}

impl<S: Schema + ?Sized> Schema for Arc<S> {
    fn kind(&self) -> SchemaKind {
        (**self).kind()
    }

    fn type_message(&self) -> &str {
        (**self).type_message()
    }

    fn validate_with(
        &self,
        value: &Value,
        options: &ValidateOptions,
        ctx: &Context<'_>,
    ) -> ValidationResult {
        (**self).validate_with(value, options, ctx)
    }

    fn is_absent(&self, value: &Value) -> bool {
        (**self).is_absent(value)
    }
}

impl<S: Schema + ?Sized> Schema for Box<S> {
    fn kind(&self) -> SchemaKind {
        (**self).kind()
    }

    fn type_message(&self) -> &str {
        (**self).type_message()
    }

    fn validate_with(
        &self,
        value: &Value,
        options: &ValidateOptions,
        ctx: &Context<'_>,
    ) -> ValidationResult {
        (**self).validate_with(value, options, ctx)
    }

    fn is_absent(&self, value: &Value) -> bool {
        (**self).is_absent(value)
    }
}

/// Shared handle to a child schema.
pub type SchemaRef = Arc<dyn Schema>;
