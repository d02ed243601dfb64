use std::sync::Arc;

use serde_json::Value;

use crate::base::{BaseSchema, SchemaKind};
use crate::context::{Context, ValidateOptions};
use crate::error::{trace_failure, CastError, ErrorTree, IssueKind, ValidationResult};
use crate::messages::{MessageKey, Messages};
use crate::schema::{Schema, SchemaRef};

#[derive(Debug, Clone)]
enum LengthCheck {
    Exact(usize, String),
    Min(usize, String),
    Max(usize, String),
}

impl LengthCheck {
    fn same_slot(&self, other: &LengthCheck) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    fn violation(&self, len: usize) -> Option<&str> {
        match self {
            LengthCheck::Exact(n, m) if len != *n => Some(m),
            LengthCheck::Min(n, m) if len < *n => Some(m),
            LengthCheck::Max(n, m) if len > *n => Some(m),
            _ => None,
        }
    }
}

/// Schema for arrays. Created via [`uval::array()`](crate::array).
///
/// Length checks run first and stop at the first failure. With an entry
/// schema set via [`of`](Self::of), every element is then validated and all
/// failing indices are reported.
///
/// # Example
/// ```
/// use serde_json::json;
/// use uval::prelude::*;
///
/// let schema = uval::array().of(uval::number()).min_length(1);
/// assert_eq!(schema.validate(&json!(["1", 2])).value, json!([1, 2]));
///
/// let result = schema.validate(&json!([1, "x", 3]));
/// assert!(!result.valid);
/// assert_eq!(result.error.get("1").and_then(|e| e.as_str()), Some("expected number value"));
/// ```
#[derive(Clone)]
pub struct ArraySchema {
    base: BaseSchema,
    checks: Vec<LengthCheck>,
    entry: Option<SchemaRef>,
}

impl ArraySchema {
    pub fn new() -> Self {
        Self {
            base: BaseSchema::new(SchemaKind::Array),
            checks: vec![],
            entry: None,
        }
    }

    /// Build with a per-schema message catalog.
    pub fn with_messages(messages: Arc<Messages>) -> Self {
        Self {
            base: BaseSchema::with_messages(SchemaKind::Array, messages),
            checks: vec![],
            entry: None,
        }
    }

    /// Exact number of elements.
    pub fn length(self, len: usize) -> Self {
        let msg = self
            .base
            .render(MessageKey::ArrayLength, &[("length", len.to_string())]);
        self.length_msg(len, msg)
    }

    pub fn length_msg(self, len: usize, msg: impl Into<String>) -> Self {
        self.set_check(LengthCheck::Exact(len, msg.into()))
    }

    /// Minimum number of elements.
    pub fn min_length(self, len: usize) -> Self {
        let msg = self
            .base
            .render(MessageKey::ArrayShort, &[("length", len.to_string())]);
        self.min_length_msg(len, msg)
    }

    pub fn min_length_msg(self, len: usize, msg: impl Into<String>) -> Self {
        self.set_check(LengthCheck::Min(len, msg.into()))
    }

    /// Maximum number of elements.
    pub fn max_length(self, len: usize) -> Self {
        let msg = self
            .base
            .render(MessageKey::ArrayLong, &[("length", len.to_string())]);
        self.max_length_msg(len, msg)
    }

    pub fn max_length_msg(self, len: usize, msg: impl Into<String>) -> Self {
        self.set_check(LengthCheck::Max(len, msg.into()))
    }

    /// Schema applied to every element.
    pub fn of<S: Schema + 'static>(mut self, entry: S) -> Self {
        self.entry = Some(Arc::new(entry));
        self
    }

    pub fn entry(&self) -> Option<&SchemaRef> {
        self.entry.as_ref()
    }

    /// Validate with `clean` set, so nested object schemas strip undeclared keys.
    pub fn clean(&self, value: &Value) -> Result<Value, CastError> {
        if self.is_absent(value) {
            return Err(CastError::from_tree(ErrorTree::message(self.type_message())));
        }
        self.validate_with(value, &ValidateOptions::clean(), &Context::default())
            .into_result()
    }

    fn set_check(mut self, check: LengthCheck) -> Self {
        match self.checks.iter_mut().find(|c| c.same_slot(&check)) {
            Some(slot) => *slot = check,
            None => self.checks.push(check),
        }
        self
    }
}

crate::base::impl_base_builders!(ArraySchema);

impl Default for ArraySchema {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ArraySchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArraySchema")
            .field("base", &self.base)
            .field("checks", &self.checks)
            .field("entry", &self.entry.as_ref().map(|e| e.kind()))
            .finish()
    }
}

impl Schema for ArraySchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Array
    }

    fn type_message(&self) -> &str {
        self.base.type_message()
    }

    fn validate_with(
        &self,
        value: &Value,
        options: &ValidateOptions,
        ctx: &Context<'_>,
    ) -> ValidationResult {
        if let Some(result) = self.base.check_presence(value, false) {
            return result;
        }

        let items = match value.as_array() {
            Some(items) => items,
            None => return self.base.type_failure(value),
        };

        if let Some(msg) = self.checks.iter().find_map(|c| c.violation(items.len())) {
            trace_failure(IssueKind::ConstraintViolation, "array", value);
            return ValidationResult::fail(value.clone(), msg);
        }

        let entry = match &self.entry {
            Some(entry) => entry,
            None => return ValidationResult::ok(value.clone()),
        };

        let ctx = ctx.rooted_at(value);
        let mut coerced = Vec::with_capacity(items.len());
        let mut error = ErrorTree::Empty;

        for (i, item) in items.iter().enumerate() {
            let result = entry.validate_with(item, options, &ctx);
            if result.valid {
                coerced.push(result.value);
            } else {
                error.insert(i.to_string(), result.error);
                coerced.push(item.clone());
            }
        }

        if error.is_empty() {
            ValidationResult::ok(Value::Array(coerced))
        } else {
            trace_failure(IssueKind::ChildFailure, "array", value);
            ValidationResult::fail(value.clone(), error)
        }
    }
}
