use std::sync::Arc;

use serde_json::Value;

use crate::base::{BaseSchema, SchemaKind};
use crate::context::{Context, ValidateOptions};
use crate::error::{trace_failure, IssueKind, ValidationResult};
use crate::messages::{MessageKey, Messages};
use crate::schema::Schema;

#[derive(Debug, Clone)]
enum BooleanCheck {
    IsTrue(String),
    IsFalse(String),
}

/// Schema for booleans. Created via [`uval::boolean()`](crate::boolean).
///
/// In loose mode the numbers `0` and `1` are coerced to `false` and `true`.
#[derive(Debug, Clone)]
pub struct BooleanSchema {
    base: BaseSchema,
    check: Option<BooleanCheck>,
}

impl BooleanSchema {
    pub fn new() -> Self {
        Self {
            base: BaseSchema::new(SchemaKind::Boolean),
            check: None,
        }
    }

    /// Build with a per-schema message catalog.
    pub fn with_messages(messages: Arc<Messages>) -> Self {
        Self {
            base: BaseSchema::with_messages(SchemaKind::Boolean, messages),
            check: None,
        }
    }

    /// Value must be `true`. Replaces a previous `is_false`.
    pub fn is_true(self) -> Self {
        let msg = self.base.render(MessageKey::True, &[]);
        self.is_true_msg(msg)
    }

    pub fn is_true_msg(mut self, msg: impl Into<String>) -> Self {
        self.check = Some(BooleanCheck::IsTrue(msg.into()));
        self
    }

    /// Value must be `false`. Replaces a previous `is_true`.
    pub fn is_false(self) -> Self {
        let msg = self.base.render(MessageKey::False, &[]);
        self.is_false_msg(msg)
    }

    pub fn is_false_msg(mut self, msg: impl Into<String>) -> Self {
        self.check = Some(BooleanCheck::IsFalse(msg.into()));
        self
    }

    fn coerce(&self, value: &Value) -> Option<bool> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) if !self.base.is_strict() => match n.as_f64() {
                Some(f) if f == 0.0 => Some(false),
                Some(f) if f == 1.0 => Some(true),
                _ => None,
            },
            _ => None,
        }
    }
}

crate::base::impl_base_builders!(BooleanSchema, strict);

impl Default for BooleanSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for BooleanSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Boolean
    }

    fn type_message(&self) -> &str {
        self.base.type_message()
    }

    fn validate_with(
        &self,
        value: &Value,
        _options: &ValidateOptions,
        _ctx: &Context<'_>,
    ) -> ValidationResult {
        if let Some(result) = self.base.check_presence(value, false) {
            return result;
        }

        let b = match self.coerce(value) {
            Some(b) => b,
            None => return self.base.type_failure(value),
        };

        let failed = match &self.check {
            Some(BooleanCheck::IsTrue(msg)) if !b => Some(msg),
            Some(BooleanCheck::IsFalse(msg)) if b => Some(msg),
            _ => None,
        };
        if let Some(msg) = failed {
            trace_failure(IssueKind::ConstraintViolation, "boolean", value);
            return ValidationResult::fail(value.clone(), msg.as_str());
        }

        ValidationResult::ok(Value::Bool(b))
    }
}
