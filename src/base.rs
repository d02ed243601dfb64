use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{trace_failure, IssueKind, ValidationResult};
use crate::messages::{self, MessageKey, Messages};

/// Type tag of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl SchemaKind {
    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Array => "array",
            SchemaKind::Object => "object",
        }
    }

    /// Catalog slot holding the default type message.
    pub fn type_key(&self) -> MessageKey {
        match self {
            SchemaKind::String => MessageKey::String,
            SchemaKind::Number => MessageKey::Number,
            SchemaKind::Boolean => MessageKey::Boolean,
            SchemaKind::Array => MessageKey::Array,
            SchemaKind::Object => MessageKey::Object,
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// State shared by every schema: type tag, strict flag, type and required messages.
///
/// Concrete schemas embed a `BaseSchema` and expose its builders through
/// the `impl_base_builders!` macro.
#[derive(Debug, Clone)]
pub struct BaseSchema {
    kind: SchemaKind,
    strict: bool,
    type_message: String,
    strict_message: Option<String>,
    required: Option<String>,
    messages: Arc<Messages>,
}

impl BaseSchema {
    pub fn new(kind: SchemaKind) -> Self {
        Self::with_messages(kind, messages::catalog())
    }

    pub fn with_messages(kind: SchemaKind, messages: Arc<Messages>) -> Self {
        Self {
            kind,
            strict: false,
            type_message: messages.get(kind.type_key()).to_string(),
            strict_message: None,
            required: None,
            messages,
        }
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    pub fn required_message(&self) -> Option<&str> {
        self.required.as_deref()
    }

    /// Effective type message: the strict slot when strict, else the type slot.
    pub fn type_message(&self) -> &str {
        match (&self.strict_message, self.strict) {
            (Some(msg), true) => msg,
            _ => &self.type_message,
        }
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub(crate) fn render(&self, key: MessageKey, params: &[(&str, String)]) -> String {
        self.messages.render(key, params)
    }

    pub(crate) fn set_required(&mut self, message: Option<String>) {
        let message = message.unwrap_or_else(|| self.render(MessageKey::Required, &[]));
        self.required = Some(message);
    }

    pub(crate) fn clear_required(&mut self) {
        self.required = None;
    }

    pub(crate) fn set_type_message(&mut self, message: String) {
        self.type_message = message;
    }

    pub(crate) fn set_strict(&mut self, message: Option<String>) {
        self.strict = true;
        self.strict_message = message;
    }

    /// Required and nullish short-circuit shared by every schema.
    ///
    /// Returns `Some(result)` when the pipeline stops here. `blank_is_absent`
    /// makes `""` count as missing (string and number schemas).
    pub(crate) fn check_presence(
        &self,
        value: &Value,
        blank_is_absent: bool,
    ) -> Option<ValidationResult> {
        let absent = match value {
            Value::Null => true,
            Value::String(s) if blank_is_absent => s.is_empty(),
            _ => false,
        };
        if !absent {
            return None;
        }
        match &self.required {
            Some(msg) => {
                trace_failure(IssueKind::MissingRequired, self.kind.name(), value);
                Some(ValidationResult::fail(value.clone(), msg.as_str()))
            }
            None => Some(ValidationResult::ok(value.clone())),
        }
    }

    pub(crate) fn type_failure(&self, value: &Value) -> ValidationResult {
        trace_failure(IssueKind::TypeMismatch, self.kind.name(), value);
        ValidationResult::fail(value.clone(), self.type_message())
    }
}

/// Generate the builders every schema shares (`required`, `type_error`, ...).
///
/// The schema struct must hold its [`BaseSchema`] in a field named `base`.
/// Pass `strict` to also generate `strict()`/`strict_msg()`.
macro_rules! impl_base_builders {
    ($ty:ty) => {
        impl $ty {
            /// Mark the value as mandatory: nullish input fails with the `required` message.
            pub fn required(mut self) -> Self {
                self.base.set_required(None);
                self
            }

            /// Mark the value as mandatory with a custom message.
            pub fn required_msg(mut self, msg: impl Into<String>) -> Self {
                self.base.set_required(Some(msg.into()));
                self
            }

            /// Make the value optional again (the default).
            pub fn not_required(mut self) -> Self {
                self.base.clear_required();
                self
            }

            /// Override the type mismatch message.
            pub fn type_error(mut self, msg: impl Into<String>) -> Self {
                self.base.set_type_message(msg.into());
                self
            }

            pub fn base(&self) -> &$crate::base::BaseSchema {
                &self.base
            }
        }
    };
    ($ty:ty, strict) => {
        $crate::base::impl_base_builders!($ty);

        impl $ty {
            /// Disable loose coercion. Type failures report the type message.
            pub fn strict(mut self) -> Self {
                self.base.set_strict(None);
                self
            }

            /// Disable loose coercion and report type failures with `msg`.
            pub fn strict_msg(mut self, msg: impl Into<String>) -> Self {
                self.base.set_strict(Some(msg.into()));
                self
            }
        }
    };
}

pub(crate) use impl_base_builders;
