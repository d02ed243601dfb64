//! Message catalog for validation failures.
//!
//! Every failure message produced by a schema comes from a named slot in a
//! [`Messages`] catalog. Parameterised slots are templates with `{name}`
//! placeholders (`{length}`, `{min}`, `{max}`, `{values}`, `{field}`) that are
//! filled in when a builder resolves its default message.
//!
//! The catalog is layered:
//!
//! - a process-wide default, replaceable as a whole with [`set_catalog`];
//! - an optional per-schema override passed to `with_messages(...)`;
//! - a per-call custom message given to any `*_msg` builder.
//!
//! Schemas snapshot the catalog when a builder runs, so replacing the global
//! catalog never changes a schema that is already built.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use uval::messages::{MessageKey, Messages};
//! use uval::prelude::*;
//!
//! let ru = Messages::default()
//!     .set(MessageKey::Required, "обязательное поле")
//!     .set(MessageKey::Short, "минимум {length} символов");
//!
//! let schema = uval::StringSchema::with_messages(Arc::new(ru))
//!     .required()
//!     .min_length(3);
//! assert_eq!(schema.validate(&serde_json::json!("ab")).error.as_str(), Some("минимум 3 символов"));
//! ```

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// Named slot in the message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Generic type mismatch. Not read by the built-in schemas, which use
    /// the per-kind slots below; available to custom [`Schema`](crate::Schema)
    /// implementations and translation tables.
    Type,
    String,
    Number,
    Boolean,
    Object,
    Array,
    Required,
    /// String length must equal `{length}`.
    Length,
    /// String shorter than `{length}`.
    Short,
    /// String longer than `{length}`.
    Long,
    ArrayLength,
    ArrayShort,
    ArrayLong,
    /// Number below `{min}`.
    Small,
    /// Number above `{max}`.
    Large,
    /// Value not in `{values}`.
    OneOf,
    Format,
    /// Value differs from `{field}`.
    Unequal,
    True,
    False,
}

impl MessageKey {
    pub const ALL: [MessageKey; 20] = [
        MessageKey::Type,
        MessageKey::String,
        MessageKey::Number,
        MessageKey::Boolean,
        MessageKey::Object,
        MessageKey::Array,
        MessageKey::Required,
        MessageKey::Length,
        MessageKey::Short,
        MessageKey::Long,
        MessageKey::ArrayLength,
        MessageKey::ArrayShort,
        MessageKey::ArrayLong,
        MessageKey::Small,
        MessageKey::Large,
        MessageKey::OneOf,
        MessageKey::Format,
        MessageKey::Unequal,
        MessageKey::True,
        MessageKey::False,
    ];

    /// Stable string key for this slot. Useful when loading translations.
    pub fn key(&self) -> &'static str {
        match self {
            MessageKey::Type => "type",
            MessageKey::String => "string",
            MessageKey::Number => "number",
            MessageKey::Boolean => "boolean",
            MessageKey::Object => "object",
            MessageKey::Array => "array",
            MessageKey::Required => "required",
            MessageKey::Length => "length",
            MessageKey::Short => "short",
            MessageKey::Long => "long",
            MessageKey::ArrayLength => "arrayLength",
            MessageKey::ArrayShort => "arrayShort",
            MessageKey::ArrayLong => "arrayLong",
            MessageKey::Small => "small",
            MessageKey::Large => "large",
            MessageKey::OneOf => "oneOf",
            MessageKey::Format => "format",
            MessageKey::Unequal => "unequal",
            MessageKey::True => "true",
            MessageKey::False => "false",
        }
    }

    /// Look a slot up by its stable string key.
    pub fn from_key(key: &str) -> Option<MessageKey> {
        MessageKey::ALL.iter().copied().find(|k| k.key() == key)
    }

    fn builtin(&self) -> &'static str {
        match self {
            MessageKey::Type => "invalid data type",
            MessageKey::String => "expected string value",
            MessageKey::Number => "expected number value",
            MessageKey::Boolean => "expected boolean value",
            MessageKey::Object => "expected object",
            MessageKey::Array => "expected array",
            MessageKey::Required => "required field",
            MessageKey::Length => "field length must be {length} characters",
            MessageKey::Short => "minimum field length {length} characters",
            MessageKey::Long => "maximum field length {length} characters",
            MessageKey::ArrayLength => "field length must be {length} characters",
            MessageKey::ArrayShort => "minimum field length {length} characters",
            MessageKey::ArrayLong => "maximum field length {length} characters",
            MessageKey::Small => "minimum value is greater than or equal to {min}",
            MessageKey::Large => "the maximum value is less than or equal to {max}",
            MessageKey::OneOf => "value must be equal to one of the following values: {values}",
            MessageKey::Format => "invalid data format",
            MessageKey::Unequal => "field must match {field} field",
            MessageKey::True => "value must be \"true\"",
            MessageKey::False => "value must be \"false\"",
        }
    }
}

/// A complete set of message templates.
#[derive(Debug, Clone, PartialEq)]
pub struct Messages {
    templates: HashMap<MessageKey, String>,
}

impl Messages {
    /// Replace the template for one slot.
    pub fn set(mut self, key: MessageKey, template: impl Into<String>) -> Self {
        self.templates.insert(key, template.into());
        self
    }

    /// Override slots from a `stable key -> template` map. Unknown keys are ignored.
    pub fn merge_map(mut self, map: &HashMap<String, String>) -> Self {
        for (key, template) in map {
            match MessageKey::from_key(key) {
                Some(k) => {
                    self.templates.insert(k, template.clone());
                }
                None => tracing::debug!(key = %key, "ignoring unknown message key"),
            }
        }
        self
    }

    /// Raw template for a slot.
    pub fn get(&self, key: MessageKey) -> &str {
        self.templates
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.builtin())
    }

    /// Render a slot, substituting `{name}` placeholders from `params`.
    pub fn render(&self, key: MessageKey, params: &[(&str, String)]) -> String {
        apply_params(self.get(key), params)
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            templates: MessageKey::ALL
                .iter()
                .map(|k| (*k, k.builtin().to_string()))
                .collect(),
        }
    }
}

/// Replaces `{param_name}` placeholders with values from `params`.
fn apply_params(template: &str, params: &[(&str, String)]) -> String {
    let mut result = template.to_string();
    for (key, value) in params {
        result = result.replace(&format!("{{{}}}", key), value);
    }
    result
}

fn global() -> &'static RwLock<Arc<Messages>> {
    static CATALOG: OnceLock<RwLock<Arc<Messages>>> = OnceLock::new();
    CATALOG.get_or_init(|| RwLock::new(Arc::new(Messages::default())))
}

/// The current process-wide catalog.
pub fn catalog() -> Arc<Messages> {
    let guard = global().read().unwrap_or_else(|e| e.into_inner());
    Arc::clone(&guard)
}

/// Replace the process-wide catalog. Only schemas built afterwards see it.
pub fn set_catalog(messages: Messages) {
    tracing::debug!("replacing global message catalog");
    let mut guard = global().write().unwrap_or_else(|e| e.into_inner());
    *guard = Arc::new(messages);
}

/// Restore the built-in catalog.
pub fn reset_catalog() {
    set_catalog(Messages::default());
}
