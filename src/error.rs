use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Shape-preserving validation error report.
///
/// - `Empty`: no error (serializes as `""`).
/// - `Message`: a leaf failure, or a failure of the container itself.
/// - `Nested`: per-child failures of an object (keyed by field name, in
///   declaration order) or an array (keyed by stringified index, ascending).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ErrorTree {
    #[default]
    Empty,
    Message(String),
    Nested(Vec<(String, ErrorTree)>),
}

impl ErrorTree {
    pub fn message(msg: impl Into<String>) -> Self {
        ErrorTree::Message(msg.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ErrorTree::Empty)
    }

    /// The message of a leaf failure.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ErrorTree::Message(m) => Some(m),
            _ => None,
        }
    }

    /// The subtree for a child key (field name or stringified index).
    pub fn get(&self, key: &str) -> Option<&ErrorTree> {
        match self {
            ErrorTree::Nested(children) => {
                children.iter().find(|(k, _)| k == key).map(|(_, e)| e)
            }
            _ => None,
        }
    }

    /// Walk a chain of child keys.
    pub fn at<'a, I>(&self, keys: I) -> Option<&ErrorTree>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter().try_fold(self, |tree, key| tree.get(key))
    }

    /// Insert or replace a child entry.
    pub(crate) fn insert(&mut self, key: String, child: ErrorTree) {
        if !matches!(self, ErrorTree::Nested(_)) {
            *self = ErrorTree::Nested(Vec::new());
        }
        if let ErrorTree::Nested(children) = self {
            match children.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = child,
                None => children.push((key, child)),
            }
        }
    }

    /// Convert into a JSON value (`""`, a string, or a nested object).
    pub fn to_json_value(&self) -> Value {
        match self {
            ErrorTree::Empty => Value::String(String::new()),
            ErrorTree::Message(m) => Value::String(m.clone()),
            ErrorTree::Nested(_) => Value::Object(
                self.ordered_children()
                    .into_iter()
                    .map(|(k, e)| (k.clone(), e.to_json_value()))
                    .collect(),
            ),
        }
    }

    /// Children in output order: array-index-like keys ascending, then the
    /// remaining keys in insertion order (the order `JSON.stringify` uses).
    fn ordered_children(&self) -> Vec<&(String, ErrorTree)> {
        let children = match self {
            ErrorTree::Nested(children) => children,
            _ => return Vec::new(),
        };
        let (mut indices, named): (Vec<_>, Vec<_>) =
            children.iter().partition(|(k, _)| index_key(k).is_some());
        indices.sort_by_key(|(k, _)| index_key(k));
        indices.extend(named);
        indices
    }

    /// Human-readable form: the message for a leaf, pretty-printed JSON for a tree.
    pub fn to_pretty_string(&self) -> String {
        match self {
            ErrorTree::Empty => String::new(),
            ErrorTree::Message(m) => m.clone(),
            ErrorTree::Nested(_) => serde_json::to_string_pretty(self)
                .unwrap_or_else(|_| self.to_json_value().to_string()),
        }
    }
}

impl From<&str> for ErrorTree {
    fn from(msg: &str) -> Self {
        ErrorTree::Message(msg.to_string())
    }
}

impl From<String> for ErrorTree {
    fn from(msg: String) -> Self {
        ErrorTree::Message(msg)
    }
}

impl Serialize for ErrorTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ErrorTree::Empty => serializer.serialize_str(""),
            ErrorTree::Message(m) => serializer.serialize_str(m),
            ErrorTree::Nested(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (k, e) in self.ordered_children() {
                    map.serialize_entry(k, e)?;
                }
                map.end()
            }
        }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pretty_string())
    }
}

/// Outcome of a single `validate` call.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    /// Coerced value when valid, the original input otherwise.
    pub value: Value,
    pub error: ErrorTree,
}

impl ValidationResult {
    pub fn ok(value: Value) -> Self {
        Self {
            valid: true,
            value,
            error: ErrorTree::Empty,
        }
    }

    pub fn fail(value: Value, error: impl Into<ErrorTree>) -> Self {
        Self {
            valid: false,
            value,
            error: error.into(),
        }
    }

    /// Convert into a `Result`, turning failures into [`CastError`].
    pub fn into_result(self) -> Result<Value, CastError> {
        if self.valid {
            Ok(self.value)
        } else {
            Err(CastError::from_tree(self.error))
        }
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("valid", &self.valid)?;
        map.serialize_entry("value", &self.value)?;
        map.serialize_entry("error", &self.error)?;
        map.end()
    }
}

/// Conceptual category of a failure. Reported in trace logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    TypeMismatch,
    MissingRequired,
    ConstraintViolation,
    ChildFailure,
}

impl IssueKind {
    pub fn key(&self) -> &'static str {
        match self {
            IssueKind::TypeMismatch => "type_mismatch",
            IssueKind::MissingRequired => "missing_required",
            IssueKind::ConstraintViolation => "constraint_violation",
            IssueKind::ChildFailure => "child_failure",
        }
    }
}

/// Raised by `cast`/`clean` when the value does not conform.
///
/// The message is the single failure message for a leaf failure, or the
/// whole [`ErrorTree`] as pretty-printed JSON for a composite failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct CastError {
    pub message: String,
    pub tree: ErrorTree,
}

impl CastError {
    pub fn from_tree(tree: ErrorTree) -> Self {
        Self {
            message: tree.to_pretty_string(),
            tree,
        }
    }
}

/// Canonical array index (`"0"`, `"17"`, not `"01"` or `"-1"`).
fn index_key(key: &str) -> Option<u32> {
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok().filter(|i| *i != u32::MAX && !key.starts_with('+'))
}

/// Returns the JSON type name for a value.
#[doc(hidden)]
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn trace_failure(kind: IssueKind, schema: &'static str, value: &Value) {
    tracing::trace!(
        kind = kind.key(),
        schema,
        received = value_type_name(value),
        "validation failed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_keys() {
        assert_eq!(index_key("0"), Some(0));
        assert_eq!(index_key("42"), Some(42));
        assert_eq!(index_key("01"), None);
        assert_eq!(index_key("+1"), None);
        assert_eq!(index_key("-1"), None);
        assert_eq!(index_key("4294967295"), None);
        assert_eq!(index_key("b"), None);
    }

    #[test]
    fn index_like_keys_serialize_first() {
        let mut tree = ErrorTree::Empty;
        tree.insert("b".into(), "bad b".into());
        tree.insert("10".into(), "bad 10".into());
        tree.insert("a".into(), "bad a".into());
        tree.insert("2".into(), "bad 2".into());

        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(
            json,
            r#"{"2":"bad 2","10":"bad 10","b":"bad b","a":"bad a"}"#
        );
        let keys: Vec<String> = tree.to_json_value().as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["2", "10", "b", "a"]);
        // lookups are unaffected
        assert_eq!(tree.get("b").and_then(ErrorTree::as_str), Some("bad b"));
    }
}
