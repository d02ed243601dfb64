use std::collections::HashMap;

use crate::error::ErrorTree;

/// Flat error structure, useful for form validation.
///
/// - `form_errors`: failures of the value itself (no path)
/// - `field_errors`: leaf messages grouped by top-level key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatError {
    pub form_errors: Vec<String>,
    pub field_errors: HashMap<String, Vec<String>>,
}

/// Flatten an [`ErrorTree`] into a simple field-based structure.
///
/// # Example
/// ```
/// use serde_json::json;
/// use uval::prelude::*;
/// use uval::format::flatten_error;
///
/// let schema = uval::object().entries(uval::entries! {
///     "name" => uval::string().min_length(5),
/// });
/// let result = schema.validate(&json!({"name": "ab"}));
/// let flat = flatten_error(&result.error);
/// assert_eq!(flat.field_errors["name"], vec!["minimum field length 5 characters"]);
/// ```
pub fn flatten_error(error: &ErrorTree) -> FlatError {
    let mut flat = FlatError::default();
    match error {
        ErrorTree::Empty => {}
        ErrorTree::Message(m) => flat.form_errors.push(m.clone()),
        ErrorTree::Nested(children) => {
            for (key, child) in children {
                let messages = flat.field_errors.entry(key.clone()).or_default();
                collect_messages(child, messages);
            }
        }
    }
    flat
}

fn collect_messages(tree: &ErrorTree, out: &mut Vec<String>) {
    match tree {
        ErrorTree::Empty => {}
        ErrorTree::Message(m) => out.push(m.clone()),
        ErrorTree::Nested(children) => {
            for (_, child) in children {
                collect_messages(child, out);
            }
        }
    }
}

/// Every leaf failure with its dotted path (`"items.1.name"`).
///
/// The paths use the same syntax as [`Reference`](crate::Reference), so
/// they can be resolved against the validated document. A failure of the
/// value itself has the empty path.
pub fn error_paths(error: &ErrorTree) -> Vec<(String, String)> {
    let mut out = Vec::new();
    walk(error, String::new(), &mut out);
    out
}

fn walk(tree: &ErrorTree, prefix: String, out: &mut Vec<(String, String)>) {
    match tree {
        ErrorTree::Empty => {}
        ErrorTree::Message(m) => out.push((prefix, m.clone())),
        ErrorTree::Nested(children) => {
            for (key, child) in children {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                walk(child, path, out);
            }
        }
    }
}

/// Format an [`ErrorTree`] into a human-readable string.
///
/// # Example output
/// ```text
/// ✖ minimum field length 2 characters
///   → at name
/// ✖ expected number value
///   → at items.1
/// ```
pub fn prettify_error(error: &ErrorTree) -> String {
    let mut lines = Vec::new();

    for (path, message) in error_paths(error) {
        lines.push(format!("✖ {}", message));
        if !path.is_empty() {
            lines.push(format!("  → at {}", path));
        }
    }

    lines.join("\n")
}
