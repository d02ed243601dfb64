//! Cross-field references.
//!
//! A [`Reference`] names another value in the document being validated. It
//! is built once with the schema and resolved on every validation call
//! against the call's [`Context`].
//!
//! - `"password"` / `"user.email"` / `"items[0].name"` resolve against the
//!   parent object of the value being checked.
//! - `"$config.locale"` resolves against the validation root. Only the first
//!   `$` is stripped; `"$"` alone is the root itself.
//!
//! ```
//! use serde_json::json;
//! use uval::{Context, Reference};
//!
//! let doc = json!({"user": {"tags": ["a", "b"]}});
//! let ctx = Context::new().with_root(&doc).with_parent(&doc["user"]);
//!
//! assert_eq!(Reference::new("tags.1").get_value(&ctx), Some(&json!("b")));
//! assert_eq!(Reference::new("$user.tags[0]").get_value(&ctx), Some(&json!("a")));
//! assert_eq!(Reference::new("missing.key").get_value(&ctx), None);
//! ```

use std::fmt;

use serde_json::Value;

use crate::context::Context;

const ROOT_MARKER: char = '$';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    path: Vec<String>,
    is_root: bool,
}

impl Reference {
    /// Build from a dotted path. Bracket indices (`a[0]`) are accepted.
    pub fn new(path: &str) -> Self {
        let (path, is_root) = match path.strip_prefix(ROOT_MARKER) {
            Some(rest) => (rest, true),
            None => (path, false),
        };
        Self {
            path: split_path(path),
            is_root,
        }
    }

    /// Build from explicit segments. A `$` on the first segment marks the root.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut path: Vec<String> = segments.into_iter().map(Into::into).collect();
        let mut is_root = false;
        if let Some(first) = path.first_mut() {
            if let Some(rest) = first.strip_prefix(ROOT_MARKER) {
                *first = rest.to_string();
                is_root = true;
            }
        }
        Self { path, is_root }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// Resolve against the context. Never falls back to the other scope.
    pub fn get_value<'a>(&self, ctx: &Context<'a>) -> Option<&'a Value> {
        let target = if self.is_root { ctx.root } else { ctx.parent }?;
        get_path(target, &self.path)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root {
            write!(f, "{}", ROOT_MARKER)?;
        }
        write!(f, "{}", self.path.join("."))
    }
}

impl From<&str> for Reference {
    fn from(path: &str) -> Self {
        Reference::new(path)
    }
}

/// Create a reference from a dotted path.
pub fn ref_path(path: &str) -> Reference {
    Reference::new(path)
}

/// Follow `path` into `target`. Object segments are keys, array segments must
/// parse as an index. Any miss yields `None`.
pub fn get_path<'v, S: AsRef<str>>(target: &'v Value, path: &[S]) -> Option<&'v Value> {
    path.iter().try_fold(target, |current, segment| {
        let segment = segment.as_ref();
        match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    })
}

fn split_path(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    let mut segments = Vec::new();
    for part in path.split('.') {
        // `items[0][1]` -> `items`, `0`, `1`
        let mut rest = part;
        match rest.find('[') {
            Some(open) if rest.ends_with(']') => {
                if open > 0 {
                    segments.push(rest[..open].to_string());
                }
                rest = &rest[open..];
                while let Some(inner) = rest.strip_prefix('[') {
                    match inner.find(']') {
                        Some(close) => {
                            segments.push(inner[..close].to_string());
                            rest = &inner[close + 1..];
                        }
                        None => break,
                    }
                }
            }
            _ => segments.push(rest.to_string()),
        }
    }
    segments
}
