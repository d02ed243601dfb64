use serde_json::Value;

/// Options recognised by `validate_with`, propagated through nested arrays and objects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Strip keys not declared in an object schema's `entries`.
    pub clean: bool,
}

impl ValidateOptions {
    pub fn clean() -> Self {
        Self { clean: true }
    }
}

/// Where [`Reference`](crate::Reference)s resolve during one validation call.
///
/// `root` is the whole document, `parent` the object enclosing the value
/// being checked. Both are optional; an absent scope resolves to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Context<'a> {
    pub root: Option<&'a Value>,
    pub parent: Option<&'a Value>,
}

impl<'a> Context<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: &'a Value) -> Self {
        self.root = Some(root);
        self
    }

    pub fn with_parent(mut self, parent: &'a Value) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Bind `root` to `value` unless the caller already supplied one.
    pub(crate) fn rooted_at(self, value: &'a Value) -> Self {
        Self {
            root: self.root.or(Some(value)),
            parent: self.parent,
        }
    }
}
