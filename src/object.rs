use std::sync::Arc;

use serde_json::{Map, Value};

use crate::base::{BaseSchema, SchemaKind};
use crate::context::{Context, ValidateOptions};
use crate::error::{trace_failure, CastError, ErrorTree, IssueKind, ValidationResult};
use crate::messages::Messages;
use crate::schema::{Schema, SchemaRef};

#[derive(Clone)]
struct ObjectEntry {
    name: String,
    schema: SchemaRef,
}

/// Schema for objects with named entries. Created via [`uval::object()`](crate::object).
///
/// Each declared entry is validated and every failing key is reported.
/// Keys the schema does not declare are kept, unless validation runs with
/// `clean` (see [`clean`](Self::clean)), which strips them. An object without
/// declared entries accepts any object unchanged.
///
/// # Example
/// ```
/// use serde_json::json;
/// use uval::prelude::*;
///
/// let schema = uval::object()
///     .entry("name", uval::string().required())
///     .entry("age", uval::number().min(0.0));
///
/// let result = schema.validate(&json!({"name": "Ann", "age": "31", "extra": true}));
/// assert_eq!(result.value, json!({"name": "Ann", "age": 31, "extra": true}));
///
/// let cleaned = schema.clean(&json!({"name": "Ann", "extra": true})).unwrap();
/// assert_eq!(cleaned, json!({"name": "Ann"}));
/// ```
#[derive(Clone)]
pub struct ObjectSchema {
    base: BaseSchema,
    entries: Option<Vec<ObjectEntry>>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self {
            base: BaseSchema::new(SchemaKind::Object),
            entries: None,
        }
    }

    /// Build with a per-schema message catalog.
    pub fn with_messages(messages: Arc<Messages>) -> Self {
        Self {
            base: BaseSchema::with_messages(SchemaKind::Object, messages),
            entries: None,
        }
    }

    /// Replace the declared entries. See [`entries!`](crate::entries).
    pub fn entries<I, K>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaRef)>,
        K: Into<String>,
    {
        self.entries = Some(vec![]);
        for (name, schema) in entries {
            self = self.put(name.into(), schema);
        }
        self
    }

    /// Declare (or replace) one entry.
    pub fn entry<S: Schema + 'static>(self, name: impl Into<String>, schema: S) -> Self {
        self.put(name.into(), Arc::new(schema))
    }

    /// Remove an entry by name.
    pub fn omit(mut self, name: &str) -> Self {
        if let Some(entries) = &mut self.entries {
            entries.retain(|e| e.name != name);
        }
        self
    }

    /// Keep only the listed entries.
    pub fn pick(mut self, names: &[&str]) -> Self {
        if let Some(entries) = &mut self.entries {
            entries.retain(|e| names.contains(&e.name.as_str()));
        }
        self
    }

    /// Merge another object schema's entries into this one. On a name clash
    /// the entry from `other` wins.
    pub fn extend(mut self, other: ObjectSchema) -> Self {
        for entry in other.entries.into_iter().flatten() {
            self = self.put(entry.name, entry.schema);
        }
        self
    }

    /// Declared entry names, in declaration order.
    pub fn keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .flatten()
            .map(|e| e.name.as_str())
            .collect()
    }

    /// Schema of a declared entry.
    pub fn get(&self, name: &str) -> Option<&SchemaRef> {
        self.entries
            .iter()
            .flatten()
            .find(|e| e.name == name)
            .map(|e| &e.schema)
    }

    /// Validate with `clean` set and return the pruned value.
    ///
    /// Keys not declared in `entries` are removed at this level and in every
    /// nested object schema that declares its own entries.
    pub fn clean(&self, value: &Value) -> Result<Value, CastError> {
        if self.is_absent(value) {
            return Err(CastError::from_tree(ErrorTree::message(self.type_message())));
        }
        self.validate_with(value, &ValidateOptions::clean(), &Context::default())
            .into_result()
    }

    /// Validate only the named entries; the others are left untouched.
    ///
    /// Handy for validating a form field by field as the user fills it in.
    pub fn validate_chosen(&self, value: &Value, names: &[&str]) -> ValidationResult {
        self.run(
            value,
            &ValidateOptions::default(),
            &Context::default(),
            |name| names.iter().any(|n| *n == name),
        )
    }

    fn put(mut self, name: String, schema: SchemaRef) -> Self {
        let entries = self.entries.get_or_insert_with(Vec::new);
        match entries.iter_mut().find(|e| e.name == name) {
            Some(slot) => slot.schema = schema,
            None => entries.push(ObjectEntry { name, schema }),
        }
        self
    }

    fn run<F>(
        &self,
        value: &Value,
        options: &ValidateOptions,
        ctx: &Context<'_>,
        selected: F,
    ) -> ValidationResult
    where
        F: Fn(&str) -> bool,
    {
        if let Some(result) = self.base.check_presence(value, false) {
            return result;
        }

        let obj = match value.as_object() {
            Some(obj) => obj,
            None => return self.base.type_failure(value),
        };

        let entries = match &self.entries {
            Some(entries) => entries,
            None => return ValidationResult::ok(value.clone()),
        };

        let child_ctx = Context {
            root: ctx.root.or(Some(value)),
            parent: Some(value),
        };
        let mut out: Map<String, Value> = obj.clone();
        let mut error = ErrorTree::Empty;

        for entry in entries.iter().filter(|e| selected(e.name.as_str())) {
            let field = obj.get(&entry.name);
            let result =
                entry
                    .schema
                    .validate_with(field.unwrap_or(&Value::Null), options, &child_ctx);
            if !result.valid {
                error.insert(entry.name.clone(), result.error);
            } else if field.is_some() {
                out.insert(entry.name.clone(), result.value);
            }
        }

        if !error.is_empty() {
            trace_failure(IssueKind::ChildFailure, "object", value);
            return ValidationResult::fail(value.clone(), error);
        }

        if options.clean {
            out.retain(|key, _| entries.iter().any(|e| e.name == *key));
        }

        ValidationResult::ok(Value::Object(out))
    }
}

crate::base::impl_base_builders!(ObjectSchema);

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ObjectSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectSchema")
            .field("base", &self.base)
            .field("entries", &self.entries.as_ref().map(|_| self.keys()))
            .finish()
    }
}

impl Schema for ObjectSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Object
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
        self.run(value, options, ctx, |_| true)
    }
}

/// Build an entry list for [`ObjectSchema::entries`].
///
/// ```
/// use serde_json::json;
/// use uval::prelude::*;
///
/// let schema = uval::object().entries(uval::entries! {
///     "x" => uval::number(),
///     "tags" => uval::array().of(uval::string()),
/// });
/// assert_eq!(schema.validate(&json!({"x": "1"})).value, json!({"x": 1}));
/// ```
#[macro_export]
macro_rules! entries {
    ($($key:expr => $schema:expr),* $(,)?) => {
        ::std::vec![
            $((
                ::std::string::String::from($key),
                ::std::sync::Arc::new($schema) as $crate::schema::SchemaRef,
            )),*
        ]
    };
}
