use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::base::{BaseSchema, SchemaKind};
use crate::context::{Context, ValidateOptions};
use crate::error::{trace_failure, IssueKind, ValidationResult};
use crate::messages::{MessageKey, Messages};
use crate::primitives::number::format_json_number;
use crate::reference::Reference;
use crate::schema::Schema;

/// A value a string may be compared against: a literal or a [`Reference`]
/// resolved at validation time.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    Literal(String),
    Ref(Reference),
}

impl Candidate {
    /// Whether `s` equals this candidate. Unresolvable references never match.
    fn matches(&self, s: &str, ctx: &Context<'_>) -> bool {
        match self {
            Candidate::Literal(lit) => lit == s,
            Candidate::Ref(r) => r.get_value(ctx).and_then(Value::as_str) == Some(s),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Literal(lit) => f.write_str(lit),
            Candidate::Ref(r) => write!(f, "{}", r),
        }
    }
}

impl From<&str> for Candidate {
    fn from(s: &str) -> Self {
        Candidate::Literal(s.to_string())
    }
}

impl From<String> for Candidate {
    fn from(s: String) -> Self {
        Candidate::Literal(s)
    }
}

impl From<Reference> for Candidate {
    fn from(r: Reference) -> Self {
        Candidate::Ref(r)
    }
}

/// Exclusivity group of a string check. Setting a check drops every check
/// of another group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckGroup {
    Shape,
    OneOf,
    Equals,
}

#[derive(Debug, Clone)]
enum StringCheck {
    Length(usize, String),
    MinLength(usize, String),
    MaxLength(usize, String),
    Matches(regex_lite::Regex, String),
    OneOf(Vec<Candidate>, String),
    Equals(Candidate, String),
}

impl StringCheck {
    fn group(&self) -> CheckGroup {
        match self {
            StringCheck::Length(..)
            | StringCheck::MinLength(..)
            | StringCheck::MaxLength(..)
            | StringCheck::Matches(..) => CheckGroup::Shape,
            StringCheck::OneOf(..) => CheckGroup::OneOf,
            StringCheck::Equals(..) => CheckGroup::Equals,
        }
    }

    fn same_slot(&self, other: &StringCheck) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// The failure message if `s` violates this check.
    fn violation(&self, s: &str, ctx: &Context<'_>) -> Option<&str> {
        let ok = match self {
            StringCheck::Length(n, _) => utf16_len(s) == *n,
            StringCheck::MinLength(n, _) => utf16_len(s) >= *n,
            StringCheck::MaxLength(n, _) => utf16_len(s) <= *n,
            StringCheck::Matches(re, _) => re.is_match(s),
            StringCheck::OneOf(candidates, _) => candidates.iter().any(|c| c.matches(s, ctx)),
            StringCheck::Equals(candidate, _) => candidate.matches(s, ctx),
        };
        if ok {
            return None;
        }
        match self {
            StringCheck::Length(_, m)
            | StringCheck::MinLength(_, m)
            | StringCheck::MaxLength(_, m)
            | StringCheck::Matches(_, m)
            | StringCheck::OneOf(_, m)
            | StringCheck::Equals(_, m) => Some(m),
        }
    }
}

/// Length in UTF-16 code units, the unit browsers use for `maxlength`.
fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Schema for strings. Created via [`uval::string()`](crate::string).
///
/// In loose mode (the default) numbers are accepted and coerced to their
/// string form.
///
/// `one_of` and `equals` are mutually exclusive with each other and with the
/// length checks and `matches`: setting one group clears the others.
///
/// # Example
/// ```
/// use serde_json::json;
/// use uval::prelude::*;
///
/// let schema = uval::string().min_length(2).max_length(5);
/// assert_eq!(schema.validate(&json!(123)).value, json!("123"));
/// assert!(!schema.is_valid(&json!("a")));
///
/// let confirm = uval::string().equals(uval::ref_path("password"));
/// let form = json!({"password": "s3cret"});
/// let ctx = Context::new().with_parent(&form);
/// assert!(confirm.validate_with(&json!("s3cret"), &ValidateOptions::default(), &ctx).valid);
/// ```
#[derive(Debug, Clone)]
pub struct StringSchema {
    base: BaseSchema,
    checks: Vec<StringCheck>,
}

impl StringSchema {
    pub fn new() -> Self {
        Self {
            base: BaseSchema::new(SchemaKind::String),
            checks: vec![],
        }
    }

    /// Build with a per-schema message catalog.
    pub fn with_messages(messages: Arc<Messages>) -> Self {
        Self {
            base: BaseSchema::with_messages(SchemaKind::String, messages),
            checks: vec![],
        }
    }

    /// Exact length in UTF-16 code units.
    pub fn length(self, len: usize) -> Self {
        let msg = self
            .base
            .render(MessageKey::Length, &[("length", len.to_string())]);
        self.length_msg(len, msg)
    }

    pub fn length_msg(self, len: usize, msg: impl Into<String>) -> Self {
        self.set_check(StringCheck::Length(len, msg.into()))
    }

    /// Minimum length in UTF-16 code units.
    pub fn min_length(self, len: usize) -> Self {
        let msg = self
            .base
            .render(MessageKey::Short, &[("length", len.to_string())]);
        self.min_length_msg(len, msg)
    }

    pub fn min_length_msg(self, len: usize, msg: impl Into<String>) -> Self {
        self.set_check(StringCheck::MinLength(len, msg.into()))
    }

    /// Maximum length in UTF-16 code units.
    pub fn max_length(self, len: usize) -> Self {
        let msg = self
            .base
            .render(MessageKey::Long, &[("length", len.to_string())]);
        self.max_length_msg(len, msg)
    }

    pub fn max_length_msg(self, len: usize, msg: impl Into<String>) -> Self {
        self.set_check(StringCheck::MaxLength(len, msg.into()))
    }

    /// Must match the given pattern.
    pub fn matches(self, re: regex_lite::Regex) -> Self {
        let msg = self.base.render(MessageKey::Format, &[]);
        self.matches_msg(re, msg)
    }

    pub fn matches_msg(self, re: regex_lite::Regex, msg: impl Into<String>) -> Self {
        self.set_check(StringCheck::Matches(re, msg.into()))
    }

    /// Must equal one of the candidates (literals or references).
    pub fn one_of<I, C>(self, candidates: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Candidate>,
    {
        let candidates: Vec<Candidate> = candidates.into_iter().map(Into::into).collect();
        let values = candidates
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let msg = self.base.render(MessageKey::OneOf, &[("values", values)]);
        self.set_check(StringCheck::OneOf(candidates, msg))
    }

    pub fn one_of_msg<I, C>(self, candidates: I, msg: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Candidate>,
    {
        let candidates = candidates.into_iter().map(Into::into).collect();
        self.set_check(StringCheck::OneOf(candidates, msg.into()))
    }

    /// Must equal the candidate (a literal or a reference to another field).
    pub fn equals(self, target: impl Into<Candidate>) -> Self {
        let target = target.into();
        let msg = self
            .base
            .render(MessageKey::Unequal, &[("field", target.to_string())]);
        self.set_check(StringCheck::Equals(target, msg))
    }

    pub fn equals_msg(self, target: impl Into<Candidate>, msg: impl Into<String>) -> Self {
        self.set_check(StringCheck::Equals(target.into(), msg.into()))
    }

    fn set_check(mut self, check: StringCheck) -> Self {
        let group = check.group();
        self.checks.retain(|c| c.group() == group);
        match self.checks.iter_mut().find(|c| c.same_slot(&check)) {
            Some(slot) => *slot = check,
            None => self.checks.push(check),
        }
        self
    }

    fn coerce(&self, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if !self.base.is_strict() => Some(format_json_number(n)),
            _ => None,
        }
    }
}

crate::base::impl_base_builders!(StringSchema, strict);

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for StringSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::String
    }

    fn type_message(&self) -> &str {
        self.base.type_message()
    }

    fn validate_with(
        &self,
        value: &Value,
        _options: &ValidateOptions,
        ctx: &Context<'_>,
    ) -> ValidationResult {
        if let Some(result) = self.base.check_presence(value, true) {
            return result;
        }

        let s = match self.coerce(value) {
            Some(s) => s,
            None => return self.base.type_failure(value),
        };

        if let Some(msg) = self.checks.iter().find_map(|c| c.violation(&s, ctx)) {
            trace_failure(IssueKind::ConstraintViolation, "string", value);
            return ValidationResult::fail(value.clone(), msg);
        }

        ValidationResult::ok(Value::String(s))
    }
}
