use std::sync::Arc;

use serde_json::{Number, Value};

use crate::base::{BaseSchema, SchemaKind};
use crate::context::{Context, ValidateOptions};
use crate::error::{trace_failure, IssueKind, ValidationResult};
use crate::messages::{MessageKey, Messages};
use crate::schema::Schema;

/// Largest integer an `f64` holds exactly (2^53).
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone)]
enum NumberCheck {
    Min(f64, String),
    Max(f64, String),
}

impl NumberCheck {
    fn same_slot(&self, other: &NumberCheck) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Schema for numbers. Created via [`uval::number()`](crate::number).
///
/// In loose mode (the default) numeric strings such as `"42"`, `" 1.5 "`,
/// `"1e3"` or `"0x10"` are accepted and coerced.
///
/// # Example
/// ```
/// use serde_json::json;
/// use uval::prelude::*;
///
/// let schema = uval::number().min(2.0).max(10.0);
/// assert_eq!(schema.validate(&json!("4")).value, json!(4));
/// assert!(!schema.is_valid(&json!(11)));
/// assert!(!uval::number().strict().is_valid(&json!("4")));
/// ```
#[derive(Debug, Clone)]
pub struct NumberSchema {
    base: BaseSchema,
    checks: Vec<NumberCheck>,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self {
            base: BaseSchema::new(SchemaKind::Number),
            checks: vec![],
        }
    }

    /// Build with a per-schema message catalog.
    pub fn with_messages(messages: Arc<Messages>) -> Self {
        Self {
            base: BaseSchema::with_messages(SchemaKind::Number, messages),
            checks: vec![],
        }
    }

    /// Minimum value (inclusive).
    pub fn min(self, val: f64) -> Self {
        let msg = self
            .base
            .render(MessageKey::Small, &[("min", format_number(val))]);
        self.min_msg(val, msg)
    }

    pub fn min_msg(self, val: f64, msg: impl Into<String>) -> Self {
        self.set_check(NumberCheck::Min(val, msg.into()))
    }

    /// Maximum value (inclusive).
    pub fn max(self, val: f64) -> Self {
        let msg = self
            .base
            .render(MessageKey::Large, &[("max", format_number(val))]);
        self.max_msg(val, msg)
    }

    pub fn max_msg(self, val: f64, msg: impl Into<String>) -> Self {
        self.set_check(NumberCheck::Max(val, msg.into()))
    }

    fn set_check(mut self, check: NumberCheck) -> Self {
        match self.checks.iter_mut().find(|c| c.same_slot(&check)) {
            Some(slot) => *slot = check,
            None => self.checks.push(check),
        }
        self
    }

    /// Type check and coercion. `None` when the value is not acceptable.
    fn coerce(&self, value: &Value) -> Option<(f64, Value)> {
        match value {
            Value::Number(n) => n.as_f64().map(|f| (f, value.clone())),
            Value::String(s) if !self.base.is_strict() => {
                parse_numeric(s).and_then(|f| number_value(f).map(|v| (f, v)))
            }
            _ => None,
        }
    }
}

crate::base::impl_base_builders!(NumberSchema, strict);

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for NumberSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Number
    }

    fn type_message(&self) -> &str {
        self.base.type_message()
    }

    fn is_absent(&self, value: &Value) -> bool {
        matches!(value, Value::Null) || value.as_str() == Some("")
    }

    fn validate_with(
        &self,
        value: &Value,
        _options: &ValidateOptions,
        _ctx: &Context<'_>,
    ) -> ValidationResult {
        if let Some(result) = self.base.check_presence(value, true) {
            return result;
        }

        let (n, coerced) = match self.coerce(value) {
            Some(ok) => ok,
            None => return self.base.type_failure(value),
        };

        for check in &self.checks {
            let failed = match check {
                NumberCheck::Min(min, msg) => (n < *min).then_some(msg),
                NumberCheck::Max(max, msg) => (n > *max).then_some(msg),
            };
            if let Some(msg) = failed {
                trace_failure(IssueKind::ConstraintViolation, "number", value);
                return ValidationResult::fail(value.clone(), msg.as_str());
            }
        }

        ValidationResult::ok(coerced)
    }
}

/// Parse a numeric string the way form input is usually interpreted.
///
/// Surrounding whitespace is ignored; decimal, exponent and unsigned
/// `0x`/`0o`/`0b` integer forms are accepted. Words such as `inf` or `NaN`
/// and non-finite results are rejected.
pub(crate) fn parse_numeric(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = t.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
                return None;
            }
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }

    if t.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return None;
    }
    t.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// JSON value for a coerced number: integral values become JSON integers.
pub(crate) fn number_value(n: f64) -> Option<Value> {
    if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INT {
        // -0.0 collapses to 0
        Some(Value::from(n as i64))
    } else {
        Number::from_f64(n).map(Value::Number)
    }
}

/// Render a number the way a JavaScript host prints it (`2` not `2.0`).
pub(crate) fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if !n.is_finite() {
        return if n.is_nan() {
            "NaN".to_string()
        } else if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let s = format!("{:e}", n);
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => s,
        };
    }
    if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// Render a JSON number value as a string.
pub(crate) fn format_json_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        n.to_string()
    } else {
        n.as_f64().map(format_number).unwrap_or_else(|| n.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numeric_forms() {
        assert_eq!(parse_numeric("42"), Some(42.0));
        assert_eq!(parse_numeric("  1.5 "), Some(1.5));
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
        assert_eq!(parse_numeric("-2"), Some(-2.0));
        assert_eq!(parse_numeric(".5"), Some(0.5));
        assert_eq!(parse_numeric("0x10"), Some(16.0));
        assert_eq!(parse_numeric("0b101"), Some(5.0));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("   "), None);
        assert_eq!(parse_numeric("1px"), None);
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("Infinity"), None);
        assert_eq!(parse_numeric("0x"), None);
    }

    #[test]
    fn format_like_js() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-3.25), "-3.25");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-2.5e-8), "-2.5e-8");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(123456789.0), "123456789");
    }

    #[test]
    fn integral_values_become_integers() {
        assert_eq!(number_value(3.0), Some(Value::from(3)));
        assert_eq!(number_value(-0.0), Some(Value::from(0)));
        assert_eq!(number_value(2.5), Some(Value::from(2.5)));
    }
}
