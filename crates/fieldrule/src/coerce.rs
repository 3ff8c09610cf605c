//! Best-effort type coercion
//!
//! Runs before validation when enabled. Values whose runtime representation
//! differs from the declared type are converted where possible; anything that
//! cannot be converted is left untouched for the checker to reject.
//!
//! Coercion is a fixed point: running it on already-coerced data changes
//! nothing.

use crate::rules::{RuleSet, RuleType};
use crate::types::{Record, Value};

/// Coerce `record` in place according to the declared rule types.
///
/// Fields that are absent or `null` are skipped, so coercion never makes a
/// missing field present.
pub fn coerce(record: &mut Record, rules: &RuleSet) {
    for (field, rule) in rules.iter() {
        let Some(value) = record.get_mut(field) else {
            continue;
        };
        if value.is_null() {
            continue;
        }

        let coerced = match rule.rule_type {
            RuleType::Integer => coerce_integer(value),
            RuleType::Number => coerce_number(value),
            RuleType::String => Some(coerce_string(value)),
            RuleType::Boolean => Some(Value::Bool(value.is_truthy())),
            _ => None,
        };

        if let Some(new_value) = coerced {
            if new_value != *value {
                tracing::trace!(
                    field,
                    rule_type = rule.rule_type.as_str(),
                    from = value.type_name(),
                    to = new_value.type_name(),
                    "coerced value"
                );
                *value = new_value;
            }
        }
    }
}

/// Integer coercion: truncate floats, leniently parse a decimal prefix of
/// everything else (`"12abc"` becomes 12).
fn coerce_integer(value: &Value) -> Option<Value> {
    match value {
        Value::Int(_) => None,
        Value::Float(f) => truncate(*f).map(Value::Int),
        other => parse_int_prefix(&other.to_display_string()).map(Value::Int),
    }
}

/// Number coercion: strict full-text parse, booleans become 1/0.
///
/// Only the literal empty string is skipped; blank text and empty lists
/// become 0.
fn coerce_number(value: &Value) -> Option<Value> {
    match value {
        Value::Int(_) | Value::Float(_) => None,
        Value::Bool(b) => Some(Value::Int(i64::from(*b))),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => parse_number(s),
        Value::List(_) => parse_number(&value.to_display_string()),
        Value::Null | Value::Object(_) => None,
    }
}

fn coerce_string(value: &Value) -> Value {
    match value {
        Value::String(_) => value.clone(),
        other => Value::String(other.to_display_string()),
    }
}

fn truncate(f: f64) -> Option<i64> {
    if !f.is_finite() {
        return None;
    }
    let t = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

/// Parse leading whitespace, an optional sign and at least one ASCII digit.
/// Trailing characters are ignored.
fn parse_int_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let digits = &rest[..digits_len];
    let parsed = if negative {
        format!("-{}", digits).parse::<i64>()
    } else {
        digits.parse::<i64>()
    };
    parsed.ok()
}

/// Parse trimmed text as a finite number. Integral text yields `Int`,
/// blank text yields 0.
fn parse_number(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(Value::Int(0));
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Value::Int(i));
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(Value::Float(f)),
        _ => None,
    }
}
