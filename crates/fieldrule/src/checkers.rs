//! Per-type checkers
//!
//! Each checker looks at one field's value and reports the first failing
//! [`Attribute`], in the fixed order required, type, max, min, pattern.
//! Checkers are pure; turning the attribute into a message is the
//! resolver's job.

use crate::formats;
use crate::rules::{Attribute, Rule, RuleType};
use crate::types::Value;

// ============================================================================
// Dispatch
// ============================================================================

/// Check `value` (absent when `None`) against `rule`.
pub fn check(rule: &Rule, value: Option<&Value>) -> Option<Attribute> {
    let value = match present(rule.rule_type, value) {
        Some(value) => value,
        None if rule.required => return Some(Attribute::Required),
        None => return None,
    };

    match rule.rule_type {
        RuleType::Integer => check_integer(rule, value),
        RuleType::Number => check_number(rule, value),
        RuleType::String => check_string(rule, value),
        RuleType::Boolean => check_boolean(value),
        RuleType::Email => check_format(value, formats::validate_email),
        RuleType::Mobile => check_format(value, formats::validate_mobile),
        RuleType::Date => check_format(value, formats::validate_date),
        RuleType::DateTime => check_format(value, formats::validate_datetime),
        RuleType::Password => check_format(value, formats::validate_password),
    }
}

/// Filter out values that count as missing for `rule_type`.
fn present(rule_type: RuleType, value: Option<&Value>) -> Option<&Value> {
    let value = value.filter(|v| !v.is_null())?;
    let missing = match rule_type {
        RuleType::Integer | RuleType::Number => match value {
            Value::Float(f) => f.is_nan(),
            Value::String(s) => s.is_empty(),
            _ => false,
        },
        RuleType::String => value.to_display_string().trim().is_empty(),
        _ => false,
    };
    (!missing).then_some(value)
}

// ============================================================================
// Numeric Checkers
// ============================================================================

fn check_integer(rule: &Rule, value: &Value) -> Option<Attribute> {
    let n = match value {
        Value::Int(i) => *i as f64,
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => *f,
        _ => return Some(Attribute::Type),
    };
    check_bounds(rule, n)
}

fn check_number(rule: &Rule, value: &Value) -> Option<Attribute> {
    match value.as_f64() {
        Some(n) => check_bounds(rule, n),
        None => Some(Attribute::Type),
    }
}

/// Strict comparison: a value equal to a bound passes.
fn check_bounds(rule: &Rule, n: f64) -> Option<Attribute> {
    if matches!(rule.max, Some(max) if n > max) {
        return Some(Attribute::Max);
    }
    if matches!(rule.min, Some(min) if n < min) {
        return Some(Attribute::Min);
    }
    None
}

// ============================================================================
// String Checker
// ============================================================================

fn check_string(rule: &Rule, value: &Value) -> Option<Attribute> {
    let Value::String(s) = value else {
        return Some(Attribute::Type);
    };

    // Length in characters, not bytes
    let len = s.chars().count() as f64;
    if matches!(rule.max, Some(max) if len > max) {
        return Some(Attribute::Max);
    }
    if matches!(rule.min, Some(min) if len < min) {
        return Some(Attribute::Min);
    }

    match &rule.pattern {
        Some(pattern) if !pattern.is_match(s) => Some(Attribute::Pattern),
        _ => None,
    }
}

// ============================================================================
// Boolean and Format Checkers
// ============================================================================

fn check_boolean(value: &Value) -> Option<Attribute> {
    match value {
        Value::Bool(_) => None,
        _ => Some(Attribute::Type),
    }
}

/// Format checkers test the textual form of any value.
fn check_format(value: &Value, is_valid: fn(&str) -> bool) -> Option<Attribute> {
    let valid = match value.as_str() {
        Some(s) => is_valid(s),
        None => is_valid(&value.to_display_string()),
    };
    (!valid).then_some(Attribute::Type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Pattern;

    #[test]
    fn test_missing_values() {
        let rule = Rule::integer();
        assert_eq!(check(&rule, None), Some(Attribute::Required));
        assert_eq!(check(&rule, Some(&Value::Null)), Some(Attribute::Required));
        assert_eq!(check(&rule, Some(&Value::Float(f64::NAN))), Some(Attribute::Required));
        assert_eq!(check(&rule, Some(&"".into())), Some(Attribute::Required));

        let optional = Rule::integer().optional();
        assert_eq!(check(&optional, None), None);
        assert_eq!(check(&optional, Some(&"".into())), None);
    }

    #[test]
    fn test_whitespace_string_is_missing() {
        assert_eq!(check(&Rule::string(), Some(&"   ".into())), Some(Attribute::Required));
        assert_eq!(check(&Rule::string().optional(), Some(&" \t".into())), None);
        assert_eq!(
            check(&Rule::string(), Some(&Value::List(vec![]))),
            Some(Attribute::Required)
        );
    }

    #[test]
    fn test_empty_string_for_format_types_is_present() {
        assert_eq!(check(&Rule::email(), Some(&"".into())), Some(Attribute::Type));
        assert_eq!(check(&Rule::email(), Some(&Value::Null)), Some(Attribute::Required));
    }

    #[test]
    fn test_integer_type() {
        let rule = Rule::integer();
        assert_eq!(check(&rule, Some(&Value::Int(3))), None);
        assert_eq!(check(&rule, Some(&Value::Float(3.0))), None);
        assert_eq!(check(&rule, Some(&Value::Float(3.5))), Some(Attribute::Type));
        assert_eq!(check(&rule, Some(&Value::Float(f64::INFINITY))), Some(Attribute::Type));
        assert_eq!(check(&rule, Some(&"123".into())), Some(Attribute::Type));
    }

    #[test]
    fn test_numeric_bounds_are_strict() {
        let rule = Rule::integer().min(10).max(20);
        assert_eq!(check(&rule, Some(&Value::Int(10))), None);
        assert_eq!(check(&rule, Some(&Value::Int(20))), None);
        assert_eq!(check(&rule, Some(&Value::Int(9))), Some(Attribute::Min));
        assert_eq!(check(&rule, Some(&Value::Int(21))), Some(Attribute::Max));

        let rule = Rule::number().min(80.5).max(80.6);
        assert_eq!(check(&rule, Some(&Value::Float(80.55))), None);
        assert_eq!(check(&rule, Some(&Value::Float(80.4))), Some(Attribute::Min));
        assert_eq!(check(&rule, Some(&Value::Float(80.9))), Some(Attribute::Max));
    }

    #[test]
    fn test_max_checked_before_min() {
        // Contradictory bounds: max wins
        let rule = Rule::number().min(100).max(0);
        assert_eq!(check(&rule, Some(&Value::Int(50))), Some(Attribute::Max));
    }

    #[test]
    fn test_string_checks_in_order() {
        let rule = Rule::string()
            .min(2)
            .max(4)
            .pattern(Pattern::new(r"^\d+$").unwrap());
        assert_eq!(check(&rule, Some(&Value::Int(1))), Some(Attribute::Type));
        assert_eq!(check(&rule, Some(&"hello".into())), Some(Attribute::Max));
        assert_eq!(check(&rule, Some(&"h".into())), Some(Attribute::Min));
        assert_eq!(check(&rule, Some(&"abc".into())), Some(Attribute::Pattern));
        assert_eq!(check(&rule, Some(&"123".into())), None);
    }

    #[test]
    fn test_string_length_counts_characters() {
        let rule = Rule::string().max(2);
        assert_eq!(check(&rule, Some(&"水手".into())), None);
    }

    #[test]
    fn test_boolean() {
        assert_eq!(check(&Rule::boolean(), Some(&Value::Bool(false))), None);
        assert_eq!(check(&Rule::boolean(), Some(&Value::Int(1))), Some(Attribute::Type));
    }

    #[test]
    fn test_format_uses_display_string() {
        assert_eq!(check(&Rule::mobile(), Some(&Value::Int(13366668888))), None);
        assert_eq!(check(&Rule::mobile(), Some(&"+0123456789".into())), Some(Attribute::Type));
        assert_eq!(check(&Rule::date(), Some(&"2025-04-16".into())), None);
        assert_eq!(check(&Rule::datetime(), Some(&"2025-04-16 23:12:12".into())), None);
        assert_eq!(check(&Rule::password(), Some(&"Passw0rd!".into())), None);
    }
}
