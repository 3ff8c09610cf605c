//! Rule model
//!
//! A [`Rule`] describes one field: its [`RuleType`], whether it is required,
//! optional numeric/length bounds and (for strings) a [`Pattern`]. A
//! [`RuleSet`] keeps rules in insertion order, which is also the order in
//! which failures are reported.

use crate::errors::ConfigError;
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Rule Types
// ============================================================================

/// Supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    /// Whole number
    Integer,
    /// Any finite or infinite number
    Number,
    /// Text with optional length bounds and pattern
    String,
    /// `true` / `false`
    Boolean,
    /// Email address format
    Email,
    /// International mobile number (E.164-like)
    Mobile,
    /// Date format (YYYY-MM-DD)
    Date,
    /// Date and time (YYYY-MM-DD HH:MM:SS)
    DateTime,
    /// Strong password
    Password,
}

impl RuleType {
    /// All supported types, in declaration order
    pub const ALL: [RuleType; 9] = [
        RuleType::Integer,
        RuleType::Number,
        RuleType::String,
        RuleType::Boolean,
        RuleType::Email,
        RuleType::Mobile,
        RuleType::Date,
        RuleType::DateTime,
        RuleType::Password,
    ];

    /// Name used in rule definitions and as the message key prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Email => "email",
            Self::Mobile => "mobile",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Password => "password",
        }
    }

    /// Attributes a checker of this type can fail on
    pub fn attributes(&self) -> &'static [Attribute] {
        match self {
            Self::Integer | Self::Number => {
                &[Attribute::Required, Attribute::Type, Attribute::Max, Attribute::Min]
            }
            Self::String => &[
                Attribute::Required,
                Attribute::Type,
                Attribute::Max,
                Attribute::Min,
                Attribute::Pattern,
            ],
            _ => &[Attribute::Required, Attribute::Type],
        }
    }
}

impl FromStr for RuleType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ConfigError::UnsupportedType(s.to_string()))
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Attributes and Message Keys
// ============================================================================

/// Rule attribute a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Required,
    Type,
    Max,
    Min,
    Pattern,
}

impl Attribute {
    /// Name used as the message key suffix and in custom message maps
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Type => "type",
            Self::Max => "max",
            Self::Min => "min",
            Self::Pattern => "pattern",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dotted translation key, e.g. `integer.required`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageKey {
    pub rule_type: RuleType,
    pub attribute: Attribute,
}

impl MessageKey {
    pub fn new(rule_type: RuleType, attribute: Attribute) -> Self {
        Self {
            rule_type,
            attribute,
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.rule_type, self.attribute)
    }
}

// ============================================================================
// Pattern
// ============================================================================

/// Compiled regular expression plus the text shown in messages
///
/// The display form is stored separately from the matcher so that `:pattern`
/// renders exactly what the rule author wrote.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    display: String,
}

impl Pattern {
    /// Compile a bare regex source; displays as `/source/`.
    pub fn new(source: &str) -> Result<Self, ConfigError> {
        let regex = compile(source, RegexBuilder::new(source))?;
        Ok(Self {
            regex,
            display: format!("/{}/", source),
        })
    }

    /// Parse a slash-delimited literal such as `/^\d+$/i`.
    ///
    /// Supported flags are `i`, `m` and `s`; `g`, `u` and `y` are accepted and
    /// ignored. Text that is not a well-formed literal is compiled as a bare
    /// source with [`Pattern::new`].
    pub fn parse_literal(text: &str) -> Result<Self, ConfigError> {
        let Some((source, flags)) = split_literal(text) else {
            return Self::new(text);
        };

        let mut builder = RegexBuilder::new(source);
        for flag in flags.chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                _ => {}
            }
        }

        Ok(Self {
            regex: compile(source, builder)?,
            display: text.to_string(),
        })
    }

    /// Wrap an already compiled regex; displays as `/source/`.
    pub fn from_regex(regex: Regex) -> Self {
        let display = format!("/{}/", regex.as_str());
        Self { regex, display }
    }

    /// Replace the display form
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = display.into();
        self
    }

    /// Unanchored match, like a regex `test`
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Text substituted for `:pattern`
    pub fn display(&self) -> &str {
        &self.display
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.display == other.display && self.regex.as_str() == other.regex.as_str()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

fn compile(source: &str, builder: RegexBuilder) -> Result<Regex, ConfigError> {
    builder.build().map_err(|source_err| ConfigError::InvalidPattern {
        pattern: source.to_string(),
        source: source_err,
    })
}

fn split_literal(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix('/')?;
    let end = rest.rfind('/')?;
    let (source, flags) = (&rest[..end], &rest[end + 1..]);
    if source.is_empty() || !flags.chars().all(|c| "gimsuy".contains(c)) {
        return None;
    }
    Some((source, flags))
}

// ============================================================================
// Rule
// ============================================================================

/// Constraint descriptor for one field
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Checker to dispatch to
    pub rule_type: RuleType,
    /// Whether a missing value is a failure (default: true)
    pub required: bool,
    /// Lower bound: value for numbers, length for strings
    pub min: Option<f64>,
    /// Upper bound: value for numbers, length for strings
    pub max: Option<f64>,
    /// String pattern
    pub pattern: Option<Pattern>,
}

impl Rule {
    /// Create a required rule of the given type
    pub fn new(rule_type: RuleType) -> Self {
        Self {
            rule_type,
            required: true,
            min: None,
            max: None,
            pattern: None,
        }
    }

    pub fn integer() -> Self {
        Self::new(RuleType::Integer)
    }

    pub fn number() -> Self {
        Self::new(RuleType::Number)
    }

    pub fn string() -> Self {
        Self::new(RuleType::String)
    }

    pub fn boolean() -> Self {
        Self::new(RuleType::Boolean)
    }

    pub fn email() -> Self {
        Self::new(RuleType::Email)
    }

    pub fn mobile() -> Self {
        Self::new(RuleType::Mobile)
    }

    pub fn date() -> Self {
        Self::new(RuleType::Date)
    }

    pub fn datetime() -> Self {
        Self::new(RuleType::DateTime)
    }

    pub fn password() -> Self {
        Self::new(RuleType::Password)
    }

    /// Set whether the field is required
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Shorthand for `required(false)`
    pub fn optional(self) -> Self {
        self.required(false)
    }

    /// Set the lower bound
    pub fn min(mut self, min: impl Into<f64>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Set the upper bound
    pub fn max(mut self, max: impl Into<f64>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Set the string pattern
    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }
}

// ============================================================================
// Rule Set
// ============================================================================

/// Insertion-ordered mapping from field name to rule
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<(String, Rule)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for `field`.
    ///
    /// Replacing keeps the field's original position.
    pub fn insert(&mut self, field: impl Into<String>, rule: Rule) {
        let field = field.into();
        match self.rules.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = rule,
            None => self.rules.push((field, rule)),
        }
    }

    /// Builder form of [`RuleSet::insert`]
    pub fn with(mut self, field: impl Into<String>, rule: Rule) -> Self {
        self.insert(field, rule);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rule)| rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Rule)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (S, Rule)>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for (field, rule) in iter {
            set.insert(field, rule);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_type_from_str() {
        assert_eq!("integer".parse::<RuleType>().unwrap(), RuleType::Integer);
        assert_eq!("datetime".parse::<RuleType>().unwrap(), RuleType::DateTime);

        let err = "uuid".parse::<RuleType>().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedType(ref t) if t == "uuid"));
    }

    #[test]
    fn test_message_key_display() {
        let key = MessageKey::new(RuleType::String, Attribute::Pattern);
        assert_eq!(key.to_string(), "string.pattern");
    }

    #[test]
    fn test_pattern_display() {
        let pattern = Pattern::new(r"\d+").unwrap();
        assert_eq!(pattern.display(), r"/\d+/");
        assert!(pattern.is_match("abc123"));
        assert!(!pattern.is_match("hello"));
    }

    #[test]
    fn test_pattern_literal_flags() {
        let pattern = Pattern::parse_literal("/^abc$/i").unwrap();
        assert_eq!(pattern.display(), "/^abc$/i");
        assert!(pattern.is_match("ABC"));

        // not a literal: compiled as a bare source
        let bare = Pattern::parse_literal("^a/b$").unwrap();
        assert_eq!(bare.display(), "/^a/b$/");
        assert!(bare.is_match("a/b"));
    }

    #[test]
    fn test_pattern_from_regex() {
        let pattern = Pattern::from_regex(Regex::new("^[a-z]+$").unwrap());
        assert_eq!(pattern.display(), "/^[a-z]+$/");
        assert!(pattern.is_match("sea"));

        let pattern = pattern.with_display("lowercase letters");
        assert_eq!(pattern.to_string(), "lowercase letters");
        assert!(!pattern.is_match("Sea"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Pattern::new("(unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn test_rule_builder() {
        let rule = Rule::string().min(2).max(10).optional();
        assert_eq!(rule.rule_type, RuleType::String);
        assert!(!rule.required);
        assert_eq!(rule.min, Some(2.0));
        assert_eq!(rule.max, Some(10.0));
    }

    #[test]
    fn test_rule_set_keeps_insertion_order() {
        let mut rules = RuleSet::new()
            .with("name", Rule::string())
            .with("age", Rule::integer())
            .with("email", Rule::email());
        rules.insert("age", Rule::number());

        let fields: Vec<_> = rules.fields().collect();
        assert_eq!(fields, vec!["name", "age", "email"]);
        assert_eq!(rules.get("age").unwrap().rule_type, RuleType::Number);
        assert_eq!(rules.len(), 3);
    }
}
