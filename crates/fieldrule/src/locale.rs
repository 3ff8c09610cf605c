//! Locale tables
//!
//! A [`LocaleTable`] is a flat map from `"<type>.<attribute>"` keys to
//! message templates. Templates may contain the placeholder tokens `:field`,
//! `:min`, `:max` and `:pattern`.
//!
//! Two tables are built in: `en_US` (the default) and `zh_CN`.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Locale
// ============================================================================

/// Built-in locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English (default)
    #[default]
    EnUs,
    /// Simplified Chinese
    ZhCn,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::EnUs, Locale::ZhCn];

    /// Canonical identifier (`en_US`, `zh_CN`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::ZhCn => "zh_CN",
        }
    }

    /// Parse a locale identifier, case-insensitively, accepting `_` or `-`.
    pub fn parse(name: &str) -> Option<Self> {
        let normalized = name.trim().replace('-', "_").to_ascii_lowercase();
        match normalized.as_str() {
            "en_us" => Some(Self::EnUs),
            "zh_cn" => Some(Self::ZhCn),
            _ => None,
        }
    }

    /// Parse a locale identifier, falling back to `en_US` when unknown.
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            tracing::warn!(locale = name, "unknown locale, falling back to en_US");
            Self::EnUs
        })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Locale Table
// ============================================================================

/// Named message template table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTable {
    name: String,
    entries: HashMap<String, String>,
}

impl LocaleTable {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    /// Shared handle to a built-in table
    pub fn builtin(locale: Locale) -> Arc<LocaleTable> {
        match locale {
            Locale::EnUs => Arc::clone(&EN_US),
            Locale::ZhCn => Arc::clone(&ZH_CN),
        }
    }

    /// Add or replace a template
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.entries.insert(key.into(), template.into());
    }

    /// Builder form of [`LocaleTable::insert`]
    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(key, template);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keys in sorted order
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn from_entries(name: &str, entries: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            entries: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

// ============================================================================
// Built-in Tables
// ============================================================================

static EN_US: Lazy<Arc<LocaleTable>> =
    Lazy::new(|| Arc::new(LocaleTable::from_entries("en_US", EN_US_ENTRIES)));

static ZH_CN: Lazy<Arc<LocaleTable>> =
    Lazy::new(|| Arc::new(LocaleTable::from_entries("zh_CN", ZH_CN_ENTRIES)));

const EN_US_ENTRIES: &[(&str, &str)] = &[
    ("integer.required", ":field is required"),
    ("integer.type", ":field must be an integer"),
    ("integer.max", ":field must be less than :max"),
    ("integer.min", ":field must be greater than :min"),
    ("number.required", ":field is required"),
    ("number.type", ":field must be a number"),
    ("number.max", ":field must be less than :max"),
    ("number.min", ":field must be greater than :min"),
    ("string.required", ":field is required"),
    ("string.type", ":field must be a string"),
    ("string.max", ":field length must be less than :max"),
    ("string.min", ":field length must be greater than :min"),
    ("string.pattern", ":field fails to match the :pattern pattern"),
    ("boolean.required", ":field is required"),
    ("boolean.type", ":field must be a boolean"),
    ("email.required", ":field is required"),
    ("email.type", ":field must be an email"),
    ("mobile.required", ":field is required"),
    ("mobile.type", ":field must be a mobile"),
    ("date.required", ":field is required"),
    ("date.type", ":field must be a date"),
    ("datetime.required", ":field is required"),
    ("datetime.type", ":field must be a datetime"),
    ("password.required", ":field is required"),
    ("password.type", ":field must be a password"),
];

const ZH_CN_ENTRIES: &[(&str, &str)] = &[
    ("integer.required", ":field是必须的"),
    ("integer.type", ":field必须是整数"),
    ("integer.max", ":field必须小于:max"),
    ("integer.min", ":field必须大于:min"),
    ("number.required", ":field是必须的"),
    ("number.type", ":field必须是数字"),
    ("number.max", ":field必须小于:max"),
    ("number.min", ":field必须大于:min"),
    ("string.required", ":field是必须的"),
    ("string.type", ":field必须是字符串"),
    ("string.max", ":field长度必须小于:max"),
    ("string.min", ":field长度必须大于:min"),
    ("string.pattern", ":field必须匹配:pattern"),
    ("boolean.required", ":field是必须的"),
    ("boolean.type", ":field必须是布尔值"),
    ("email.required", ":field是必须的"),
    ("email.type", ":field必须是邮箱"),
    ("mobile.required", ":field是必须的"),
    ("mobile.type", ":field必须是手机号码"),
    ("date.required", ":field是必须的"),
    ("date.type", ":field必须是日期"),
    ("datetime.required", ":field是必须的"),
    ("datetime.type", ":field必须是日期时间"),
    ("password.required", ":field是必须的"),
    ("password.type", ":field必须是密码"),
];
