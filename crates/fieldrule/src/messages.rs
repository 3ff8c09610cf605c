//! Message resolution
//!
//! Turns a failing [`MessageKey`] into the final display string:
//! locale template, optionally replaced by a per-field custom message, then
//! placeholder substitution.

use crate::errors::ConfigError;
use crate::locale::LocaleTable;
use crate::rules::{MessageKey, Rule};
use crate::types::format_number;
use std::collections::HashMap;

// ============================================================================
// Custom Messages
// ============================================================================

/// Per-field message overrides: field -> attribute name -> text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomMessages {
    fields: HashMap<String, HashMap<String, String>>,
}

impl CustomMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the message for `attribute` (`required`, `type`, `min`,
    /// `max`, `pattern`) of `field`
    pub fn set(
        mut self,
        field: impl Into<String>,
        attribute: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.insert(field, attribute, message);
        self
    }

    pub fn insert(
        &mut self,
        field: impl Into<String>,
        attribute: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.fields
            .entry(field.into())
            .or_default()
            .insert(attribute.into(), message.into());
    }

    /// Override text, if set and non-empty
    pub fn get(&self, field: &str, attribute: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|attrs| attrs.get(attribute))
            .map(String::as_str)
            .filter(|message| !message.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolve `key` into the message shown for `field`.
///
/// The key must exist in `table` even when a custom override is present; a
/// missing key means the engine and the table disagree and is reported as a
/// [`ConfigError::MissingTranslation`].
pub fn resolve(
    key: MessageKey,
    field: &str,
    rule: &Rule,
    custom: Option<&CustomMessages>,
    table: &LocaleTable,
) -> Result<String, ConfigError> {
    let key_text = key.to_string();
    let template = table
        .get(&key_text)
        .ok_or_else(|| ConfigError::MissingTranslation {
            locale: table.name().to_string(),
            key: key_text.clone(),
        })?;

    let template = custom
        .and_then(|messages| messages.get(field, key.attribute.as_str()))
        .unwrap_or(template);

    Ok(substitute(template, field, rule))
}

/// Replace `:field`, `:min`, `:max` and `:pattern`, in that order.
///
/// Only the first occurrence of each token is replaced. A token whose rule
/// parameter is unset is left as is.
pub fn substitute(template: &str, field: &str, rule: &Rule) -> String {
    let mut message = template.replacen(":field", field, 1);
    if let Some(min) = rule.min {
        message = message.replacen(":min", &format_number(min), 1);
    }
    if let Some(max) = rule.max {
        message = message.replacen(":max", &format_number(max), 1);
    }
    if let Some(pattern) = &rule.pattern {
        message = message.replacen(":pattern", pattern.display(), 1);
    }
    message
}
