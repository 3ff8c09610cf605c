//! Rule engine
//!
//! [`Validator`] walks a [`RuleSet`] in order, dispatches every field to its
//! checker and resolves failures into localized messages.
//!
//! A validator holds only its configuration and locale table. Everything
//! that varies per call (current field, rule, custom messages) lives in a
//! stack-local [`FieldScope`], so one instance can be shared across threads.

use crate::checkers;
use crate::coerce::coerce;
use crate::config::ValidatorConfig;
use crate::errors::{ConfigError, ValidationError, ValidationErrors};
use crate::locale::LocaleTable;
use crate::messages::{self, CustomMessages};
use crate::rules::{MessageKey, Rule, RuleSet};
use crate::types::{Record, Value};
use std::borrow::Cow;
use std::sync::Arc;

/// Result of a validation call: `Ok(None)` means every field passed.
pub type ValidateResult = Result<Option<ValidationErrors>, ConfigError>;

// ============================================================================
// Validator
// ============================================================================

/// Validates records against rule sets
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidatorConfig,
    table: Arc<LocaleTable>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

impl Validator {
    /// Create a validator using the built-in table for `config.locale`
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            table: LocaleTable::builtin(config.locale),
            config,
        }
    }

    /// Create a validator with a caller-supplied message table.
    ///
    /// `config.locale` is kept for reference; messages come from `table`.
    pub fn with_table(config: ValidatorConfig, table: LocaleTable) -> Self {
        Self {
            config,
            table: Arc::new(table),
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn table(&self) -> &LocaleTable {
        &self.table
    }

    /// Validate `record` against `rules`.
    ///
    /// When coercion is enabled it runs on a private copy; the caller's
    /// record is never modified.
    pub fn validate(
        &self,
        record: &Record,
        rules: &RuleSet,
        messages: Option<&CustomMessages>,
    ) -> ValidateResult {
        let record = if self.config.coerce {
            let mut copy = record.clone();
            coerce(&mut copy, rules);
            Cow::Owned(copy)
        } else {
            Cow::Borrowed(record)
        };
        self.run(&record, rules, messages)
    }

    /// Validate `record`, writing coerced values back into it.
    pub fn validate_in_place(
        &self,
        record: &mut Record,
        rules: &RuleSet,
        messages: Option<&CustomMessages>,
    ) -> ValidateResult {
        if self.config.coerce {
            coerce(record, rules);
        }
        self.run(record, rules, messages)
    }

    fn run(
        &self,
        record: &Record,
        rules: &RuleSet,
        messages: Option<&CustomMessages>,
    ) -> ValidateResult {
        let mut errors = ValidationErrors::new();
        let messages = messages.filter(|custom| !custom.is_empty());

        for (field, rule) in rules.iter() {
            let scope = FieldScope {
                field,
                rule,
                messages,
                table: &self.table,
            };
            if let Some(message) = scope.check(record.get(field))? {
                tracing::trace!(field, reason = %message, "field failed");
                errors.add(ValidationError::new(field, message));
            }
        }

        tracing::debug!(
            locale = self.table.name(),
            fields = rules.len(),
            errors = errors.len(),
            "validated record"
        );

        Ok(errors.into_option())
    }
}

// ============================================================================
// Per-call Context
// ============================================================================

/// Everything needed to check and report on one field
struct FieldScope<'a> {
    field: &'a str,
    rule: &'a Rule,
    messages: Option<&'a CustomMessages>,
    table: &'a LocaleTable,
}

impl FieldScope<'_> {
    fn check(&self, value: Option<&Value>) -> Result<Option<String>, ConfigError> {
        match checkers::check(self.rule, value) {
            Some(attribute) => {
                let key = MessageKey::new(self.rule.rule_type, attribute);
                messages::resolve(key, self.field, self.rule, self.messages, self.table).map(Some)
            }
            None => Ok(None),
        }
    }
}
