//! Validation error types
//!
//! Two kinds of failure exist and they never mix:
//!
//! - [`ConfigError`]: programmer mistakes (bad rule set, unsupported type,
//!   missing translation). Returned as `Err` and aborts the whole call.
//! - [`ValidationError`]: data-driven failures, one per offending field,
//!   collected into [`ValidationErrors`].

use std::fmt;
use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Fatal configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("rules must be an object")]
    RulesNotObject,

    #[error("input must be an object")]
    InputNotObject,

    #[error("custom messages must be an object")]
    MessagesNotObject,

    #[error("{0} is not supported")]
    UnsupportedType(String),

    #[error("cannot find translation \"{key}\" in locale {locale}")]
    MissingTranslation { locale: String, key: String },

    #[error("invalid pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid rule for field \"{field}\": {reason}")]
    InvalidRule { field: String, reason: String },
}

// ============================================================================
// Validation Errors Collection
// ============================================================================

/// Ordered collection of field failures
///
/// Errors appear in rule-set order, at most one per field.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ValidationErrors {
    /// List of individual validation errors
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create a new empty validation errors collection
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Add a validation error to the collection
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Iterate over the errors in order
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Message recorded for `field`, if it failed
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Convert to Result - Ok if no errors, Err if there are errors
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// `None` when empty, otherwise the collection itself
    pub fn into_option(self) -> Option<ValidationErrors> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    /// Get errors as a slice
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

// ============================================================================
// Single Validation Error
// ============================================================================

/// A single field failure with its resolved message
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationError {
    /// Field name as it appears in the rule set
    pub field: String,

    /// Localized, placeholder-substituted message
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
