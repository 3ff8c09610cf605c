//! Configuration options for validation behavior
//!
//! Set once when a [`Validator`](crate::Validator) is constructed.

use crate::locale::Locale;

// ============================================================================
// Validator Config
// ============================================================================

/// Configuration options for validation behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Locale whose message table is used
    pub locale: Locale,

    /// Run the coercion pass before validation
    pub coerce: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            locale: Locale::EnUs,
            coerce: true,
        }
    }
}

impl ValidatorConfig {
    /// Create a new config with defaults (`en_US`, coercion on)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message locale
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the locale by name; unknown names fall back to `en_US`
    pub fn locale_name(mut self, name: &str) -> Self {
        self.locale = Locale::from_name(name);
        self
    }

    /// Enable or disable coercion
    pub fn coerce(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidatorConfig::default();
        assert_eq!(config.locale, Locale::EnUs);
        assert!(config.coerce);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ValidatorConfig::new().locale(Locale::ZhCn).coerce(false);
        assert_eq!(config.locale, Locale::ZhCn);
        assert!(!config.coerce);
    }

    #[test]
    fn test_locale_name_fallback() {
        assert_eq!(ValidatorConfig::new().locale_name("zh_CN").locale, Locale::ZhCn);
        assert_eq!(ValidatorConfig::new().locale_name("xx").locale, Locale::EnUs);
    }
}
