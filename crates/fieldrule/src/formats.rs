//! Format validation for the fixed-format rule types
//!
//! Pre-compiled regex validators for email, mobile, date, datetime and
//! password values. Digit classes are spelled `[0-9]` so that only ASCII
//! digits match.

use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// Pre-compiled Regex Patterns
// ============================================================================

/// Email regex pattern (RFC 5322 simplified)
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Mobile regex pattern (optional `+`, 7 to 15 digits, no leading zero)
static MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[1-9][0-9]{6,14}$").unwrap()
});

/// Date regex pattern (YYYY-MM-DD, years 1900-2099)
static DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(19|20)[0-9]{2}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$").unwrap()
});

/// DateTime regex pattern (YYYY-MM-DD HH:MM:SS)
static DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01]) ([01][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9]$",
    )
    .unwrap()
});

/// Characters a password may consist of, at least 8 of them
static PASSWORD_CHARSET_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9@$!%*?&]{8,}$").unwrap()
});

const PASSWORD_SPECIALS: &str = "@$!%*?&";

// ============================================================================
// Format Validators
// ============================================================================

/// Validate email format
///
/// # Example
/// ```
/// use fieldrule::formats::validate_email;
///
/// assert!(validate_email("test.ss.ss@qq.com"));
/// assert!(!validate_email("test@test"));
/// ```
pub fn validate_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Validate mobile number format
///
/// # Example
/// ```
/// use fieldrule::formats::validate_mobile;
///
/// assert!(validate_mobile("+447900123456"));
/// assert!(!validate_mobile("+0123456789"));
/// ```
pub fn validate_mobile(value: &str) -> bool {
    MOBILE_REGEX.is_match(value)
}

/// Validate date format (YYYY-MM-DD)
pub fn validate_date(value: &str) -> bool {
    DATE_REGEX.is_match(value)
}

/// Validate datetime format (YYYY-MM-DD HH:MM:SS)
pub fn validate_datetime(value: &str) -> bool {
    DATETIME_REGEX.is_match(value)
}

/// Validate password strength
///
/// At least 8 characters from `[A-Za-z0-9@$!%*?&]`, containing at least one
/// lowercase letter, one uppercase letter, one digit and one of `@$!%*?&`.
/// The `regex` crate has no look-ahead, so the class requirements are
/// checked separately from the charset.
pub fn validate_password(value: &str) -> bool {
    PASSWORD_CHARSET_REGEX.is_match(value)
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        // Valid emails
        assert!(validate_email("user@example.com"));
        assert!(validate_email("test.ss.ss@qq.com"));
        assert!(validate_email("test.user+tag@subdomain.example.co.uk"));

        // Invalid emails
        assert!(!validate_email(""));
        assert!(!validate_email("test@test"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@"));
    }

    #[test]
    fn test_mobile_validation() {
        assert!(validate_mobile("13366668888"));
        assert!(validate_mobile("+1234567890"));
        assert!(validate_mobile("8613800138000"));
        assert!(validate_mobile("+447900123456"));

        // Country code cannot start with 0
        assert!(!validate_mobile("+0123456789"));
        // Too short
        assert!(!validate_mobile("123456"));
        // Too long
        assert!(!validate_mobile("1234567890123456"));
        // Non-ASCII digits
        assert!(!validate_mobile("١٢٣٤٥٦٧٨"));
    }

    #[test]
    fn test_date_validation() {
        assert!(validate_date("2025-04-16"));
        assert!(validate_date("1999-12-31"));

        assert!(!validate_date("666677"));
        assert!(!validate_date("2100-01-01"));
        assert!(!validate_date("2025-13-01"));
        assert!(!validate_date("2025-01-32"));
        assert!(!validate_date("2025-4-16"));
    }

    #[test]
    fn test_datetime_validation() {
        assert!(validate_datetime("2025-04-16 23:12:12"));
        assert!(validate_datetime("0001-01-01 00:00:00"));

        assert!(!validate_datetime("666677"));
        assert!(!validate_datetime("2025-13-05 14:30:45"));
        assert!(!validate_datetime("2025-04-16 24:00:00"));
        assert!(!validate_datetime("2025-04-16T23:12:12"));
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password("Passw0rd!"));
        assert!(validate_password("aB3$aB3$"));

        assert!(!validate_password("6666566756756777"));
        // Too short
        assert!(!validate_password("Pa0!"));
        // Missing special
        assert!(!validate_password("Password1"));
        // Missing uppercase
        assert!(!validate_password("passw0rd!"));
        // Disallowed character
        assert!(!validate_password("Passw0rd!#"));
    }
}
