//! Fieldrule
//!
//! Declarative validation of flat records: a [`RuleSet`] maps field names to
//! [`Rule`]s, and a [`Validator`] checks a [`Record`] against it, returning
//! one localized message per failing field.
//!
//! # Pipeline
//!
//! ```text
//! record ──► coerce (optional) ──► checker per rule type ──► message resolver
//!                                                              │
//!                               locale table + custom overrides┘
//! ```
//!
//! # Features
//!
//! - **Default**: Core validation on [`Value`] records
//! - **serde**: JSON rule sets/records and serializable errors
//!
//! # Example
//!
//! ```rust
//! use fieldrule::{Record, Rule, RuleSet, Validator, Value};
//!
//! let rules = RuleSet::new()
//!     .with("name", Rule::string().min(2).max(10))
//!     .with("age", Rule::integer().min(18));
//!
//! let mut record = Record::new();
//! record.insert("name".to_string(), Value::from("lord of the sea"));
//! record.insert("age".to_string(), Value::from("21"));
//!
//! let errors = Validator::default()
//!     .validate(&record, &rules, None)
//!     .unwrap()
//!     .expect("name is too long");
//!
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors.message_for("name"), Some("name length must be less than 10"));
//! ```

// Public modules
pub mod checkers;
pub mod coerce;
pub mod config;
pub mod errors;
pub mod formats;
pub mod locale;
pub mod messages;
pub mod rules;
pub mod types;
pub mod validator;

// JSON front door (feature-gated)
#[cfg(feature = "serde")]
pub mod json;

// Re-export commonly used types
pub use coerce::coerce;
pub use config::ValidatorConfig;
pub use errors::{ConfigError, ValidationError, ValidationErrors};
pub use locale::{Locale, LocaleTable};
pub use messages::{resolve, CustomMessages};
pub use rules::{Attribute, MessageKey, Pattern, Rule, RuleSet, RuleType};
pub use types::{Record, Value};
pub use validator::{ValidateResult, Validator};

#[cfg(feature = "serde")]
pub use json::{record_from_json, record_to_json};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
