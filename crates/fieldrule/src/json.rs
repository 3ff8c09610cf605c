//! JSON front door (feature `serde`)
//!
//! Builds rule sets, records and custom messages from untyped JSON, and
//! exposes [`Validator::validate_json`] for callers that only have dynamic
//! data. Shape problems surface as [`ConfigError`]s, never as validation
//! failures.

use crate::errors::ConfigError;
use crate::messages::CustomMessages;
use crate::rules::{Pattern, Rule, RuleSet, RuleType};
use crate::types::{Record, Value};
use crate::validator::{ValidateResult, Validator};
use serde_json::{Map, Value as Json};

impl RuleSet {
    /// Parse a JSON object of `field -> {type, required, min, max, pattern}`.
    ///
    /// Field order follows the document.
    ///
    /// ```
    /// use fieldrule::RuleSet;
    ///
    /// let rules = RuleSet::from_json(&serde_json::json!({
    ///     "name": { "type": "string", "min": 2 },
    ///     "age": { "type": "integer", "required": false }
    /// })).unwrap();
    /// assert_eq!(rules.len(), 2);
    /// ```
    pub fn from_json(json: &Json) -> Result<Self, ConfigError> {
        let object = json.as_object().ok_or(ConfigError::RulesNotObject)?;
        let mut rules = RuleSet::new();
        for (field, entry) in object {
            rules.insert(field.clone(), rule_from_json(field, entry)?);
        }
        Ok(rules)
    }
}

fn rule_from_json(field: &str, entry: &Json) -> Result<Rule, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidRule {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    let entry = entry.as_object().ok_or_else(|| invalid("rule must be an object"))?;
    let type_name = entry
        .get("type")
        .and_then(Json::as_str)
        .ok_or_else(|| invalid("\"type\" must be a string"))?;
    let mut rule = Rule::new(type_name.parse::<RuleType>()?);

    match entry.get("required") {
        None | Some(Json::Null) => {}
        Some(Json::Bool(required)) => rule.required = *required,
        Some(_) => return Err(invalid("\"required\" must be a boolean")),
    }

    rule.min = bound(entry, "min").map_err(|_| invalid("\"min\" must be a number"))?;
    rule.max = bound(entry, "max").map_err(|_| invalid("\"max\" must be a number"))?;

    match entry.get("pattern") {
        None | Some(Json::Null) => {}
        Some(Json::String(text)) => rule.pattern = Some(Pattern::parse_literal(text)?),
        Some(_) => return Err(invalid("\"pattern\" must be a string")),
    }

    Ok(rule)
}

fn bound(entry: &Map<String, Json>, key: &str) -> Result<Option<f64>, ()> {
    match entry.get(key) {
        None | Some(Json::Null) => Ok(None),
        Some(Json::Number(n)) => n.as_f64().map(Some).ok_or(()),
        Some(_) => Err(()),
    }
}

/// Convert a JSON object into a [`Record`].
pub fn record_from_json(json: &Json) -> Result<Record, ConfigError> {
    let object = json.as_object().ok_or(ConfigError::InputNotObject)?;
    Ok(object
        .iter()
        .map(|(k, v)| (k.clone(), Value::from(v.clone())))
        .collect())
}

/// Convert a [`Record`] back into a JSON object.
pub fn record_to_json(record: &Record) -> Json {
    Json::Object(
        record
            .iter()
            .map(|(k, v)| (k.clone(), Json::from(v.clone())))
            .collect(),
    )
}

impl CustomMessages {
    /// Parse `field -> attribute -> text`. Non-string texts are skipped.
    pub fn from_json(json: &Json) -> Result<Self, ConfigError> {
        let object = json.as_object().ok_or(ConfigError::MessagesNotObject)?;

        let mut messages = CustomMessages::new();
        for (field, attrs) in object {
            let Some(attrs) = attrs.as_object() else {
                continue;
            };
            for (attribute, text) in attrs {
                if let Some(text) = text.as_str() {
                    messages.insert(field.clone(), attribute.clone(), text);
                }
            }
        }
        Ok(messages)
    }
}

impl Validator {
    /// Validate untyped JSON input against untyped JSON rules.
    ///
    /// Non-object `rules` or `input` and malformed rules are configuration
    /// errors. Coerced values are not written back.
    pub fn validate_json(
        &self,
        input: &Json,
        rules: &Json,
        messages: Option<&Json>,
    ) -> ValidateResult {
        let rules = RuleSet::from_json(rules)?;
        let record = record_from_json(input)?;
        let messages = messages.map(CustomMessages::from_json).transpose()?;
        self.validate(&record, &rules, messages.as_ref())
    }
}
