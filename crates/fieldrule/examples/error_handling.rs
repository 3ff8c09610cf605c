//! Error Handling Example
//!
//! This example demonstrates the two failure channels of fieldrule:
//! configuration errors and field messages, plus locales and custom
//! overrides.
//!
//! Run with:
//! ```bash
//! cargo run -p fieldrule --example error_handling
//! ```

use fieldrule::{
    ConfigError, CustomMessages, Locale, LocaleTable, Record, Rule, RuleSet, RuleType, Validator,
    ValidatorConfig, Value,
};

fn main() {
    println!("Error Handling Example");
    println!("======================\n");

    demonstrate_config_errors();
    demonstrate_locales();
    demonstrate_custom_messages();
    demonstrate_custom_table();

    println!("Summary:");
    println!("  - ConfigError aborts the call, ValidationErrors lists field failures");
    println!("  - Locale tables supply message templates");
    println!("  - Custom messages override a single field attribute");
}

fn input() -> Record {
    Record::from([
        ("name".to_string(), Value::from("lord of the sea")),
        ("age".to_string(), Value::from(17)),
    ])
}

fn rules() -> RuleSet {
    RuleSet::new()
        .with("name", Rule::string().min(2).max(10))
        .with("age", Rule::integer().min(22).max(100).optional())
}

fn demonstrate_config_errors() {
    println!("1. Configuration Errors");
    println!("-----------------------");

    match "uuid".parse::<RuleType>() {
        Ok(rule_type) => println!("  Unexpected type: {}", rule_type),
        Err(err) => println!("  {}", err),
    }

    let sparse = LocaleTable::new("sparse").with("integer.required", ":field is missing");
    let validator = Validator::with_table(ValidatorConfig::default(), sparse);
    match validator.validate(&input(), &rules(), None) {
        Err(ConfigError::MissingTranslation { locale, key }) => {
            println!("  missing \"{}\" in {}", key, locale)
        }
        other => println!("  Unexpected result: {:?}", other),
    }
    println!();
}

fn demonstrate_locales() {
    println!("2. Locales");
    println!("----------");

    for locale in Locale::ALL {
        let validator = Validator::new(ValidatorConfig::new().locale(locale));
        if let Ok(Some(errors)) = validator.validate(&input(), &rules(), None) {
            println!("  {}:", locale.as_str());
            for error in &errors {
                println!("    {}", error);
            }
        }
    }
    println!();
}

fn demonstrate_custom_messages() {
    println!("3. Custom Messages");
    println!("------------------");

    let messages = CustomMessages::new()
        .set("name", "max", "name's length must be less than :max")
        .set("age", "min", "水手的年龄必须大于:min");

    if let Ok(Some(errors)) = Validator::default().validate(&input(), &rules(), Some(&messages)) {
        for error in errors.iter() {
            println!("  {}", error);
        }
    }
    println!();
}

fn demonstrate_custom_table() {
    println!("4. Custom Locale Table");
    println!("----------------------");

    let mut pirate = LocaleTable::new("pirate");
    for rule_type in RuleType::ALL {
        for attribute in rule_type.attributes() {
            pirate.insert(
                format!("{}.{}", rule_type, attribute.as_str()),
                ":field be wrong, matey",
            );
        }
    }
    pirate.insert("string.max", ":field be longer than :max, arr");

    let validator = Validator::with_table(ValidatorConfig::default(), pirate);
    if let Ok(Some(errors)) = validator.validate(&input(), &rules(), None) {
        for error in &errors {
            println!("  {}", error);
        }
    }
    println!();
}
