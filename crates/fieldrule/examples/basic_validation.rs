//! Basic Validation Example
//!
//! This example demonstrates declaring rules and validating a record with
//! fieldrule.
//!
//! Run with:
//! ```bash
//! cargo run -p fieldrule --example basic_validation
//! ```

use fieldrule::{Pattern, Record, Rule, RuleSet, Validator, ValidatorConfig, Value};

// ============================================================================
// Rule Set
// ============================================================================

fn sailor_rules() -> RuleSet {
    RuleSet::new()
        .with("name", Rule::string().min(2).max(20))
        .with("age", Rule::integer().min(18).max(100))
        .with("rank", Rule::string().pattern(Pattern::new(r"^[A-Z]{2,4}$").unwrap()))
        .with("email", Rule::email())
        .with("mobile", Rule::mobile().optional())
        .with("on_duty", Rule::boolean())
}

fn record(pairs: &[(&str, Value)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn report(label: &str, validator: &Validator, input: &Record, rules: &RuleSet) {
    println!("  {}:", label);
    match validator.validate(input, rules, None) {
        Ok(None) => println!("    valid"),
        Ok(Some(errors)) => {
            for error in &errors {
                println!("    {}", error);
            }
        }
        Err(err) => println!("    configuration error: {}", err),
    }
}

// ============================================================================
// Coercion
// ============================================================================

fn demonstrate_coercion(rules: &RuleSet) {
    println!("1. Coercion");
    println!("-----------");

    let input = record(&[
        ("name", "Nemo".into()),
        ("age", "42".into()),
        ("rank", "CPT".into()),
        ("email", "nemo@nautilus.org".into()),
        ("on_duty", Value::Int(1)),
    ]);

    report("lenient", &Validator::default(), &input, rules);
    report(
        "strict",
        &Validator::new(ValidatorConfig::new().coerce(false)),
        &input,
        rules,
    );

    let mut in_place = input.clone();
    let _ = Validator::default().validate_in_place(&mut in_place, rules, None);
    println!("  after validate_in_place: age={:?} on_duty={:?}", in_place["age"], in_place["on_duty"]);
    println!();
}

// ============================================================================
// Failures
// ============================================================================

fn demonstrate_failures(rules: &RuleSet) {
    println!("2. Failures");
    println!("-----------");

    let input = record(&[
        ("name", "N".into()),
        ("age", Value::Int(12)),
        ("rank", "captain".into()),
        ("email", "nemo@nautilus".into()),
        ("mobile", "+0123456789".into()),
    ]);

    report("one message per field, in rule order", &Validator::default(), &input, rules);
    println!();
}

fn main() {
    println!("Basic Validation Example");
    println!("========================\n");

    let rules = sailor_rules();
    demonstrate_coercion(&rules);
    demonstrate_failures(&rules);
}
