//! Fieldrule CLI - validate records from the command line
//!
//! Usage:
//!   fieldrule check --rules rules.json --input record.json
//!   fieldrule check --rules rules.yaml --input record.yaml --locale zh_CN
//!   fieldrule check --rules r.json --input i.json --messages m.json --format json
//!   fieldrule check --rules r.json --input i.json --no-coerce
//!   fieldrule locales                 List built-in locales
//!   fieldrule locales zh_CN           List message templates of a locale
//!
//! Exit status: 0 when the record is valid, 1 when it has field failures,
//! 2 on configuration or IO errors.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value as Json};
use std::path::{Path, PathBuf};

use fieldrule::{
    record_from_json, record_to_json, CustomMessages, Locale, LocaleTable, Record, RuleSet,
    ValidationErrors, Validator, ValidatorConfig,
};

const EXIT_VALID: i32 = 0;
const EXIT_INVALID: i32 = 1;
const EXIT_ERROR: i32 = 2;

#[derive(Parser)]
#[command(name = "fieldrule")]
#[command(about = "Validate records against declarative field rules", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an input record against a rule file
    Check(CheckArgs),

    /// List built-in locales, or the templates of one locale
    Locales {
        /// Locale to print (e.g. en_US, zh-CN)
        locale: Option<String>,
    },
}

#[derive(clap::Args, Debug, Clone)]
struct CheckArgs {
    /// Rule file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(long)]
    rules: PathBuf,

    /// Input record file
    #[arg(long)]
    input: PathBuf,

    /// Custom message overrides file
    #[arg(long)]
    messages: Option<PathBuf>,

    /// Message locale
    #[arg(long, default_value = "en_US")]
    locale: String,

    /// Validate values as given, without coercion
    #[arg(long)]
    no_coerce: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

/// Rendered outcome of a command
#[derive(Debug)]
struct Outcome {
    exit_code: i32,
    output: String,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Check(args) => run_check(&args),
        Commands::Locales { locale } => list_locales(locale.as_deref()),
    };

    match result {
        Ok(outcome) => {
            print!("{}", outcome.output);
            if outcome.exit_code != EXIT_VALID {
                std::process::exit(outcome.exit_code);
            }
        }
        Err(err) => {
            eprintln!("error: {:#}", err);
            std::process::exit(EXIT_ERROR);
        }
    }
}

// ============================================================================
// check
// ============================================================================

fn run_check(args: &CheckArgs) -> Result<Outcome> {
    let rules_doc = load_document(&args.rules)?;
    let input_doc = load_document(&args.input)?;

    let rules = RuleSet::from_json(&rules_doc)
        .with_context(|| format!("Invalid rules in {}", args.rules.display()))?;
    let mut record = record_from_json(&input_doc)
        .with_context(|| format!("Invalid input in {}", args.input.display()))?;
    let messages = match &args.messages {
        Some(path) => Some(
            CustomMessages::from_json(&load_document(path)?)
                .with_context(|| format!("Invalid messages in {}", path.display()))?,
        ),
        None => None,
    };

    let config = ValidatorConfig::new()
        .locale_name(&args.locale)
        .coerce(!args.no_coerce);
    let validator = Validator::new(config);

    tracing::debug!(
        rules = %args.rules.display(),
        input = %args.input.display(),
        fields = rules.len(),
        locale = %validator.config().locale,
        coerce = validator.config().coerce,
        "checking record"
    );

    let errors = validator
        .validate_in_place(&mut record, &rules, messages.as_ref())
        .context("Validation aborted")?;

    let exit_code = if errors.is_some() {
        EXIT_INVALID
    } else {
        EXIT_VALID
    };
    Ok(Outcome {
        exit_code,
        output: render(errors.as_ref(), &record, args.format)?,
    })
}

/// Text lists one failure per line; JSON also echoes the record as
/// validated, coerced values included.
fn render(
    errors: Option<&ValidationErrors>,
    record: &Record,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(match errors {
            None => "valid\n".to_string(),
            Some(errors) => errors
                .iter()
                .map(|e| format!("{}\n", e))
                .collect::<String>(),
        }),
        OutputFormat::Json => {
            let report = json!({
                "valid": errors.is_none(),
                "errors": errors.map(|e| e.as_slice()).unwrap_or_default(),
                "record": record_to_json(record),
            });
            let mut text =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            text.push('\n');
            Ok(text)
        }
    }
}

/// Read a JSON document, or YAML when the extension is `.yaml`/`.yml`.
fn load_document(path: &Path) -> Result<Json> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse YAML in {}", path.display()))
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON in {}", path.display()))
    }
}

// ============================================================================
// locales
// ============================================================================

fn list_locales(name: Option<&str>) -> Result<Outcome> {
    let output = match name {
        None => Locale::ALL
            .iter()
            .map(|locale| {
                let table = LocaleTable::builtin(*locale);
                format!("{}\t{} messages\n", locale, table.len())
            })
            .collect::<String>(),
        Some(name) => {
            let locale = Locale::parse(name)
                .with_context(|| format!("Unknown locale: {}", name))?;
            let table = LocaleTable::builtin(locale);
            table
                .keys()
                .into_iter()
                .map(|key| format!("{}\t{}\n", key, table.get(key).unwrap_or_default()))
                .collect::<String>()
        }
    };

    Ok(Outcome {
        exit_code: EXIT_VALID,
        output,
    })
}

/// Initialize logging based on log level
fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok(); // Ignore error if already initialized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn args(rules: &NamedTempFile, input: &NamedTempFile) -> CheckArgs {
        CheckArgs {
            rules: rules.path().to_path_buf(),
            input: input.path().to_path_buf(),
            messages: None,
            locale: "en_US".to_string(),
            no_coerce: false,
            format: OutputFormat::Text,
        }
    }

    const RULES: &str = r#"{
        "name": { "type": "string", "min": 2, "max": 10 },
        "age": { "type": "integer", "min": 22, "max": 100, "required": false }
    }"#;

    #[test]
    fn test_cli_parses_check() {
        let cli = Cli::try_parse_from([
            "fieldrule", "check", "--rules", "r.json", "--input", "i.yaml", "--locale", "zh_CN",
            "--no-coerce", "--format", "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.rules, PathBuf::from("r.json"));
                assert_eq!(args.locale, "zh_CN");
                assert!(args.no_coerce);
                assert_eq!(args.format, OutputFormat::Json);
            }
            Commands::Locales { .. } => panic!("expected check"),
        }
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_check_valid() {
        let rules = temp_file(".json", RULES);
        let input = temp_file(".json", r#"{ "name": "sailor", "age": "30" }"#);

        let outcome = run_check(&args(&rules, &input)).unwrap();
        assert_eq!(outcome.exit_code, EXIT_VALID);
        assert_eq!(outcome.output, "valid\n");
    }

    #[test]
    fn test_check_invalid_with_messages() {
        let rules = temp_file(".json", RULES);
        let input = temp_file(".json", r#"{ "name": "lord of the sea", "age": 17 }"#);
        let messages = temp_file(
            ".json",
            r#"{
                "name": { "max": "name's length must be less than :max" },
                "age": { "min": "水手的年龄必须大于:min" }
            }"#,
        );

        let mut check = args(&rules, &input);
        check.messages = Some(messages.path().to_path_buf());

        let outcome = run_check(&check).unwrap();
        assert_eq!(outcome.exit_code, EXIT_INVALID);
        assert_eq!(
            outcome.output,
            "name: name's length must be less than 10\nage: 水手的年龄必须大于22\n"
        );
    }

    #[test]
    fn test_check_yaml_and_json_output() {
        let rules = temp_file(
            ".yaml",
            "value:\n  type: string\n  pattern: '/\\d+/'\n",
        );
        let input = temp_file(".yml", "value: hello\n");

        let mut check = args(&rules, &input);
        check.locale = "zh-CN".to_string();
        check.format = OutputFormat::Json;

        let outcome = run_check(&check).unwrap();
        assert_eq!(outcome.exit_code, EXIT_INVALID);

        let report: Json = serde_json::from_str(&outcome.output).unwrap();
        assert_eq!(report["valid"], json!(false));
        assert_eq!(
            report["errors"],
            json!([{ "field": "value", "message": "value必须匹配/\\d+/" }])
        );
        assert_eq!(report["record"], json!({ "value": "hello" }));
    }

    #[test]
    fn test_check_json_output_echoes_coerced_record() {
        let rules = temp_file(
            ".json",
            r#"{ "age": { "type": "integer" }, "score": { "type": "number" }, "ok": { "type": "boolean" } }"#,
        );
        let input = temp_file(".json", r#"{ "age": "42", "score": "   ", "ok": 1, "extra": "x" }"#);

        let mut check = args(&rules, &input);
        check.format = OutputFormat::Json;

        let outcome = run_check(&check).unwrap();
        assert_eq!(outcome.exit_code, EXIT_VALID);

        let report: Json = serde_json::from_str(&outcome.output).unwrap();
        assert_eq!(report["valid"], json!(true));
        assert_eq!(report["errors"], json!([]));
        assert_eq!(
            report["record"],
            json!({ "age": 42, "extra": "x", "ok": true, "score": 0 })
        );
    }

    #[test]
    fn test_check_no_coerce() {
        let rules = temp_file(".json", r#"{ "value": { "type": "integer" } }"#);
        let input = temp_file(".json", r#"{ "value": "123" }"#);

        let mut check = args(&rules, &input);
        assert_eq!(run_check(&check).unwrap().exit_code, EXIT_VALID);

        check.no_coerce = true;
        let outcome = run_check(&check).unwrap();
        assert_eq!(outcome.exit_code, EXIT_INVALID);
        assert_eq!(outcome.output, "value: value must be an integer\n");
    }

    #[test]
    fn test_check_configuration_errors() {
        let input = temp_file(".json", "{}");

        let unsupported = temp_file(".json", r#"{ "value": { "type": "uuid" } }"#);
        let err = run_check(&args(&unsupported, &input)).unwrap_err();
        assert!(format!("{:#}", err).contains("uuid is not supported"));

        let not_object = temp_file(".json", "[1, 2]");
        let err = run_check(&args(&not_object, &input)).unwrap_err();
        assert!(format!("{:#}", err).contains("rules must be an object"));

        let broken = temp_file(".json", "{ nope");
        let err = run_check(&args(&broken, &input)).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse JSON"));

        let mut missing = args(&broken, &input);
        missing.rules = PathBuf::from("/nonexistent/rules.json");
        let err = run_check(&missing).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read"));
    }

    #[test]
    fn test_list_locales() {
        let outcome = list_locales(None).unwrap();
        assert!(outcome.output.contains("en_US\t25 messages"));
        assert!(outcome.output.contains("zh_CN\t25 messages"));

        let outcome = list_locales(Some("zh-cn")).unwrap();
        assert!(outcome.output.contains("boolean.required\t:field是必须的"));

        assert!(list_locales(Some("fr_FR")).is_err());
    }
}
