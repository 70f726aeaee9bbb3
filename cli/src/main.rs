use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use param_schema_core::{ParameterSpec, SpecSource, Value, extract, format_scalar};
use param_schema_form::render_form;
use param_schema_model::{ModelError, Payload, build_model};
use param_schema_widgets::{InputState, render};

/// CLI output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Table,
}

#[derive(Debug, Parser)]
#[command(name = "param-schema")]
#[command(about = "Derive validation models, input widgets, and form fields from parameter specifications")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List a specification's parameters with types, defaults, and required flags.
    Inspect(InspectArgs),
    /// Derive the validation model for a specification.
    Schema(SchemaArgs),
    /// Emit a JSON Schema document for a specification.
    JsonSchema(JsonSchemaArgs),
    /// Plan interactive input controls and collect values from widget state.
    Widgets(WidgetsArgs),
    /// Plan server-side form fields for a specification.
    Form(FormArgs),
    /// Validate a payload document against a specification.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct InspectArgs {
    /// Specification document (JSON or YAML).
    spec: PathBuf,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct SchemaArgs {
    /// Specification document (JSON or YAML).
    spec: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct JsonSchemaArgs {
    /// Specification document (JSON or YAML).
    spec: PathBuf,
}

#[derive(Debug, Args)]
struct WidgetsArgs {
    /// Specification document (JSON or YAML).
    spec: PathBuf,
    /// Widget state document to collect values from (JSON or YAML).
    #[arg(long)]
    state: Option<PathBuf>,
    /// Log a warning for each still-missing required parameter.
    #[arg(long)]
    warn_missing: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct FormArgs {
    /// Specification document (JSON or YAML).
    spec: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Specification document (JSON or YAML).
    spec: PathBuf,
    /// Payload document to validate (JSON or YAML).
    #[arg(long)]
    payload: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Inspect(args) => run_inspect(args),
        Command::Schema(args) => run_schema(args),
        Command::JsonSchema(args) => run_json_schema(args),
        Command::Widgets(args) => run_widgets(args),
        Command::Form(args) => run_form(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

fn run_inspect(args: InspectArgs) -> Result<(), String> {
    let source = load_spec(&args.spec)?;
    let params = extract(&source).map_err(|e| e.to_string())?;

    match args.format {
        CliOutputFormat::Table => {
            print_param_table(&source, &params);
            Ok(())
        }
        other => emit(&params, other),
    }
}

fn run_schema(args: SchemaArgs) -> Result<(), String> {
    let source = load_spec(&args.spec)?;
    let params = extract(&source).map_err(|e| e.to_string())?;
    let model = build_model(source.name(), &params);
    emit(&model, args.format)
}

fn run_json_schema(args: JsonSchemaArgs) -> Result<(), String> {
    let source = load_spec(&args.spec)?;
    let params = extract(&source).map_err(|e| e.to_string())?;
    let model = build_model(source.name(), &params);

    let schema = serde_json::to_string_pretty(&model.json_schema())
        .map_err(|err| format!("Failed to serialize JSON Schema: {err}"))?;
    println!("{schema}");
    Ok(())
}

fn run_widgets(args: WidgetsArgs) -> Result<(), String> {
    let source = load_spec(&args.spec)?;
    let params = extract(&source).map_err(|e| e.to_string())?;

    let state: InputState = match &args.state {
        Some(path) => load_document(path)?,
        None => InputState::new(),
    };

    let rendered = render(&params, &state, args.warn_missing).map_err(|e| e.to_string())?;
    emit(&rendered, args.format)
}

fn run_form(args: FormArgs) -> Result<(), String> {
    let source = load_spec(&args.spec)?;
    let params = extract(&source).map_err(|e| e.to_string())?;
    let plan = render_form(source.name(), &params).map_err(|e| e.to_string())?;
    emit(&plan, args.format)
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let source = load_spec(&args.spec)?;
    let params = extract(&source).map_err(|e| e.to_string())?;
    let model = build_model(source.name(), &params);

    let payload: Payload = load_document(&args.payload)?;

    match model.instantiate(&payload) {
        Ok(instance) => {
            let document = serde_json::to_string_pretty(&instance.to_json())
                .map_err(|err| format!("Failed to serialize instance: {err}"))?;
            println!("{document}");
            Ok(())
        }
        Err(ModelError::Rejected(errors)) => {
            for error in &errors {
                eprintln!("  - {error}");
            }
            Err(format!(
                "payload rejected with {} validation error(s)",
                errors.len()
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// Document IO
// ---------------------------------------------------------------------------

fn load_spec(path: &Path) -> Result<SpecSource, String> {
    load_document(path)
}

/// Reads a JSON or YAML document, picking the parser by file extension.
/// Anything that is not `.json` goes through the YAML parser.
fn load_document<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;

    let json = matches!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    if json {
        serde_json::from_str(&raw)
            .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))
    } else {
        serde_yaml::from_str(&raw)
            .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn emit<T: serde::Serialize>(value: &T, format: CliOutputFormat) -> Result<(), String> {
    match format {
        CliOutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)
                .map_err(|err| format!("Failed to serialize output: {err}"))?;
            println!("{json}");
        }
        CliOutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(value)
                .map_err(|err| format!("Failed to serialize output: {err}"))?;
            print!("{yaml}");
        }
        CliOutputFormat::Table => {
            return Err("table output is only available for 'inspect'".to_string());
        }
    }
    Ok(())
}

fn print_param_table(source: &SpecSource, params: &[ParameterSpec]) {
    println!(
        "{} ({}, {} parameter(s))",
        source.name(),
        source.kind(),
        params.len()
    );
    for param in params {
        let marker = match &param.default {
            Some(value) => format!("default: {}", display_default(value)),
            None => "required".to_string(),
        };
        println!(
            "  {:<20} {:<32} {marker}",
            param.name,
            param.descriptor.to_string()
        );
    }
}

fn display_default(value: &Value) -> String {
    if value.is_null() {
        "null".to_string()
    } else {
        format_scalar(value)
    }
}
