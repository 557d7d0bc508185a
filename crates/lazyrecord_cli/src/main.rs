//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `lazyrecord_core` linkage with deterministic output.
//! - Filter one JSON record through a JSON attribute schema:
//!   `lazyrecord <schema.json> <record.json>`.

use clap::Parser;
use lazyrecord_core::{
    core_version, default_log_level, init_logging, parse_attribute_schema, ping, AttributeSet,
    Attributes, LoggingError, SchemaError, StoreToken,
};
use log::info;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "lazyrecord")]
#[command(version, about = "Filter a JSON record through an attribute schema", long_about = None)]
struct Cli {
    /// Attribute schema (`{"record": ..., "attributes": [...]}`)
    #[arg(requires = "record")]
    schema: Option<PathBuf>,

    /// JSON object to construct a record from
    #[arg(requires = "schema")]
    record: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "LAZYRECORD_LOG_DIR")]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "LAZYRECORD_LOG_LEVEL")]
    log_level: Option<String>,
}

/// CLI failures, printed to stderr before exiting non-zero.
#[derive(Debug)]
enum CliError {
    Logging(LoggingError),
    Read { path: PathBuf, message: String },
    Schema(SchemaError),
    MalformedRecord(String),
    RecordNotObject,
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "{err}"),
            Self::Read { path, message } => {
                write!(f, "failed to read `{}`: {message}", path.display())
            }
            Self::Schema(err) => write!(f, "{err}"),
            Self::MalformedRecord(message) => write!(f, "record is malformed: {message}"),
            Self::RecordNotObject => write!(f, "record must be a JSON object"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::Schema(err) => Some(err),
            Self::Read { .. } | Self::MalformedRecord(_) | Self::RecordNotObject => None,
        }
    }
}

/// Record type whose attributes come from the schema file.
struct CliRecord {
    attributes: AttributeSet,
}

impl Attributes for CliRecord {
    fn from_attribute_set(attributes: AttributeSet, _: StoreToken) -> Self {
        Self { attributes }
    }

    fn attribute_set(&self) -> &AttributeSet {
        &self.attributes
    }

    fn attribute_set_mut(&mut self, _: StoreToken) -> &mut AttributeSet {
        &mut self.attributes
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lazyrecord: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<(), CliError> {
    init_cli_logging(cli)?;

    println!("lazyrecord_core ping={}", ping());
    println!("lazyrecord_core version={}", core_version());

    if let (Some(schema), Some(record)) = (&cli.schema, &cli.record) {
        println!("{}", run(schema, record)?);
    }
    Ok(())
}

fn init_cli_logging(cli: &Cli) -> Result<(), CliError> {
    let Some(log_dir) = cli.log_dir.as_deref() else {
        return Ok(());
    };
    let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
    init_logging(level, log_dir).map_err(CliError::Logging)
}

fn run(schema_path: &Path, record_path: &Path) -> Result<String, CliError> {
    let schema_json = read_file(schema_path)?;
    let record_json = read_file(record_path)?;
    let (attributes, dirty) = filter_record(&schema_json, &record_json)?;
    Ok(format!("attributes={attributes}\ndirty={dirty}"))
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|err| CliError::Read {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Declares the schema on `CliRecord` and constructs one record from the
/// JSON object, dropping undeclared keys.
fn filter_record(schema_json: &str, record_json: &str) -> Result<(Value, bool), CliError> {
    let schema = parse_attribute_schema(schema_json).map_err(CliError::Schema)?;
    schema.apply::<CliRecord>().map_err(CliError::Schema)?;

    let input: Value = serde_json::from_str(record_json)
        .map_err(|err| CliError::MalformedRecord(err.to_string()))?;
    let Value::Object(fields) = input else {
        return Err(CliError::RecordNotObject);
    };
    let input_len = fields.len();

    let record = CliRecord::with_attributes(fields);
    info!(
        "event=cli_filter module=cli status=ok record={} input={} kept={}",
        schema.record,
        input_len,
        record.attributes().len()
    );
    Ok((record.as_json(), record.is_dirty()))
}
