use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ecosystem_catalog::config::{AppConfig, CliConfig, FileConfig};
use ecosystem_catalog::{CatalogService, PartialRecord, Record, SqliteCatalogStore};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite catalog database file.
    #[clap(long, value_parser = parse_path, default_value = "catalog.db")]
    pub db: PathBuf,

    /// Path to a TOML config file, its values take precedence over flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Field delimiter of CSV uploads.
    #[clap(long, default_value_t = ',')]
    pub delimiter: char,

    /// tracing filter directive, defaults to LOG_LEVEL or "info".
    #[clap(long)]
    pub logging_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Imports every row of a CSV file, or nothing if any row is invalid.
    Import {
        #[clap(value_parser = parse_path)]
        csv: PathBuf,
    },

    /// Shows all records.
    List,

    /// Shows the record with the given code.
    Get { code: String },

    /// Creates a record from a JSON file.
    Create {
        #[clap(value_parser = parse_path)]
        json: PathBuf,
    },

    /// Replaces every field of a record (except its code) with a JSON file's.
    Update {
        code: String,
        #[clap(value_parser = parse_path)]
        json: PathBuf,
    },

    /// Applies the fields present in a JSON file to a record.
    Patch {
        code: String,
        #[clap(value_parser = parse_path)]
        json: PathBuf,
    },

    /// Deletes the record with the given code.
    Delete { code: String },
}

fn init_logging(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("Invalid logging level {:?}", directive))?,
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .with_env_var("LOG_LEVEL")
            .from_env_lossy(),
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {:?}", path))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let cli_config = CliConfig {
        db_path: cli_args.db.clone(),
        logging_level: cli_args.logging_level.clone(),
        delimiter: cli_args.delimiter,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    init_logging(config.logging_level.as_deref())?;

    info!("Opening SQLite catalog database at {:?}...", config.db_path);
    let store = Arc::new(SqliteCatalogStore::new(&config.db_path)?);
    let service = CatalogService::new(store, config.csv.clone());

    match cli_args.command {
        Command::Import { csv } => {
            let raw = std::fs::read(&csv).with_context(|| format!("Failed to read {:?}", csv))?;
            let records = service.import_csv(&raw)?;
            print_json(&records)?;
        }
        Command::List => print_json(&service.list()?)?,
        Command::Get { code } => print_json(&service.get(&code)?)?,
        Command::Create { json } => {
            let record: Record = read_json(&json)?;
            print_json(&service.create(record)?)?;
        }
        Command::Update { code, json } => {
            let record: Record = read_json(&json)?;
            print_json(&service.full_update(&code, record)?)?;
        }
        Command::Patch { code, json } => {
            let patch: PartialRecord = read_json(&json)?;
            print_json(&service.partial_update(&code, patch)?)?;
        }
        Command::Delete { code } => {
            service.delete(&code)?;
            info!("Deleted {}", code);
        }
    }
    Ok(())
}
