mod file_config;

pub use file_config::{CsvConfig, FileConfig};

use crate::ingestion::CsvOptions;
use anyhow::{bail, Result};
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub logging_level: Option<String>,
    pub delimiter: char,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            db_path: PathBuf::from("catalog.db"),
            logging_level: None,
            delimiter: ',',
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub logging_level: Option<String>,
    pub csv: CsvOptions,
}

fn parse_delimiter(s: &str) -> Result<u8> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => bail!("CSV delimiter must be a single ASCII character, got {:?}", s),
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.db_path.clone());

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }

        let logging_level = file.logging_level.or_else(|| cli.logging_level.clone());

        let delimiter = match file.csv.unwrap_or_default().delimiter {
            Some(delimiter) => parse_delimiter(&delimiter)?,
            None => parse_delimiter(&cli.delimiter.to_string())?,
        };

        Ok(Self {
            db_path,
            logging_level,
            csv: CsvOptions { delimiter },
        })
    }
}
