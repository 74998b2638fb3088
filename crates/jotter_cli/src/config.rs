//! Command-line surface and runtime configuration resolution.
//!
//! Every global option can also come from a `JOTTER_*` environment variable.

use crate::commands::Command;
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use jotter_core::db::database_file_name;
use jotter_core::{default_log_level, Author};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "jotter";

/// jotter - personal notes in a local document store
#[derive(Debug, Parser)]
#[command(
    name = "jotter",
    version = jotter_core::core_version(),
    about = "Personal notes in a local document store"
)]
pub struct Cli {
    /// Database file; defaults to the platform data directory
    #[arg(long, global = true, env = "JOTTER_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Author stamped on new notes; defaults to the OS user
    #[arg(long, global = true, env = "JOTTER_AUTHOR", value_name = "NAME")]
    pub author: Option<String>,

    /// Directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "JOTTER_LOG_DIR", value_name = "PATH")]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true, env = "JOTTER_LOG_LEVEL", value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub author: Author,
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let db_path = match &cli.db {
            Some(path) => path.clone(),
            None => default_db_path()?,
        };
        let author = match &cli.author {
            Some(name) => Author::new(name).context("invalid --author")?,
            None => Author::from_os_user(),
        };
        let log_dir = match &cli.log_dir {
            Some(dir) if dir.is_relative() => Some(
                std::env::current_dir()
                    .context("failed to resolve current directory for --log-dir")?
                    .join(dir),
            ),
            other => other.clone(),
        };

        Ok(Self {
            db_path,
            author,
            log_dir,
            log_level: cli
                .log_level
                .clone()
                .unwrap_or_else(|| default_log_level().to_string()),
        })
    }
}

/// Returns `{data_dir}/jotter/jotter.sqlite3`.
fn default_db_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| anyhow!("failed to determine data directory"))?;
    Ok(data_dir.join(APP_DIR_NAME).join(database_file_name()))
}
