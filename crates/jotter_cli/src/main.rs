//! `jotter` binary entry point.
//!
//! # Responsibility
//! - Resolve configuration, open the database handle once, and dispatch.
//! - Surface every store error as a non-zero exit with its message chain.

mod commands;
mod config;
mod picker;

use anyhow::{Context, Result};
use clap::Parser;
use config::{AppConfig, Cli};
use jotter_core::db::open_db;
use jotter_core::{init_logging, SqliteNoteStore, StoreError};
use std::io;
use std::path::Path;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::from_cli(&cli)?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }

    ensure_parent_dir(&config.db_path)?;
    let conn = open_db(&config.db_path).map_err(StoreError::Connection)?;
    let store = SqliteNoteStore::try_new(&conn, config.author.clone())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Some(command) => commands::run_command(command, &store, &config.author, &mut out),
        None => picker::run_picker(&store, io::stdin().lock(), &mut out),
    }
}

fn ensure_parent_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create database directory: {}", parent.display())
        })?;
    }
    Ok(())
}
