//! Versioned bootstrap of the document collection schema.
//!
//! Each step is a SQL batch tagged with the `PRAGMA user_version` it brings
//! the file to. Pending steps run inside one transaction, so a failed
//! bootstrap leaves the file at its previous version.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct BootstrapStep {
    version: u32,
    sql: &'static str,
}

/// Ordered by `version`, strictly increasing.
const BOOTSTRAP_STEPS: &[BootstrapStep] = &[BootstrapStep {
    version: 1,
    sql: include_str!("0001_documents.sql"),
}];

/// Highest bootstrap version this build can produce.
pub fn latest_version() -> u32 {
    BOOTSTRAP_STEPS.last().map_or(0, |step| step.version)
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - [`DbError::UnsupportedSchemaVersion`] when the file is ahead of this build.
/// - [`DbError::Sqlite`] when a step or the version bump fails.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let on_disk = read_user_version(conn)?;
    let target = latest_version();

    if on_disk > target {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: on_disk,
            latest_supported: target,
        });
    }
    if on_disk == target {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in BOOTSTRAP_STEPS.iter().filter(|step| step.version > on_disk) {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;

    info!(
        "event=db_bootstrap module=db status=ok from_version={} to_version={}",
        on_disk, target
    );
    Ok(())
}

fn read_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
