//! Schema migrations keyed on `PRAGMA user_version`.
//!
//! Scripts are embedded at compile time and run in version order inside a
//! single transaction. They use `IF NOT EXISTS`, so files created before the
//! version was tracked (`user_version = 0` with tables present) upgrade in
//! place.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

/// (version, script) pairs; versions must strictly increase.
const MIGRATIONS: &[(u32, &str)] = &[
    (1, include_str!("0001_init.sql")),
    (2, include_str!("0002_misty.sql")),
];

/// Latest schema version this build can read and write.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(version, _)| *version)
}

/// Brings `conn` up to [`latest_version`].
///
/// Refuses files stamped with a newer version than this build knows.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let db_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest_supported = latest_version();

    if db_version > latest_supported {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        });
    }

    let pending: Vec<_> = MIGRATIONS
        .iter()
        .filter(|(version, _)| *version > db_version)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, script) in pending {
        tx.execute_batch(script)?;
        tx.pragma_update(None, "user_version", version)?;
        debug!("event=db_migrate module=db status=applied version={version}");
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from={db_version} to={latest_supported}");
    Ok(())
}
