//! Connection bootstrap for the tally database.
//!
//! File databases are switched to write-ahead logging and given a busy
//! timeout; every returned connection has all migrations applied.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{debug, error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if absent) a tally database file and applies all pending
/// migrations.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    info!(
        "event=db_open module=db status=start mode=file path={}",
        path.display()
    );

    open_with("file", || {
        Connection::open(path).map_err(|source| DbError::Open {
            path: path.to_path_buf(),
            source,
        })
    })
}

/// Opens a private in-memory database with the full schema.
///
/// SQLite keeps `journal_mode=memory` for these connections.
pub fn open_db_in_memory() -> DbResult<Connection> {
    info!("event=db_open module=db status=start mode=memory");

    open_with("memory", || Connection::open_in_memory().map_err(DbError::from))
}

fn open_with(
    mode: &str,
    connect: impl FnOnce() -> DbResult<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();

    let result = connect().and_then(|mut conn| {
        let journal_mode = configure(&mut conn)?;
        Ok((conn, journal_mode))
    });

    match result {
        Ok((conn, journal_mode)) => {
            info!(
                "event=db_open module=db status=ok mode={mode} journal_mode={journal_mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn configure(conn: &mut Connection) -> DbResult<String> {
    let journal_mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    debug!("event=db_pragma module=db journal_mode={journal_mode}");
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(journal_mode)
}
