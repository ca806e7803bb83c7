//! Shared tally repository contract and error types.
//!
//! # Responsibility
//! - Describe the operations every record kind supports: record, aggregate,
//!   list, bulk insert, undo-last and clear.
//! - Provide the kind-agnostic SQL (count, undo, clear) once.
//!
//! # Invariants
//! - `undo_last` removes at most one row: the one with the highest `id`.
//! - `undo_last` and `clear` on an empty table succeed with 0 rows affected.

use crate::db::DbError;
use crate::model::record::{RecordKind, RecordValidationError};
use log::debug;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for tally persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted tally data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Append-only tally store for one record kind.
pub trait TallyRepository {
    /// What a single command logs (a flip result, an egg result, a count).
    type Outcome;
    /// Full persisted row, as exported to and imported from CSV.
    type Row;
    /// Aggregate statistics for the kind.
    type Stats;

    const KIND: RecordKind;

    fn connection(&self) -> &Connection;

    /// Appends one row stamped with the current time; returns its `id`.
    fn record(&self, outcome: Self::Outcome) -> RepoResult<i64>;

    /// Aggregates all rows. Never fails on an empty table.
    fn stats(&self) -> RepoResult<Self::Stats>;

    /// Returns every row in creation order.
    fn list_rows(&self) -> RepoResult<Vec<Self::Row>>;

    /// Inserts all rows in one transaction: either every row commits or none.
    fn insert_rows(&self, rows: &[Self::Row]) -> RepoResult<usize>;

    fn count(&self) -> RepoResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {};", Self::KIND.table_name());
        let count = self.connection().query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }

    /// Deletes the most recently created row, if any.
    fn undo_last(&self) -> RepoResult<usize> {
        let table = Self::KIND.table_name();
        let changed = self.connection().execute(
            &format!("DELETE FROM {table} WHERE id = (SELECT MAX(id) FROM {table});"),
            [],
        )?;
        debug!(
            "event=tally_undo module=repo kind={} rows={}",
            Self::KIND,
            changed
        );
        Ok(changed)
    }

    /// Deletes every row of this kind.
    fn clear(&self) -> RepoResult<usize> {
        let changed = self
            .connection()
            .execute(&format!("DELETE FROM {};", Self::KIND.table_name()), [])?;
        debug!(
            "event=tally_clear module=repo kind={} rows={}",
            Self::KIND,
            changed
        );
        Ok(changed)
    }
}

pub(crate) fn required_timestamp(kind: RecordKind, value: Option<String>) -> RepoResult<String> {
    value.ok_or_else(|| {
        RepoError::InvalidData(format!(
            "missing created_at in {}.created_at",
            kind.table_name()
        ))
    })
}
