//! Tally use-case service.
//!
//! # Responsibility
//! - Own the single database connection for one process.
//! - Expose record/aggregate/undo/reset/CSV operations per record kind.
//!
//! # Invariants
//! - `reset` clears every kind in one transaction.
//! - CSV jobs process selected kinds in fixed order and stop at the first
//!   failing kind.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::interchange::csv_file::{
    export_kind, import_kind, CsvOptions, InterchangeResult, TransferSummary,
};
use crate::model::egg::{EggOutcome, EggStats};
use crate::model::flip::{FlipOutcome, FlipStats};
use crate::model::misty::MistyStats;
use crate::model::record::RecordKind;
use crate::repo::egg_repo::SqliteEggRepository;
use crate::repo::flip_repo::SqliteFlipRepository;
use crate::repo::misty_repo::SqliteMistyRepository;
use crate::repo::tally_repo::{RepoResult, TallyRepository};
use log::info;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;

/// Local tally store: one SQLite connection plus per-kind repositories.
pub struct TallyService {
    conn: Connection,
}

impl TallyService {
    /// Opens (creating if absent) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a throwaway in-memory store.
    pub fn in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already bootstrapped connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn flips(&self) -> SqliteFlipRepository<'_> {
        SqliteFlipRepository::new(&self.conn)
    }

    pub fn eggs(&self) -> SqliteEggRepository<'_> {
        SqliteEggRepository::new(&self.conn)
    }

    pub fn misty(&self) -> SqliteMistyRepository<'_> {
        SqliteMistyRepository::new(&self.conn)
    }

    pub fn record_flip(&self, outcome: FlipOutcome) -> RepoResult<i64> {
        self.flips().record(outcome)
    }

    pub fn record_egg(&self, outcome: EggOutcome) -> RepoResult<i64> {
        self.eggs().record(outcome)
    }

    pub fn record_misty(&self, heads: u32) -> RepoResult<i64> {
        self.misty().record(heads)
    }

    pub fn flip_stats(&self) -> RepoResult<FlipStats> {
        self.flips().stats()
    }

    pub fn egg_stats(&self) -> RepoResult<EggStats> {
        self.eggs().stats()
    }

    pub fn misty_stats(&self) -> RepoResult<MistyStats> {
        self.misty().stats()
    }

    /// Removes the latest row of `kind`; 0 when the table is empty.
    pub fn undo_last(&self, kind: RecordKind) -> RepoResult<usize> {
        match kind {
            RecordKind::Flip => self.flips().undo_last(),
            RecordKind::Egg => self.eggs().undo_last(),
            RecordKind::Misty => self.misty().undo_last(),
        }
    }

    /// Deletes every row of every kind. Irreversible.
    pub fn reset(&self) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;
        let removed = SqliteFlipRepository::new(&tx).clear()?
            + SqliteEggRepository::new(&tx).clear()?
            + SqliteMistyRepository::new(&tx).clear()?;
        tx.commit()?;

        info!("event=tally_reset module=service status=ok rows={removed}");
        Ok(removed)
    }

    /// Writes one CSV file per selected kind into `options.folder`.
    pub fn export_csv(&self, options: &CsvOptions) -> InterchangeResult<TransferSummary> {
        let mut summary = TransferSummary::default();
        for kind in options.selection.kinds() {
            let rows = match kind {
                RecordKind::Flip => export_kind(&self.flips(), options)?,
                RecordKind::Egg => export_kind(&self.eggs(), options)?,
                RecordKind::Misty => export_kind(&self.misty(), options)?,
            };
            summary.counts.push((kind, rows));
        }
        Ok(summary)
    }

    /// Loads one CSV file per selected kind from `options.folder`.
    pub fn import_csv(&self, options: &CsvOptions) -> InterchangeResult<TransferSummary> {
        let mut summary = TransferSummary::default();
        for kind in options.selection.kinds() {
            let rows = match kind {
                RecordKind::Flip => import_kind(&self.flips(), options)?,
                RecordKind::Egg => import_kind(&self.eggs(), options)?,
                RecordKind::Misty => import_kind(&self.misty(), options)?,
            };
            summary.counts.push((kind, rows));
        }
        Ok(summary)
    }
}
