//! Misty repository backed by the `misty` table.

use crate::model::misty::{MistyRow, MistyStats};
use crate::model::record::RecordKind;
use crate::repo::tally_repo::{required_timestamp, RepoResult, TallyRepository};
use log::debug;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};

pub struct SqliteMistyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMistyRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TallyRepository for SqliteMistyRepository<'_> {
    /// Number of heads in one session.
    type Outcome = u32;
    type Row = MistyRow;
    type Stats = MistyStats;

    const KIND: RecordKind = RecordKind::Misty;

    fn connection(&self) -> &Connection {
        self.conn
    }

    fn record(&self, heads: u32) -> RepoResult<i64> {
        self.conn.execute(
            "INSERT INTO misty (heads, created_at) VALUES (?1, CURRENT_TIMESTAMP);",
            params![heads],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("event=tally_record module=repo kind=misty heads={heads} id={id}");
        Ok(id)
    }

    fn stats(&self) -> RepoResult<MistyStats> {
        let stats = self.conn.query_row(
            "SELECT COUNT(*), IFNULL(SUM(heads), 0) FROM misty;",
            [],
            |row| {
                Ok(MistyStats {
                    total_entries: row.get(0)?,
                    total_heads: row.get(1)?,
                })
            },
        )?;
        Ok(stats)
    }

    fn list_rows(&self) -> RepoResult<Vec<MistyRow>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT heads, CAST(created_at AS TEXT) AS created_at
                 FROM misty ORDER BY id ASC;",
            )?;
        let mut rows = stmt.query([])?;
        let mut sessions = Vec::new();

        while let Some(row) = rows.next()? {
            let session = MistyRow {
                heads: row.get("heads")?,
                created_at: required_timestamp(Self::KIND, row.get("created_at")?)?,
            };
            session.validate()?;
            sessions.push(session);
        }

        Ok(sessions)
    }

    fn insert_rows(&self, rows: &[MistyRow]) -> RepoResult<usize> {
        for row in rows {
            row.validate()?;
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        {
            let mut stmt = tx.prepare("INSERT INTO misty (heads, created_at) VALUES (?1, ?2);")?;
            for row in rows {
                stmt.execute(params![row.heads, row.created_at])?;
            }
        }
        tx.commit()?;

        Ok(rows.len())
    }
}
