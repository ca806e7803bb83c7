//! Flip repository backed by the `flips` table.

use crate::model::flip::{FlipOutcome, FlipRow, FlipStats};
use crate::model::record::RecordKind;
use crate::repo::tally_repo::{required_timestamp, RepoResult, TallyRepository};
use log::debug;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};

const FLIP_STATS_SQL: &str = "SELECT
    COUNT(*),
    IFNULL(SUM(CASE WHEN heads1 = 1 AND heads2 = 1 THEN 1 ELSE 0 END), 0),
    IFNULL(SUM(CASE WHEN heads1 = 0 AND heads2 = 0 THEN 1 ELSE 0 END), 0),
    IFNULL(SUM(heads1 + heads2), 0),
    IFNULL(SUM(2 - heads1 - heads2), 0)
FROM flips;";

// `created_at` has NUMERIC affinity; imported digit-only stamps come back as
// integers unless cast.
const FLIP_LIST_SQL: &str = "SELECT heads1, heads2, CAST(created_at AS TEXT) AS created_at
FROM flips ORDER BY id ASC;";

const FLIP_INSERT_SQL: &str =
    "INSERT INTO flips (heads1, heads2, created_at) VALUES (?1, ?2, ?3);";

pub struct SqliteFlipRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFlipRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TallyRepository for SqliteFlipRepository<'_> {
    type Outcome = FlipOutcome;
    type Row = FlipRow;
    type Stats = FlipStats;

    const KIND: RecordKind = RecordKind::Flip;

    fn connection(&self) -> &Connection {
        self.conn
    }

    fn record(&self, outcome: FlipOutcome) -> RepoResult<i64> {
        let (heads1, heads2) = outcome.faces();
        self.conn.execute(
            "INSERT INTO flips (heads1, heads2, created_at)
             VALUES (?1, ?2, CURRENT_TIMESTAMP);",
            params![heads1, heads2],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(
            "event=tally_record module=repo kind=kanga outcome={} id={}",
            outcome.code(),
            id
        );
        Ok(id)
    }

    fn stats(&self) -> RepoResult<FlipStats> {
        let stats = self.conn.query_row(FLIP_STATS_SQL, [], |row| {
            let rows: i64 = row.get(0)?;
            Ok(FlipStats {
                total: rows * 2,
                double_heads: row.get(1)?,
                double_tails: row.get(2)?,
                total_heads: row.get(3)?,
                total_tails: row.get(4)?,
            })
        })?;
        Ok(stats)
    }

    fn list_rows(&self) -> RepoResult<Vec<FlipRow>> {
        let mut stmt = self.conn.prepare(FLIP_LIST_SQL)?;
        let mut rows = stmt.query([])?;
        let mut flips = Vec::new();

        while let Some(row) = rows.next()? {
            let flip = FlipRow {
                heads1: row.get("heads1")?,
                heads2: row.get("heads2")?,
                created_at: required_timestamp(Self::KIND, row.get("created_at")?)?,
            };
            flip.validate()?;
            flips.push(flip);
        }

        Ok(flips)
    }

    fn insert_rows(&self, rows: &[FlipRow]) -> RepoResult<usize> {
        for row in rows {
            row.validate()?;
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        {
            let mut stmt = tx.prepare(FLIP_INSERT_SQL)?;
            for row in rows {
                stmt.execute(params![row.heads1, row.heads2, row.created_at])?;
            }
        }
        tx.commit()?;

        Ok(rows.len())
    }
}
