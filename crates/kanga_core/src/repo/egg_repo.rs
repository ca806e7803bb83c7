//! Exeggutor repository backed by the `exeggutor` table.

use crate::model::egg::{EggOutcome, EggRow, EggStats};
use crate::model::record::RecordKind;
use crate::repo::tally_repo::{required_timestamp, RepoError, RepoResult, TallyRepository};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};

// `mattered` may hold 'true'/'false' text from older imports; NULL counts as
// mattered, matching the column default.
const EGG_STATS_SQL: &str = "SELECT
    COUNT(*),
    IFNULL(SUM(CASE WHEN heads = 1 THEN 1 ELSE 0 END), 0),
    IFNULL(SUM(CASE WHEN heads = 0 THEN 1 ELSE 0 END), 0),
    IFNULL(SUM(CASE WHEN IFNULL(mattered, 1) IN (0, 'false') THEN 1 ELSE 0 END), 0),
    IFNULL(SUM(CASE WHEN heads = 1 AND IFNULL(mattered, 1) IN (1, 'true') THEN 1 ELSE 0 END), 0)
FROM exeggutor;";

const EGG_LIST_SQL: &str = "SELECT heads, mattered, CAST(created_at AS TEXT) AS created_at
FROM exeggutor ORDER BY id ASC;";

const EGG_INSERT_SQL: &str =
    "INSERT INTO exeggutor (heads, mattered, created_at) VALUES (?1, ?2, ?3);";

pub struct SqliteEggRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEggRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TallyRepository for SqliteEggRepository<'_> {
    type Outcome = EggOutcome;
    type Row = EggRow;
    type Stats = EggStats;

    const KIND: RecordKind = RecordKind::Egg;

    fn connection(&self) -> &Connection {
        self.conn
    }

    fn record(&self, outcome: EggOutcome) -> RepoResult<i64> {
        let (heads, mattered) = outcome.columns();
        self.conn.execute(
            "INSERT INTO exeggutor (heads, mattered, created_at)
             VALUES (?1, ?2, CURRENT_TIMESTAMP);",
            params![heads, mattered],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(
            "event=tally_record module=repo kind=egg outcome={} id={}",
            outcome.code(),
            id
        );
        Ok(id)
    }

    fn stats(&self) -> RepoResult<EggStats> {
        let stats = self.conn.query_row(EGG_STATS_SQL, [], |row| {
            Ok(EggStats {
                total_entries: row.get(0)?,
                total_heads: row.get(1)?,
                total_tails: row.get(2)?,
                total_not_mattered: row.get(3)?,
                heads_mattered: row.get(4)?,
            })
        })?;
        Ok(stats)
    }

    fn list_rows(&self) -> RepoResult<Vec<EggRow>> {
        let mut stmt = self.conn.prepare(EGG_LIST_SQL)?;
        let mut rows = stmt.query([])?;
        let mut eggs = Vec::new();

        while let Some(row) = rows.next()? {
            let egg = EggRow {
                heads: row.get("heads")?,
                mattered: parse_mattered(row.get("mattered")?)?,
                created_at: required_timestamp(Self::KIND, row.get("created_at")?)?,
            };
            egg.validate()?;
            eggs.push(egg);
        }

        Ok(eggs)
    }

    fn insert_rows(&self, rows: &[EggRow]) -> RepoResult<usize> {
        for row in rows {
            row.validate()?;
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        {
            let mut stmt = tx.prepare(EGG_INSERT_SQL)?;
            for row in rows {
                stmt.execute(params![row.heads, row.mattered, row.created_at])?;
            }
        }
        tx.commit()?;

        Ok(rows.len())
    }
}

fn parse_mattered(value: Value) -> RepoResult<bool> {
    match value {
        Value::Null | Value::Integer(1) => Ok(true),
        Value::Integer(0) => Ok(false),
        Value::Text(text) if text.eq_ignore_ascii_case("true") => Ok(true),
        Value::Text(text) if text.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(RepoError::InvalidData(format!(
            "invalid mattered value `{other:?}` in exeggutor.mattered"
        ))),
    }
}
