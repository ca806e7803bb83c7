//! CSV export/import built on the `csv` crate.
//!
//! Files carry no header row. Field order follows
//! [`RecordKind::columns`](crate::model::record::RecordKind::columns).

use crate::model::record::RecordKind;
use crate::repo::tally_repo::{RepoError, TallyRepository};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

pub type InterchangeResult<T> = Result<T, InterchangeError>;

/// Which record kinds a CSV job touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindSelection {
    #[default]
    All,
    Only(RecordKind),
}

impl KindSelection {
    /// Selected kinds in fixed processing order.
    pub fn kinds(self) -> Vec<RecordKind> {
        match self {
            Self::All => RecordKind::ALL.to_vec(),
            Self::Only(kind) => vec![kind],
        }
    }
}

impl From<Option<RecordKind>> for KindSelection {
    fn from(value: Option<RecordKind>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

/// Target folder and kind selection for one export or import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    pub folder: PathBuf,
    pub selection: KindSelection,
}

impl CsvOptions {
    pub fn new(folder: impl Into<PathBuf>, selection: KindSelection) -> Self {
        Self {
            folder: folder.into(),
            selection,
        }
    }

    /// Location of the file for `kind` inside the target folder.
    pub fn file_path(&self, kind: RecordKind) -> PathBuf {
        self.folder.join(kind.csv_file_name())
    }
}

/// Rows moved per kind by one export or import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferSummary {
    pub counts: Vec<(RecordKind, usize)>,
}

impl TransferSummary {
    pub fn rows_for(&self, kind: RecordKind) -> Option<usize> {
        self.counts
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map(|(_, rows)| *rows)
    }

    pub fn total_rows(&self) -> usize {
        self.counts.iter().map(|(_, rows)| rows).sum()
    }
}

#[derive(Debug)]
pub enum InterchangeError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Csv {
        path: PathBuf,
        source: csv::Error,
    },
    FieldCount {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },
    Repo {
        kind: RecordKind,
        source: RepoError,
    },
}

impl Display for InterchangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Csv { path, source } => write!(f, "{}: {source}", path.display()),
            Self::FieldCount {
                path,
                line,
                expected,
                found,
            } => write!(
                f,
                "{}:{line}: invalid record: expected {expected} fields, found {found}",
                path.display()
            ),
            Self::Parse {
                path,
                line,
                message,
            } => write!(f, "{}:{line}: invalid record: {message}", path.display()),
            Self::Repo { kind, source } => write!(f, "{kind}: {source}"),
        }
    }
}

impl Error for InterchangeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Repo { source, .. } => Some(source),
            Self::FieldCount { .. } | Self::Parse { .. } => None,
        }
    }
}

/// Writes every row of `repo`'s kind to its CSV file in `options.folder`,
/// creating the folder when missing. Returns the number of rows written.
pub fn export_kind<R>(repo: &R, options: &CsvOptions) -> InterchangeResult<usize>
where
    R: TallyRepository,
    R::Row: Serialize,
{
    let kind = R::KIND;
    let rows = repo
        .list_rows()
        .map_err(|source| InterchangeError::Repo { kind, source })?;

    fs::create_dir_all(&options.folder).map_err(|source| InterchangeError::Io {
        path: options.folder.clone(),
        source,
    })?;

    let path = options.file_path(kind);
    write_rows(&path, &rows)?;

    info!(
        "event=csv_export module=interchange status=ok kind={} rows={} path={}",
        kind,
        rows.len(),
        path.display()
    );
    Ok(rows.len())
}

/// Reads `repo`'s CSV file in `options.folder` and inserts all of its rows in
/// one transaction. Returns the number of rows inserted.
pub fn import_kind<R>(repo: &R, options: &CsvOptions) -> InterchangeResult<usize>
where
    R: TallyRepository,
    R::Row: DeserializeOwned,
{
    let kind = R::KIND;
    let path = options.file_path(kind);

    let rows = match read_rows::<R::Row>(&path, kind.columns().len()) {
        Ok(rows) => rows,
        Err(err) => {
            warn!(
                "event=csv_import module=interchange status=error kind={} path={} error={}",
                kind,
                path.display(),
                err
            );
            return Err(err);
        }
    };

    let inserted = repo
        .insert_rows(&rows)
        .map_err(|source| InterchangeError::Repo { kind, source })?;

    info!(
        "event=csv_import module=interchange status=ok kind={} rows={} path={}",
        kind,
        inserted,
        path.display()
    );
    Ok(inserted)
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> InterchangeResult<()> {
    let file = File::create(path).map_err(|source| InterchangeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    for row in rows {
        writer
            .serialize(row)
            .map_err(|source| InterchangeError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
    }

    writer.flush().map_err(|source| InterchangeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_rows<T: DeserializeOwned>(path: &Path, expected: usize) -> InterchangeResult<Vec<T>> {
    let file = File::open(path).map_err(|source| InterchangeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| InterchangeError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map_or(0, |position| position.line());

        if record.len() != expected {
            return Err(InterchangeError::FieldCount {
                path: path.to_path_buf(),
                line,
                expected,
                found: record.len(),
            });
        }

        let row = record
            .deserialize::<T>(None)
            .map_err(|err| InterchangeError::Parse {
                path: path.to_path_buf(),
                line,
                message: err.to_string(),
            })?;
        rows.push(row);
    }

    Ok(rows)
}
