//! Core tally logic for kanga.
//! Storage, aggregation and CSV interchange for flips, exeggutor entries and
//! misty sessions live here; the CLI only formats what this crate returns.

pub mod db;
pub mod interchange;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use interchange::csv_file::{
    CsvOptions, InterchangeError, InterchangeResult, KindSelection, TransferSummary,
};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::egg::{EggOutcome, EggRow, EggStats};
pub use model::flip::{FlipOutcome, FlipRow, FlipStats};
pub use model::misty::{MistyRow, MistyStats};
pub use model::record::{RecordKind, RecordValidationError};
pub use repo::egg_repo::SqliteEggRepository;
pub use repo::flip_repo::SqliteFlipRepository;
pub use repo::misty_repo::SqliteMistyRepository;
pub use repo::tally_repo::{RepoError, RepoResult, TallyRepository};
pub use service::tally_service::TallyService;

/// Database file name used when no explicit path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "kanga.db";

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
