//! Record kind registry and shared row validation errors.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One of the three independent append-only tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Double-coin flips (`flips` table).
    Flip,
    /// Exeggutor entries with a `mattered` flag (`exeggutor` table).
    Egg,
    /// Misty sessions with a success count (`misty` table).
    Misty,
}

impl RecordKind {
    /// All kinds in the fixed processing order used by reset and CSV jobs.
    pub const ALL: [RecordKind; 3] = [RecordKind::Flip, RecordKind::Egg, RecordKind::Misty];

    /// Backing SQLite table.
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Flip => "flips",
            Self::Egg => "exeggutor",
            Self::Misty => "misty",
        }
    }

    /// Fixed CSV file name inside an interchange folder.
    pub fn csv_file_name(self) -> &'static str {
        match self {
            Self::Flip => "kanga.csv",
            Self::Egg => "exeggutor.csv",
            Self::Misty => "misty.csv",
        }
    }

    /// Persisted columns in CSV field order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Flip => &["heads1", "heads2", "created_at"],
            Self::Egg => &["heads", "mattered", "created_at"],
            Self::Misty => &["heads", "created_at"],
        }
    }

    /// Short selector name used on the command line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Flip => "kanga",
            Self::Egg => "egg",
            Self::Misty => "misty",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "kanga" | "flip" | "flips" => Ok(Self::Flip),
            "egg" | "exeggutor" => Ok(Self::Egg),
            "misty" => Ok(Self::Misty),
            other => Err(format!(
                "unknown record kind `{other}`; expected kanga|egg|misty"
            )),
        }
    }
}

/// Validation failures for persisted or imported rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// A binary outcome column held something other than 0 or 1.
    NonBinaryOutcome { column: &'static str, value: i64 },
    /// A count column held a negative value.
    NegativeCount { column: &'static str, value: i64 },
    /// `created_at` was blank.
    MissingTimestamp,
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonBinaryOutcome { column, value } => {
                write!(f, "`{column}` must be 0 or 1, got {value}")
            }
            Self::NegativeCount { column, value } => {
                write!(f, "`{column}` must not be negative, got {value}")
            }
            Self::MissingTimestamp => write!(f, "`created_at` must not be empty"),
        }
    }
}

impl Error for RecordValidationError {}

pub(crate) fn ensure_binary(column: &'static str, value: i64) -> Result<(), RecordValidationError> {
    if value == 0 || value == 1 {
        Ok(())
    } else {
        Err(RecordValidationError::NonBinaryOutcome { column, value })
    }
}

pub(crate) fn ensure_timestamp(created_at: &str) -> Result<(), RecordValidationError> {
    if created_at.trim().is_empty() {
        Err(RecordValidationError::MissingTimestamp)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RecordKind;

    #[test]
    fn csv_columns_follow_fixed_field_order() {
        assert_eq!(
            RecordKind::Flip.columns(),
            &["heads1", "heads2", "created_at"]
        );
        assert_eq!(
            RecordKind::Egg.columns(),
            &["heads", "mattered", "created_at"]
        );
        assert_eq!(RecordKind::Misty.columns(), &["heads", "created_at"]);
    }

    #[test]
    fn kind_parses_selector_labels() {
        for kind in RecordKind::ALL {
            assert_eq!(kind.label().parse::<RecordKind>().unwrap(), kind);
        }
        assert!("coins".parse::<RecordKind>().is_err());
    }
}
