//! Double-coin flip model.
//!
//! # Invariants
//! - One row per trial; every row contributes exactly two outcomes.
//! - `heads1` and `heads2` are 0 (tails) or 1 (heads).

use crate::model::record::{ensure_binary, ensure_timestamp, RecordValidationError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Result of one double-coin trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    HeadsHeads,
    HeadsTails,
    TailsHeads,
    TailsTails,
}

impl FlipOutcome {
    /// `(heads1, heads2)` as persisted.
    pub fn faces(self) -> (i64, i64) {
        match self {
            Self::HeadsHeads => (1, 1),
            Self::HeadsTails => (1, 0),
            Self::TailsHeads => (0, 1),
            Self::TailsTails => (0, 0),
        }
    }

    /// Two-letter command code (`HH`, `HT`, `TH`, `TT`).
    pub fn code(self) -> &'static str {
        match self {
            Self::HeadsHeads => "HH",
            Self::HeadsTails => "HT",
            Self::TailsHeads => "TH",
            Self::TailsTails => "TT",
        }
    }
}

impl FromStr for FlipOutcome {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "HH" => Ok(Self::HeadsHeads),
            "HT" => Ok(Self::HeadsTails),
            "TH" => Ok(Self::TailsHeads),
            "TT" => Ok(Self::TailsTails),
            _ => Err(format!("invalid flip `{value}`; expected HH|HT|TH|TT")),
        }
    }
}

/// Persisted flip row in CSV field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipRow {
    pub heads1: i64,
    pub heads2: i64,
    /// SQLite `CURRENT_TIMESTAMP` text (`YYYY-MM-DD HH:MM:SS`, UTC).
    pub created_at: String,
}

impl FlipRow {
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        ensure_binary("heads1", self.heads1)?;
        ensure_binary("heads2", self.heads2)?;
        ensure_timestamp(&self.created_at)
    }
}

/// Aggregate flip statistics. `total` counts outcomes, not rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlipStats {
    pub total: i64,
    pub double_heads: i64,
    pub double_tails: i64,
    pub total_heads: i64,
    pub total_tails: i64,
}

#[cfg(test)]
mod tests {
    use super::{FlipOutcome, FlipRow};

    #[test]
    fn outcome_codes_parse_case_insensitively() {
        assert_eq!("hh".parse::<FlipOutcome>(), Ok(FlipOutcome::HeadsHeads));
        assert_eq!("Th".parse::<FlipOutcome>(), Ok(FlipOutcome::TailsHeads));
        assert!("HX".parse::<FlipOutcome>().is_err());
    }

    #[test]
    fn mixed_outcomes_keep_coin_order() {
        assert_eq!(FlipOutcome::HeadsTails.faces(), (1, 0));
        assert_eq!(FlipOutcome::TailsHeads.faces(), (0, 1));
    }

    #[test]
    fn validate_rejects_non_binary_faces() {
        let row = FlipRow {
            heads1: 2,
            heads2: 0,
            created_at: "2024-01-01 00:00:00".to_string(),
        };
        assert!(row.validate().is_err());
    }
}
