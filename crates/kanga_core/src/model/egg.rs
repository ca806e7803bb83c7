//! Exeggutor entry model.
//!
//! # Invariants
//! - `heads` is 0 or 1.
//! - `mattered = false` entries are excluded from the "when it mattered"
//!   denominator but still count toward totals.

use crate::model::record::{ensure_binary, ensure_timestamp, RecordValidationError};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Logged exeggutor result; the `X` variants did not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EggOutcome {
    Heads,
    HeadsIgnored,
    Tails,
    TailsIgnored,
}

impl EggOutcome {
    /// `(heads, mattered)` as persisted.
    pub fn columns(self) -> (i64, bool) {
        match self {
            Self::Heads => (1, true),
            Self::HeadsIgnored => (1, false),
            Self::Tails => (0, true),
            Self::TailsIgnored => (0, false),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Heads => "H",
            Self::HeadsIgnored => "HX",
            Self::Tails => "T",
            Self::TailsIgnored => "TX",
        }
    }
}

impl FromStr for EggOutcome {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "H" => Ok(Self::Heads),
            "HX" => Ok(Self::HeadsIgnored),
            "T" => Ok(Self::Tails),
            "TX" => Ok(Self::TailsIgnored),
            _ => Err(format!("invalid exeggutor entry `{value}`; expected H|HX|T|TX")),
        }
    }
}

/// Persisted exeggutor row in CSV field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggRow {
    pub heads: i64,
    #[serde(deserialize_with = "deserialize_flag")]
    pub mattered: bool,
    pub created_at: String,
}

impl EggRow {
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        ensure_binary("heads", self.heads)?;
        ensure_timestamp(&self.created_at)
    }
}

/// Aggregate exeggutor statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EggStats {
    pub total_entries: i64,
    pub total_heads: i64,
    pub total_tails: i64,
    pub total_not_mattered: i64,
    pub heads_mattered: i64,
}

impl EggStats {
    /// Entries whose result mattered.
    pub fn mattered_entries(&self) -> i64 {
        self.total_entries - self.total_not_mattered
    }

    /// Mean damage with heads worth 80 and tails worth 40; 0 when empty.
    pub fn average_damage(&self) -> i64 {
        if self.total_entries == 0 {
            return 0;
        }
        (self.total_heads * 80 + self.total_tails * 40) / self.total_entries
    }
}

// Older exports may carry SQLite's integer form of the flag.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean `{other}`; expected true|false|1|0"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{EggOutcome, EggStats};

    #[test]
    fn ignored_variants_do_not_matter() {
        assert_eq!(EggOutcome::HeadsIgnored.columns(), (1, false));
        assert_eq!(EggOutcome::TailsIgnored.columns(), (0, false));
        assert_eq!("tx".parse::<EggOutcome>(), Ok(EggOutcome::TailsIgnored));
    }

    #[test]
    fn average_damage_is_zero_without_entries() {
        assert_eq!(EggStats::default().average_damage(), 0);
    }

    #[test]
    fn average_damage_weights_heads_double() {
        let stats = EggStats {
            total_entries: 3,
            total_heads: 2,
            total_tails: 1,
            ..EggStats::default()
        };
        assert_eq!(stats.average_damage(), 66);
    }
}
