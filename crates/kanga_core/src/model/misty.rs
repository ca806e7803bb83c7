//! Misty session model. `heads` is a success count, not a binary outcome.

use crate::model::record::{ensure_timestamp, RecordValidationError};
use serde::{Deserialize, Serialize};

/// Persisted misty row in CSV field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistyRow {
    pub heads: i64,
    pub created_at: String,
}

impl MistyRow {
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.heads < 0 {
            return Err(RecordValidationError::NegativeCount {
                column: "heads",
                value: self.heads,
            });
        }
        ensure_timestamp(&self.created_at)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MistyStats {
    pub total_entries: i64,
    /// Sum of per-session counts.
    pub total_heads: i64,
}
