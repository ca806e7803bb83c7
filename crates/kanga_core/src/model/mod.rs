//! Tally domain model for flips, exeggutor entries and misty sessions.
//!
//! # Responsibility
//! - Define the record kinds, outcomes, persisted row shapes and aggregate
//!   statistics shared by repositories, interchange and callers.
//!
//! # Invariants
//! - Each record kind lives in its own append-only table.
//! - Rows are never updated; they are only inserted or deleted.

pub mod egg;
pub mod flip;
pub mod misty;
pub mod record;
