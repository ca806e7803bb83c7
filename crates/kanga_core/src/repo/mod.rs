//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the shared append-only tally contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Bulk inserts validate every row before any SQL mutation.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod egg_repo;
pub mod flip_repo;
pub mod misty_repo;
pub mod tally_repo;
