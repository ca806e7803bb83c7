//! File interchange for tally records.
//!
//! # Responsibility
//! - Mirror each record kind to a fixed-name, header-less CSV file.
//! - Load those files back, one atomic batch per kind.
//!
//! # Invariants
//! - A malformed record aborts its whole kind; nothing from that file is
//!   inserted.
//! - Kinds are independent: an error in one kind does not roll back kinds
//!   already processed.

pub mod csv_file;
