//! Domain layer for the lexicon dictionary backend.
//!
//! Holds everything that does not touch the database: shared id/timestamp
//! aliases, the [`error::CoreError`] taxonomy, account and board rules, and the
//! revision planners that decide what a snapshot records and what an edit or
//! revert writes back.

pub mod account;
pub mod board;
pub mod dictionary;
pub mod error;
pub mod pagination;
pub mod revision;
pub mod types;
