//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` input DTOs for inserts and updates
//! - `Serialize` read models joined for display (nicknames, like counts)

pub mod board;
pub mod document;
pub mod revision;
pub mod user;
