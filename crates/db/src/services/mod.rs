//! Transactional workflows built on the repositories.
//!
//! Each service owns a clone of the pool; clones share the same connections.

pub mod account;
pub mod board;
pub mod dictionary;
pub mod revision_store;

pub use account::AccountService;
pub use board::BoardService;
pub use dictionary::DictionaryService;
pub use revision_store::RevisionStore;
