//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods that
//! accept any `PgExecutor` as the first argument: `&PgPool` for one-off reads,
//! `&mut *tx` when the call is part of a service transaction.

pub mod board_category_repo;
pub mod board_like_repo;
pub mod board_repo;
pub mod document_like_repo;
pub mod document_repo;
pub mod document_viewer_repo;
pub mod revision_repo;
pub mod user_repo;

pub use board_category_repo::BoardCategoryRepo;
pub use board_like_repo::BoardLikeRepo;
pub use board_repo::BoardRepo;
pub use document_like_repo::DocumentLikeRepo;
pub use document_repo::DocumentRepo;
pub use document_viewer_repo::DocumentViewerRepo;
pub use revision_repo::RevisionRepo;
pub use user_repo::UserRepo;
