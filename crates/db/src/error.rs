//! Error type returned by every service in this crate.
//!
//! Domain failures stay [`CoreError`] variants; database failures are
//! classified on the way in so unique-constraint races surface as the same
//! kinds the up-front checks produce.

use lexicon_core::error::CoreError;

/// Name of the unique constraint on `documents.title`.
pub const DOCUMENT_TITLE_CONSTRAINT: &str = "uq_documents_title";

/// PostgreSQL SQLSTATE for unique violations.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain-level error from `lexicon_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Any other database error from sqlx.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

/// Convenience type alias for service return values.
pub type StoreResult<T> = Result<T, StoreError>;

/// Stable, inspectable classification of a [`StoreError`].
///
/// Callers (an HTTP layer, a CLI) match on this to pick status codes or
/// messages without depending on sqlx.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    DuplicateTitle,
    Unauthenticated,
    Forbidden,
    Validation,
    Conflict,
    Internal,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Core(core) => match core {
                CoreError::NotFound { .. } => ErrorKind::NotFound,
                CoreError::DuplicateTitle(_) => ErrorKind::DuplicateTitle,
                CoreError::Unauthenticated => ErrorKind::Unauthenticated,
                CoreError::Forbidden(_) => ErrorKind::Forbidden,
                CoreError::Validation(_) => ErrorKind::Validation,
                CoreError::Conflict(_) => ErrorKind::Conflict,
                CoreError::Internal(_) => ErrorKind::Internal,
            },
            StoreError::Database(sqlx::Error::RowNotFound) => ErrorKind::NotFound,
            StoreError::Database(_) => ErrorKind::Internal,
        }
    }

    /// Rewrite a title unique violation into [`CoreError::DuplicateTitle`].
    ///
    /// Used by document creation, which is the only write that can collide on
    /// the title.
    pub fn with_title(self, title: &str) -> Self {
        match self {
            StoreError::Core(CoreError::Conflict(ref constraint))
                if constraint == DOCUMENT_TITLE_CONSTRAINT =>
            {
                StoreError::Core(CoreError::DuplicateTitle(title.to_string()))
            }
            other => other,
        }
    }
}

/// Unique violations on `uq_` constraints become [`CoreError::Conflict`]
/// carrying the constraint name; everything else is kept as a database error.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.starts_with("uq_") {
                        return StoreError::Core(CoreError::Conflict(constraint.to_string()));
                    }
                }
            }
        }
        tracing::error!(error = %err, "Database error");
        StoreError::Database(err)
    }
}
