//! Document revision model (append-only history).
//!
//! A revision stores the summary/body a document held immediately before an
//! edit or revert, credited to whoever is responsible for that change.

use chrono::NaiveDate;
use lexicon_core::revision::StoredRevision;
use lexicon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::document::DocumentHeader;

/// A row from the `document_revisions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DocumentRevision {
    pub id: DbId,
    pub document_id: DbId,
    pub prev_summary: String,
    pub prev_body: String,
    pub editor_id: DbId,
    /// The revision whose content was restored, for revert-produced rows.
    pub revert_from_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DocumentRevision {
    /// Borrow the fields a revert restores from.
    pub fn stored(&self) -> StoredRevision<'_> {
        StoredRevision {
            id: self.id,
            document_id: self.document_id,
            summary: &self.prev_summary,
            body: &self.prev_body,
            editor_id: self.editor_id,
        }
    }
}

/// One entry in a document's history list (day granularity).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RevisionSummary {
    pub revision_id: DbId,
    pub revert_from_id: Option<DbId>,
    pub editor_nickname: String,
    pub created_on: NaiveDate,
}

/// A document's history: header plus revisions, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentHistory {
    pub document_id: DbId,
    pub title: String,
    pub first_author_nickname: String,
    pub revisions: Vec<RevisionSummary>,
}

impl DocumentHistory {
    pub fn new(header: DocumentHeader, revisions: Vec<RevisionSummary>) -> Self {
        Self {
            document_id: header.id,
            title: header.title,
            first_author_nickname: header.first_author_nickname,
            revisions,
        }
    }
}

/// Full view of one revision: the snapshotted content, not the live document.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RevisionDetail {
    pub revision_id: DbId,
    pub document_id: DbId,
    pub revert_from_id: Option<DbId>,
    /// The document's current title.
    pub title: String,
    pub first_author_nickname: String,
    pub editor_nickname: String,
    pub summary: String,
    pub body: String,
    pub created_at: Timestamp,
}

/// Result of reverting a document.
#[derive(Debug, Clone, Serialize)]
pub struct RevertOutcome {
    pub document_id: DbId,
    /// The revision whose content is now live.
    pub restored_revision_id: DbId,
    /// The revision recording what the revert overwrote.
    pub recorded_revision_id: DbId,
}
