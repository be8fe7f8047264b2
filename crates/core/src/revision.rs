//! Revision planning for dictionary documents.
//!
//! A revision always records the content that is about to be lost, never the
//! content being written. The planners here decide, from the live document
//! and the request, which snapshot to append and what to write back. The
//! persistence layer applies a plan inside one transaction, so the
//! snapshot-then-overwrite order holds no matter which store runs it.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Plan inputs
// ---------------------------------------------------------------------------

/// A summary/body pair, either live on a document or frozen in a revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub summary: String,
    pub body: String,
}

impl Snapshot {
    pub fn new(summary: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            body: body.into(),
        }
    }
}

/// The parts of a live document the planners read.
#[derive(Debug, Clone, Copy)]
pub struct LiveDocument<'a> {
    pub id: DbId,
    pub summary: &'a str,
    pub body: &'a str,
    pub recent_modifier_id: DbId,
}

impl LiveDocument<'_> {
    fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.summary, self.body)
    }
}

/// The parts of a stored revision a revert restores from.
#[derive(Debug, Clone, Copy)]
pub struct StoredRevision<'a> {
    pub id: DbId,
    pub document_id: DbId,
    pub summary: &'a str,
    pub body: &'a str,
    pub editor_id: DbId,
}

// ---------------------------------------------------------------------------
// Plan outputs
// ---------------------------------------------------------------------------

/// A revision row to append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRevision {
    pub document_id: DbId,
    pub snapshot: Snapshot,
    /// Who is credited with the change this snapshot precedes.
    pub editor_id: DbId,
    /// Set only on revisions produced by a revert.
    pub revert_from_id: Option<DbId>,
}

/// The new live state written to the document after the revision is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentWrite {
    pub snapshot: Snapshot,
    pub recent_modifier_id: DbId,
}

/// An edit or revert: append `revision` first, then apply `write`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionPlan {
    pub revision: NewRevision,
    pub write: DocumentWrite,
}

// ---------------------------------------------------------------------------
// Planners
// ---------------------------------------------------------------------------

/// The first revision of a freshly created document.
///
/// Mirrors the initial content so the first edit has a predecessor in the
/// history chain.
pub fn plan_bootstrap(document_id: DbId, author_id: DbId, initial: &Snapshot) -> NewRevision {
    NewRevision {
        document_id,
        snapshot: initial.clone(),
        editor_id: author_id,
        revert_from_id: None,
    }
}

/// Snapshot the live content, credited to `editor_id`, then overwrite it.
pub fn plan_edit(
    document: &LiveDocument<'_>,
    editor_id: DbId,
    replacement: Snapshot,
) -> RevisionPlan {
    RevisionPlan {
        revision: NewRevision {
            document_id: document.id,
            snapshot: document.snapshot(),
            editor_id,
            revert_from_id: None,
        },
        write: DocumentWrite {
            snapshot: replacement,
            recent_modifier_id: editor_id,
        },
    }
}

/// Restore `target` onto `document`.
///
/// The overwritten content is credited to the document's current recent
/// modifier (who held it), not to whoever triggers the revert, and links back
/// to `target`. The restored content takes `target`'s editor as the new
/// recent modifier.
pub fn plan_revert(
    document: &LiveDocument<'_>,
    target: &StoredRevision<'_>,
) -> Result<RevisionPlan, CoreError> {
    if target.document_id != document.id {
        return Err(CoreError::Internal(format!(
            "Revision {} belongs to document {}, not {}",
            target.id, target.document_id, document.id
        )));
    }

    Ok(RevisionPlan {
        revision: NewRevision {
            document_id: document.id,
            snapshot: document.snapshot(),
            editor_id: document.recent_modifier_id,
            revert_from_id: Some(target.id),
        },
        write: DocumentWrite {
            snapshot: Snapshot::new(target.summary, target.body),
            recent_modifier_id: target.editor_id,
        },
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
