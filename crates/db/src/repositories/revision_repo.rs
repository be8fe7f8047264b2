//! Repository for the `document_revisions` table.
//!
//! Revisions are append-only: there is no update or delete here.

use lexicon_core::revision::NewRevision;
use lexicon_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::revision::{DocumentRevision, RevisionDetail, RevisionSummary};

/// Column list for document_revisions queries.
const COLUMNS: &str = "id, document_id, prev_summary, prev_body, editor_id, revert_from_id, \
    created_at, updated_at";

/// Provides append and read operations for document revisions.
pub struct RevisionRepo;

impl RevisionRepo {
    /// Append a revision.
    pub async fn create<'e, E>(
        executor: E,
        input: &NewRevision,
    ) -> Result<DocumentRevision, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO document_revisions
                (document_id, prev_summary, prev_body, editor_id, revert_from_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DocumentRevision>(&query)
            .bind(input.document_id)
            .bind(&input.snapshot.summary)
            .bind(&input.snapshot.body)
            .bind(input.editor_id)
            .bind(input.revert_from_id)
            .fetch_one(executor)
            .await
    }

    /// Find a revision by ID.
    pub async fn find_by_id<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<DocumentRevision>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM document_revisions WHERE id = $1");
        sqlx::query_as::<_, DocumentRevision>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List every revision of a document in creation order (oldest first).
    pub async fn list_by_document<'e, E>(
        executor: E,
        document_id: DbId,
    ) -> Result<Vec<DocumentRevision>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM document_revisions
             WHERE document_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, DocumentRevision>(&query)
            .bind(document_id)
            .fetch_all(executor)
            .await
    }

    /// History entries for a document, oldest first, with editor nicknames
    /// and UTC creation dates.
    pub async fn list_summaries_by_document<'e, E>(
        executor: E,
        document_id: DbId,
    ) -> Result<Vec<RevisionSummary>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, RevisionSummary>(
            "SELECT r.id AS revision_id,
                    r.revert_from_id,
                    u.nickname AS editor_nickname,
                    (r.created_at AT TIME ZONE 'UTC')::date AS created_on
             FROM document_revisions r
             JOIN users u ON u.id = r.editor_id
             WHERE r.document_id = $1
             ORDER BY r.id ASC",
        )
        .bind(document_id)
        .fetch_all(executor)
        .await
    }

    /// A revision joined with its document's current title and the display
    /// names of the document's first author and the revision's editor.
    pub async fn find_detail<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<RevisionDetail>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, RevisionDetail>(
            "SELECT r.id AS revision_id,
                    r.document_id,
                    r.revert_from_id,
                    d.title,
                    a.nickname AS first_author_nickname,
                    e.nickname AS editor_nickname,
                    r.prev_summary AS summary,
                    r.prev_body AS body,
                    r.created_at
             FROM document_revisions r
             JOIN documents d ON d.id = r.document_id
             JOIN users a ON a.id = d.first_author_id
             JOIN users e ON e.id = r.editor_id
             WHERE r.id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }
}
