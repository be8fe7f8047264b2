//! Repository for the `documents` table.
//!
//! Content writes go through [`DocumentRepo::apply_write`], which only the
//! revision store calls after it has appended the matching revision.

use lexicon_core::revision::DocumentWrite;
use lexicon_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::document::{
    CreateDocument, Document, DocumentDetailRow, DocumentHeader, DocumentListRow, TopLikedDocument,
};

/// Column list for documents queries.
const COLUMNS: &str = "id, title, summary, body, first_author_id, recent_modifier_id, \
    views, created_at, updated_at";

/// Shared SELECT for listing rows; callers append WHERE/ORDER/LIMIT.
const LIST_SELECT: &str = "SELECT d.id, d.title, d.summary, d.body, \
        u.nickname AS first_author_nickname, \
        (SELECT COUNT(*) FROM document_likes l WHERE l.document_id = d.id) AS like_count, \
        d.created_at \
     FROM documents d \
     JOIN users u ON u.id = d.first_author_id";

/// Provides CRUD and listing operations for dictionary documents.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert a new document authored by `author_id`, who is also its first
    /// recent modifier.
    pub async fn create<'e, E>(
        executor: E,
        input: &CreateDocument,
        author_id: DbId,
    ) -> Result<Document, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO documents (title, summary, body, first_author_id, recent_modifier_id)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(&input.body)
            .bind(author_id)
            .fetch_one(executor)
            .await
    }

    /// Find a document by ID.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Document>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a document by ID and lock its row until the transaction ends.
    pub async fn find_by_id_for_update<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Document>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Whether a document with exactly this title exists (case-sensitive).
    pub async fn exists_by_title<'e, E>(executor: E, title: &str) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM documents WHERE title = $1)")
                .bind(title)
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    /// Overwrite the live summary/body and recent modifier.
    ///
    /// `updated_at` is maintained by the `set_updated_at` trigger.
    pub async fn apply_write<'e, E>(
        executor: E,
        id: DbId,
        write: &DocumentWrite,
    ) -> Result<Document, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE documents SET
                summary = $2,
                body = $3,
                recent_modifier_id = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(&write.snapshot.summary)
            .bind(&write.snapshot.body)
            .bind(write.recent_modifier_id)
            .fetch_one(executor)
            .await
    }

    /// Increment the view counter by one.
    pub async fn increment_views<'e, E>(executor: E, id: DbId) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("UPDATE documents SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Total number of documents.
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM documents")
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }

    /// Title and first-author nickname, for history headers.
    pub async fn find_header<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<DocumentHeader>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, DocumentHeader>(
            "SELECT d.id, d.title, u.nickname AS first_author_nickname
             FROM documents d
             JOIN users u ON u.id = d.first_author_id
             WHERE d.id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Document joined with author/modifier display data and its like count.
    pub async fn find_detail<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<DocumentDetailRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, DocumentDetailRow>(
            "SELECT d.id, d.title, d.summary, d.body,
                    a.nickname AS first_author_nickname,
                    a.profile_image AS first_author_profile_image,
                    m.nickname AS recent_modifier_nickname,
                    m.profile_image AS recent_modifier_profile_image,
                    d.views,
                    (SELECT COUNT(*) FROM document_likes l
                     WHERE l.document_id = d.id) AS like_count,
                    d.created_at, d.updated_at
             FROM documents d
             JOIN users a ON a.id = d.first_author_id
             JOIN users m ON m.id = d.recent_modifier_id
             WHERE d.id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// List documents, newest first.
    pub async fn list<'e, E>(
        executor: E,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DocumentListRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "{LIST_SELECT}
             ORDER BY d.created_at DESC, d.id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, DocumentListRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(executor)
            .await
    }

    /// Case-insensitive substring search over title, summary and body.
    ///
    /// `pattern` is an `ILIKE` pattern with wildcards already escaped.
    pub async fn search<'e, E>(
        executor: E,
        pattern: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DocumentListRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "{LIST_SELECT}
             WHERE d.title ILIKE $1 OR d.summary ILIKE $1 OR d.body ILIKE $1
             ORDER BY d.created_at DESC, d.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, DocumentListRow>(&query)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(executor)
            .await
    }

    /// Documents ranked by the `best_documents` materialized view.
    pub async fn list_best<'e, E>(
        executor: E,
        limit: i64,
    ) -> Result<Vec<DocumentListRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "{LIST_SELECT}
             JOIN best_documents b ON b.document_id = d.id
             ORDER BY b.view_count DESC, d.id ASC
             LIMIT $1"
        );
        sqlx::query_as::<_, DocumentListRow>(&query)
            .bind(limit)
            .fetch_all(executor)
            .await
    }

    /// Documents ranked by their all-time view counter.
    pub async fn list_most_viewed<'e, E>(
        executor: E,
        limit: i64,
    ) -> Result<Vec<DocumentListRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "{LIST_SELECT}
             ORDER BY d.views DESC, d.id ASC
             LIMIT $1"
        );
        sqlx::query_as::<_, DocumentListRow>(&query)
            .bind(limit)
            .fetch_all(executor)
            .await
    }

    /// Documents with at least one like, ranked by like count.
    pub async fn top_liked<'e, E>(
        executor: E,
        limit: i64,
    ) -> Result<Vec<TopLikedDocument>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, TopLikedDocument>(
            "SELECT d.id, d.title, COUNT(l.id) AS like_count
             FROM document_likes l
             JOIN documents d ON d.id = l.document_id
             GROUP BY d.id, d.title
             ORDER BY like_count DESC, d.id ASC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(executor)
        .await
    }
}
