//! Repository for the `document_viewers` table and the `best_documents`
//! materialized view built from it.

use lexicon_core::types::DbId;
use sqlx::PgExecutor;

/// Provides per-day view dedup and the daily reset queries.
pub struct DocumentViewerRepo;

impl DocumentViewerRepo {
    /// Record a view from `viewer_ip`.
    ///
    /// Returns `true` if this is the first view from that IP since the last
    /// reset, `false` if it was already recorded.
    pub async fn record<'e, E>(
        executor: E,
        document_id: DbId,
        viewer_ip: &str,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "INSERT INTO document_viewers (document_id, viewer_ip)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_document_viewers_document_ip DO NOTHING",
        )
        .bind(document_id)
        .bind(viewer_ip)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of distinct IPs that viewed a document since the last reset.
    pub async fn count_by_document<'e, E>(
        executor: E,
        document_id: DbId,
    ) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM document_viewers WHERE document_id = $1")
                .bind(document_id)
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    /// Recompute `best_documents` from the current viewer rows.
    pub async fn refresh_best_documents<'e, E>(executor: E) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("REFRESH MATERIALIZED VIEW best_documents")
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Delete every viewer row. Returns the number of rows removed.
    pub async fn clear_all<'e, E>(executor: E) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM document_viewers")
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
