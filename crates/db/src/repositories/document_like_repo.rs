//! Repository for the `document_likes` table.

use lexicon_core::types::DbId;
use sqlx::PgExecutor;

/// Provides like/unlike operations and like lookups.
pub struct DocumentLikeRepo;

impl DocumentLikeRepo {
    /// Record that `user_id` likes `document_id`.
    pub async fn create<'e, E>(
        executor: E,
        document_id: DbId,
        user_id: DbId,
    ) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("INSERT INTO document_likes (document_id, user_id) VALUES ($1, $2)")
            .bind(document_id)
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Remove a like. Returns `true` if a row was deleted.
    pub async fn delete<'e, E>(
        executor: E,
        document_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result =
            sqlx::query("DELETE FROM document_likes WHERE document_id = $1 AND user_id = $2")
                .bind(document_id)
                .bind(user_id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether `user_id` likes `document_id`.
    pub async fn exists<'e, E>(
        executor: E,
        document_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM document_likes WHERE document_id = $1 AND user_id = $2
             )",
        )
        .bind(document_id)
        .bind(user_id)
        .fetch_one(executor)
        .await?;
        Ok(row.0)
    }

    /// Number of likes on a document.
    pub async fn count_by_document<'e, E>(
        executor: E,
        document_id: DbId,
    ) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM document_likes WHERE document_id = $1")
                .bind(document_id)
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    /// Which of `document_ids` the user has liked, in one query.
    pub async fn liked_document_ids<'e, E>(
        executor: E,
        user_id: DbId,
        document_ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT document_id FROM document_likes
             WHERE user_id = $1 AND document_id = ANY($2)",
        )
        .bind(user_id)
        .bind(document_ids)
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
