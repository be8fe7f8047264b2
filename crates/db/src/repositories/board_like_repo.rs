//! Repository for the `board_likes` table.

use lexicon_core::types::DbId;
use sqlx::PgExecutor;

/// Provides like/unlike operations for board posts.
pub struct BoardLikeRepo;

impl BoardLikeRepo {
    /// Record that `user_id` likes `board_id`.
    pub async fn create<'e, E>(
        executor: E,
        board_id: DbId,
        user_id: DbId,
    ) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("INSERT INTO board_likes (board_id, user_id) VALUES ($1, $2)")
            .bind(board_id)
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Remove a like. Returns `true` if a row was deleted.
    pub async fn delete<'e, E>(
        executor: E,
        board_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM board_likes WHERE board_id = $1 AND user_id = $2")
            .bind(board_id)
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of likes on a post.
    pub async fn count_by_board<'e, E>(executor: E, board_id: DbId) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM board_likes WHERE board_id = $1")
            .bind(board_id)
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }
}
