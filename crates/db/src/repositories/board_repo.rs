//! Repository for the `boards` table.

use lexicon_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::board::{Board, BoardDetail, BoardListItem, UpdateBoard};

const COLUMNS: &str = "id, category_id, subject_id, author_id, title, content, views, \
    created_at, updated_at";

/// Provides CRUD and listing operations for board posts.
pub struct BoardRepo;

impl BoardRepo {
    /// Insert a new post.
    pub async fn create<'e, E>(
        executor: E,
        category_id: DbId,
        subject_id: Option<DbId>,
        author_id: DbId,
        title: &str,
        content: &str,
    ) -> Result<Board, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO boards (category_id, subject_id, author_id, title, content)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Board>(&query)
            .bind(category_id)
            .bind(subject_id)
            .bind(author_id)
            .bind(title)
            .bind(content)
            .fetch_one(executor)
            .await
    }

    /// Find a post by ID and lock its row until the transaction ends.
    pub async fn find_by_id_for_update<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Board>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM boards WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Board>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Replace a post's title and content.
    pub async fn update<'e, E>(
        executor: E,
        id: DbId,
        input: &UpdateBoard,
    ) -> Result<Board, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE boards SET title = $2, content = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Board>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(executor)
            .await
    }

    /// Delete a post. Its likes go with it.
    pub async fn delete<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bump the view counter. Returns `false` if the post does not exist.
    pub async fn increment_views<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("UPDATE boards SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Posts of a category, newest first, flagged with the viewer's likes.
    pub async fn list_by_category<'e, E>(
        executor: E,
        category_id: DbId,
        viewer: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BoardListItem>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, BoardListItem>(
            "SELECT b.id, b.title, u.nickname AS author_nickname, s.subject,
                    (SELECT COUNT(*) FROM board_likes l WHERE l.board_id = b.id) AS like_count,
                    b.views,
                    EXISTS (
                        SELECT 1 FROM board_likes l WHERE l.board_id = b.id AND l.user_id = $2
                    ) AS is_liked,
                    b.created_at
             FROM boards b
             JOIN users u ON u.id = b.author_id
             LEFT JOIN board_subjects s ON s.id = b.subject_id
             WHERE b.category_id = $1
             ORDER BY b.created_at DESC, b.id DESC
             LIMIT $3 OFFSET $4",
        )
        .bind(category_id)
        .bind(viewer)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await
    }

    /// Number of posts in a category.
    pub async fn count_by_category<'e, E>(
        executor: E,
        category_id: DbId,
    ) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM boards WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }

    /// One post with category, subject and author display data.
    pub async fn find_detail<'e, E>(
        executor: E,
        id: DbId,
        viewer: Option<DbId>,
    ) -> Result<Option<BoardDetail>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, BoardDetail>(
            "SELECT b.id, c.name AS category, s.subject, b.title, b.content,
                    b.author_id, u.nickname AS author_nickname,
                    u.profile_image AS author_profile_image, b.views,
                    (SELECT COUNT(*) FROM board_likes l WHERE l.board_id = b.id) AS like_count,
                    EXISTS (
                        SELECT 1 FROM board_likes l WHERE l.board_id = b.id AND l.user_id = $2
                    ) AS is_liked,
                    b.created_at, b.updated_at
             FROM boards b
             JOIN board_categories c ON c.id = b.category_id
             JOIN users u ON u.id = b.author_id
             LEFT JOIN board_subjects s ON s.id = b.subject_id
             WHERE b.id = $1",
        )
        .bind(id)
        .bind(viewer)
        .fetch_optional(executor)
        .await
    }
}
