//! Repository for the `board_categories` and `board_subjects` tables.

use lexicon_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::board::{BoardCategory, BoardSubject};

const CATEGORY_COLUMNS: &str = "id, name, created_at, updated_at";

const SUBJECT_COLUMNS: &str = "id, category_id, subject, created_at, updated_at";

/// Lookups for board categories and the subjects scoped to them.
pub struct BoardCategoryRepo;

impl BoardCategoryRepo {
    /// All categories in creation order.
    pub async fn list<'e, E>(executor: E) -> Result<Vec<BoardCategory>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM board_categories ORDER BY id");
        sqlx::query_as::<_, BoardCategory>(&query)
            .fetch_all(executor)
            .await
    }

    /// Find a category by its stored (upper-case) name.
    pub async fn find_by_name<'e, E>(
        executor: E,
        name: &str,
    ) -> Result<Option<BoardCategory>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM board_categories WHERE name = $1");
        sqlx::query_as::<_, BoardCategory>(&query)
            .bind(name)
            .fetch_optional(executor)
            .await
    }

    /// Add a subject to a category.
    pub async fn create_subject<'e, E>(
        executor: E,
        category_id: DbId,
        subject: &str,
    ) -> Result<BoardSubject, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO board_subjects (category_id, subject)
             VALUES ($1, $2)
             RETURNING {SUBJECT_COLUMNS}"
        );
        sqlx::query_as::<_, BoardSubject>(&query)
            .bind(category_id)
            .bind(subject)
            .fetch_one(executor)
            .await
    }

    /// Find a subject within a category.
    pub async fn find_subject<'e, E>(
        executor: E,
        category_id: DbId,
        subject: &str,
    ) -> Result<Option<BoardSubject>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {SUBJECT_COLUMNS} FROM board_subjects
             WHERE category_id = $1 AND subject = $2"
        );
        sqlx::query_as::<_, BoardSubject>(&query)
            .bind(category_id)
            .bind(subject)
            .fetch_optional(executor)
            .await
    }

    /// Subjects of a category in creation order.
    pub async fn list_subjects<'e, E>(
        executor: E,
        category_id: DbId,
    ) -> Result<Vec<BoardSubject>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {SUBJECT_COLUMNS} FROM board_subjects WHERE category_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, BoardSubject>(&query)
            .bind(category_id)
            .fetch_all(executor)
            .await
    }
}
