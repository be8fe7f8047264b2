//! Community board posts: upload, browse, author-only edits, likes.

use lexicon_core::board::{category_key, ensure_author, validate_post};
use lexicon_core::error::CoreError;
use lexicon_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use lexicon_core::types::DbId;

use crate::error::StoreResult;
use crate::models::board::{
    Board, BoardCategory, BoardDetail, BoardLikeOutcome, BoardListItem, BoardSubject, CreateBoard,
    UpdateBoard,
};
use crate::repositories::{BoardCategoryRepo, BoardLikeRepo, BoardRepo, UserRepo};
use crate::DbPool;

#[derive(Clone)]
pub struct BoardService {
    pool: DbPool,
}

impl BoardService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn list_categories(&self) -> StoreResult<Vec<BoardCategory>> {
        Ok(BoardCategoryRepo::list(&self.pool).await?)
    }

    /// Subjects a post in `category` can be tagged with.
    pub async fn list_subjects(&self, category: &str) -> StoreResult<Vec<BoardSubject>> {
        let category = self.category(category).await?;
        Ok(BoardCategoryRepo::list_subjects(&self.pool, category.id).await?)
    }

    /// Add a subject to a category. Duplicates within a category conflict.
    pub async fn add_subject(&self, category: &str, subject: &str) -> StoreResult<BoardSubject> {
        let category = self.category(category).await?;
        let created = BoardCategoryRepo::create_subject(&self.pool, category.id, subject).await?;
        tracing::info!(category = %category.name, subject, "Board subject added");
        Ok(created)
    }

    /// Posts of a category, newest first.
    pub async fn list_boards(
        &self,
        category: &str,
        viewer: Option<DbId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> StoreResult<Vec<BoardListItem>> {
        let category = self.category(category).await?;
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(offset);
        Ok(BoardRepo::list_by_category(&self.pool, category.id, viewer, limit, offset).await?)
    }

    pub async fn count_boards(&self, category: &str) -> StoreResult<i64> {
        let category = self.category(category).await?;
        Ok(BoardRepo::count_by_category(&self.pool, category.id).await?)
    }

    /// Publish a post in a category, optionally tagged with one of its
    /// subjects.
    pub async fn upload_board(
        &self,
        author: Option<DbId>,
        input: &CreateBoard,
    ) -> StoreResult<Board> {
        let author_id = author.ok_or(CoreError::Unauthenticated)?;
        validate_post(&input.title, &input.content)?;

        let mut tx = self.pool.begin().await?;

        if !UserRepo::exists(&mut *tx, author_id).await? {
            return Err(CoreError::NotFound {
                entity: "user",
                id: author_id,
            }
            .into());
        }

        let key = category_key(&input.category);
        let category = BoardCategoryRepo::find_by_name(&mut *tx, &key)
            .await?
            .ok_or_else(|| CoreError::Validation(format!("Unknown board category: {key}")))?;

        let subject_id = match input.subject.as_deref() {
            Some(subject) => {
                let found = BoardCategoryRepo::find_subject(&mut *tx, category.id, subject)
                    .await?
                    .ok_or_else(|| {
                        CoreError::Validation(format!("Unknown subject for {key}: {subject}"))
                    })?;
                Some(found.id)
            }
            None => None,
        };

        let board = BoardRepo::create(
            &mut *tx,
            category.id,
            subject_id,
            author_id,
            &input.title,
            &input.content,
        )
        .await?;

        tx.commit().await?;

        tracing::info!(board_id = board.id, author_id, category = %key, "Board post uploaded");

        Ok(board)
    }

    /// Load a post and count the view. The returned counter includes it.
    pub async fn get_board_detail(
        &self,
        viewer: Option<DbId>,
        board_id: DbId,
    ) -> StoreResult<BoardDetail> {
        let mut tx = self.pool.begin().await?;

        if !BoardRepo::increment_views(&mut *tx, board_id).await? {
            return Err(not_found(board_id).into());
        }
        let detail = BoardRepo::find_detail(&mut *tx, board_id, viewer)
            .await?
            .ok_or_else(|| not_found(board_id))?;

        tx.commit().await?;

        tracing::debug!(board_id, "Board post viewed");

        Ok(detail)
    }

    /// Replace a post's title and content. Only its author may do this.
    pub async fn update_board(
        &self,
        actor: Option<DbId>,
        board_id: DbId,
        input: &UpdateBoard,
    ) -> StoreResult<Board> {
        let actor_id = actor.ok_or(CoreError::Unauthenticated)?;

        let mut tx = self.pool.begin().await?;

        let board = BoardRepo::find_by_id_for_update(&mut *tx, board_id)
            .await?
            .ok_or_else(|| not_found(board_id))?;
        ensure_author(actor_id, board.author_id, "update")?;

        let updated = BoardRepo::update(&mut *tx, board_id, input).await?;

        tx.commit().await?;

        tracing::info!(board_id, actor_id, "Board post updated");

        Ok(updated)
    }

    /// Delete a post and its likes. Only its author may do this.
    pub async fn delete_board(&self, actor: Option<DbId>, board_id: DbId) -> StoreResult<()> {
        let actor_id = actor.ok_or(CoreError::Unauthenticated)?;

        let mut tx = self.pool.begin().await?;

        let board = BoardRepo::find_by_id_for_update(&mut *tx, board_id)
            .await?
            .ok_or_else(|| not_found(board_id))?;
        ensure_author(actor_id, board.author_id, "delete")?;

        BoardRepo::delete(&mut *tx, board_id).await?;

        tx.commit().await?;

        tracing::info!(board_id, actor_id, "Board post deleted");

        Ok(())
    }

    /// Like the post if `user` has not liked it yet, otherwise unlike it.
    pub async fn toggle_like(
        &self,
        user: Option<DbId>,
        board_id: DbId,
    ) -> StoreResult<BoardLikeOutcome> {
        let user_id = user.ok_or(CoreError::Unauthenticated)?;

        let mut tx = self.pool.begin().await?;

        BoardRepo::find_by_id_for_update(&mut *tx, board_id)
            .await?
            .ok_or_else(|| not_found(board_id))?;

        if !UserRepo::exists(&mut *tx, user_id).await? {
            return Err(CoreError::NotFound {
                entity: "user",
                id: user_id,
            }
            .into());
        }

        let liked = if BoardLikeRepo::delete(&mut *tx, board_id, user_id).await? {
            false
        } else {
            BoardLikeRepo::create(&mut *tx, board_id, user_id).await?;
            true
        };
        let like_count = BoardLikeRepo::count_by_board(&mut *tx, board_id).await?;

        tx.commit().await?;

        tracing::info!(board_id, user_id, liked, like_count, "Board like toggled");

        Ok(BoardLikeOutcome {
            board_id,
            liked,
            like_count,
        })
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Resolve a category name, case-insensitively.
    async fn category(&self, name: &str) -> StoreResult<BoardCategory> {
        let key = category_key(name);
        BoardCategoryRepo::find_by_name(&self.pool, &key)
            .await?
            .ok_or_else(|| CoreError::Validation(format!("Unknown board category: {key}")).into())
    }
}

fn not_found(board_id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "board",
        id: board_id,
    }
}
