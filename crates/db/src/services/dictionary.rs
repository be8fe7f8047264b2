//! Browsing, view counting and likes for dictionary documents.

use std::collections::HashSet;

use lexicon_core::dictionary::build_like_pattern;
use lexicon_core::error::CoreError;
use lexicon_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use lexicon_core::types::DbId;

use crate::error::StoreResult;
use crate::models::document::{
    DocumentDetail, DocumentListItem, DocumentListRow, LikeOutcome, TopLikedDocument,
};
use crate::repositories::{DocumentLikeRepo, DocumentRepo, DocumentViewerRepo, UserRepo};
use crate::DbPool;

#[derive(Clone)]
pub struct DictionaryService {
    pool: DbPool,
}

impl DictionaryService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// `true` if no document has exactly this title.
    pub async fn check_title_available(&self, title: &str) -> StoreResult<bool> {
        let taken = DocumentRepo::exists_by_title(&self.pool, title).await?;
        Ok(!taken)
    }

    /// Documents newest first.
    pub async fn list_documents(
        &self,
        viewer: Option<DbId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> StoreResult<Vec<DocumentListItem>> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(offset);
        let rows = DocumentRepo::list(&self.pool, limit, offset).await?;
        self.with_like_flags(viewer, rows).await
    }

    pub async fn count_documents(&self) -> StoreResult<i64> {
        Ok(DocumentRepo::count(&self.pool).await?)
    }

    /// Load a document and count the view.
    ///
    /// `views` grows only on the first view from `viewer_ip` since the last
    /// daily reset. The returned counter includes this view.
    pub async fn get_document_detail(
        &self,
        viewer: Option<DbId>,
        viewer_ip: &str,
        document_id: DbId,
    ) -> StoreResult<DocumentDetail> {
        let mut tx = self.pool.begin().await?;

        DocumentRepo::find_by_id(&mut *tx, document_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "document",
                id: document_id,
            })?;

        let is_new_view = DocumentViewerRepo::record(&mut *tx, document_id, viewer_ip).await?;
        if is_new_view {
            DocumentRepo::increment_views(&mut *tx, document_id).await?;
        }

        let row = DocumentRepo::find_detail(&mut *tx, document_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "document",
                id: document_id,
            })?;
        let is_liked = match viewer {
            Some(user_id) => DocumentLikeRepo::exists(&mut *tx, document_id, user_id).await?,
            None => false,
        };

        tx.commit().await?;

        tracing::debug!(document_id, is_new_view, "Document viewed");

        Ok(DocumentDetail::from_row(row, is_liked))
    }

    /// Like the document if `user` has not liked it yet, otherwise unlike it.
    pub async fn toggle_like(
        &self,
        user: Option<DbId>,
        document_id: DbId,
    ) -> StoreResult<LikeOutcome> {
        let user_id = user.ok_or(CoreError::Unauthenticated)?;

        let mut tx = self.pool.begin().await?;

        // Lock the document so two toggles from the same user serialize.
        DocumentRepo::find_by_id_for_update(&mut *tx, document_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "document",
                id: document_id,
            })?;

        if !UserRepo::exists(&mut *tx, user_id).await? {
            return Err(CoreError::NotFound {
                entity: "user",
                id: user_id,
            }
            .into());
        }

        let liked = if DocumentLikeRepo::delete(&mut *tx, document_id, user_id).await? {
            false
        } else {
            DocumentLikeRepo::create(&mut *tx, document_id, user_id).await?;
            true
        };
        let like_count = DocumentLikeRepo::count_by_document(&mut *tx, document_id).await?;

        tx.commit().await?;

        tracing::info!(document_id, user_id, liked, like_count, "Document like toggled");

        Ok(LikeOutcome {
            document_id,
            liked,
            like_count,
        })
    }

    /// Case-insensitive substring search over title, summary and body.
    pub async fn search(
        &self,
        viewer: Option<DbId>,
        query: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> StoreResult<Vec<DocumentListItem>> {
        let pattern = build_like_pattern(query)?;
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(offset);
        let rows = DocumentRepo::search(&self.pool, &pattern, limit, offset).await?;
        self.with_like_flags(viewer, rows).await
    }

    /// Yesterday's most viewed documents.
    ///
    /// Before the first daily reset has populated `best_documents`, falls back
    /// to the all-time view counter.
    pub async fn best_documents(
        &self,
        viewer: Option<DbId>,
        limit: Option<i64>,
    ) -> StoreResult<Vec<DocumentListItem>> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let mut rows = DocumentRepo::list_best(&self.pool, limit).await?;
        if rows.is_empty() {
            rows = DocumentRepo::list_most_viewed(&self.pool, limit).await?;
        }
        self.with_like_flags(viewer, rows).await
    }

    /// Documents ranked by like count.
    pub async fn top_liked(&self, limit: Option<i64>) -> StoreResult<Vec<TopLikedDocument>> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        Ok(DocumentRepo::top_liked(&self.pool, limit).await?)
    }

    /// Rebuild `best_documents` from the current viewer rows, then clear them.
    ///
    /// Returns the number of viewer rows removed.
    pub async fn reset_daily_views(&self) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await?;
        DocumentViewerRepo::refresh_best_documents(&mut *tx).await?;
        let cleared = DocumentViewerRepo::clear_all(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!(cleared, "Daily view counters reset");
        Ok(cleared)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Attach `is_liked` to each row with one lookup for the whole page.
    async fn with_like_flags(
        &self,
        viewer: Option<DbId>,
        rows: Vec<DocumentListRow>,
    ) -> StoreResult<Vec<DocumentListItem>> {
        let liked: HashSet<DbId> = match viewer {
            Some(user_id) if !rows.is_empty() => {
                let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
                DocumentLikeRepo::liked_document_ids(&self.pool, user_id, &ids)
                    .await?
                    .into_iter()
                    .collect()
            }
            _ => HashSet::new(),
        };

        Ok(rows
            .into_iter()
            .map(|row| {
                let is_liked = liked.contains(&row.id);
                DocumentListItem::from_row(row, is_liked)
            })
            .collect())
    }
}
