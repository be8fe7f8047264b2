//! Dictionary document model and related DTOs.

use lexicon_core::revision::LiveDocument;
use lexicon_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: DbId,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub first_author_id: DbId,
    pub recent_modifier_id: DbId,
    pub views: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Document {
    /// Borrow the fields the revision planners read.
    pub fn live(&self) -> LiveDocument<'_> {
        LiveDocument {
            id: self.id,
            summary: &self.summary,
            body: &self.body,
            recent_modifier_id: self.recent_modifier_id,
        }
    }
}

/// DTO for creating a new document.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocument {
    pub title: String,
    pub summary: String,
    pub body: String,
}

/// DTO for editing a document's content. The title is fixed at creation.
#[derive(Debug, Clone, Deserialize)]
pub struct EditDocument {
    pub summary: String,
    pub body: String,
}

/// Listing row joined with the first author's nickname and the like count.
#[derive(Debug, Clone, FromRow)]
pub struct DocumentListRow {
    pub id: DbId,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub first_author_nickname: String,
    pub like_count: i64,
    pub created_at: Timestamp,
}

/// A document as shown in lists, search results and the "best" shelf.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentListItem {
    pub id: DbId,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub first_author_nickname: String,
    pub like_count: i64,
    /// Whether the viewing user has liked this document (`false` for guests).
    pub is_liked: bool,
    pub created_at: Timestamp,
}

impl DocumentListItem {
    pub fn from_row(row: DocumentListRow, is_liked: bool) -> Self {
        Self {
            id: row.id,
            title: row.title,
            summary: row.summary,
            body: row.body,
            first_author_nickname: row.first_author_nickname,
            like_count: row.like_count,
            is_liked,
            created_at: row.created_at,
        }
    }
}

/// Detail row joined with author/modifier display data and the like count.
#[derive(Debug, Clone, FromRow)]
pub struct DocumentDetailRow {
    pub id: DbId,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub first_author_nickname: String,
    pub first_author_profile_image: Option<String>,
    pub recent_modifier_nickname: String,
    pub recent_modifier_profile_image: Option<String>,
    pub views: i64,
    pub like_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full view of one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentDetail {
    pub id: DbId,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub first_author_nickname: String,
    pub first_author_profile_image: Option<String>,
    pub recent_modifier_nickname: String,
    pub recent_modifier_profile_image: Option<String>,
    pub views: i64,
    pub like_count: i64,
    pub is_liked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DocumentDetail {
    pub fn from_row(row: DocumentDetailRow, is_liked: bool) -> Self {
        Self {
            id: row.id,
            title: row.title,
            summary: row.summary,
            body: row.body,
            first_author_nickname: row.first_author_nickname,
            first_author_profile_image: row.first_author_profile_image,
            recent_modifier_nickname: row.recent_modifier_nickname,
            recent_modifier_profile_image: row.recent_modifier_profile_image,
            views: row.views,
            like_count: row.like_count,
            is_liked,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Title and first author of a document, used as the history header.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DocumentHeader {
    pub id: DbId,
    pub title: String,
    pub first_author_nickname: String,
}

/// An entry of the most-liked ranking.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopLikedDocument {
    pub id: DbId,
    pub title: String,
    pub like_count: i64,
}

/// Result of toggling a like.
#[derive(Debug, Clone, Serialize)]
pub struct LikeOutcome {
    pub document_id: DbId,
    /// `true` if the document is now liked by the user.
    pub liked: bool,
    pub like_count: i64,
}
