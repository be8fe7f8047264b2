//! Community board models: categories, subjects, posts and likes.

use lexicon_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `board_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BoardCategory {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `board_subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BoardSubject {
    pub id: DbId,
    pub category_id: DbId,
    pub subject: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `boards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Board {
    pub id: DbId,
    pub category_id: DbId,
    pub subject_id: Option<DbId>,
    pub author_id: DbId,
    pub title: String,
    pub content: String,
    pub views: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for uploading a post.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBoard {
    /// Category name, matched case-insensitively.
    pub category: String,
    /// Optional subject; must belong to the category.
    pub subject: Option<String>,
    pub title: String,
    pub content: String,
}

/// DTO for updating a post. Category and subject are fixed at upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBoard {
    pub title: String,
    pub content: String,
}

/// A post as shown in a category listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BoardListItem {
    pub id: DbId,
    pub title: String,
    pub author_nickname: String,
    pub subject: Option<String>,
    pub like_count: i64,
    pub views: i64,
    /// Whether the viewing user has liked this post (`false` for guests).
    pub is_liked: bool,
    pub created_at: Timestamp,
}

/// Full view of one post.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BoardDetail {
    pub id: DbId,
    pub category: String,
    pub subject: Option<String>,
    pub title: String,
    pub content: String,
    pub author_id: DbId,
    pub author_nickname: String,
    pub author_profile_image: Option<String>,
    pub views: i64,
    pub like_count: i64,
    pub is_liked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of toggling a like on a post.
#[derive(Debug, Clone, Serialize)]
pub struct BoardLikeOutcome {
    pub board_id: DbId,
    /// `true` if the post is now liked by the user.
    pub liked: bool,
    pub like_count: i64,
}
