//! Rules for community board posts.
//!
//! Unlike dictionary documents, a board post may only be changed or removed
//! by the user who wrote it.

use crate::error::CoreError;
use crate::types::DbId;

/// Normalize a category name as typed by a caller (`freeboard`) to its
/// stored key (`FREEBOARD`).
pub fn category_key(name: &str) -> String {
    name.trim().to_uppercase()
}

/// A new post needs a title and some content.
pub fn validate_post(title: &str, content: &str) -> Result<(), CoreError> {
    if title.is_empty() {
        return Err(CoreError::Validation("Title is required".into()));
    }
    if content.is_empty() {
        return Err(CoreError::Validation("Content is required".into()));
    }
    Ok(())
}

/// Only the author may update or delete a post.
pub fn ensure_author(actor_id: DbId, author_id: DbId, action: &str) -> Result<(), CoreError> {
    if actor_id != author_id {
        return Err(CoreError::Forbidden(format!(
            "Only the author of a post may {action} it"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn category_key_uppercases() {
        assert_eq!(category_key("freeBoard"), "FREEBOARD");
        assert_eq!(category_key(" imageboard "), "IMAGEBOARD");
    }

    #[test]
    fn post_requires_title_and_content() {
        assert!(validate_post("title", "content").is_ok());
        assert_matches!(
            validate_post("", "content"),
            Err(CoreError::Validation(msg)) if msg.contains("Title")
        );
        assert_matches!(
            validate_post("title", ""),
            Err(CoreError::Validation(msg)) if msg.contains("Content")
        );
    }

    #[test]
    fn only_author_passes() {
        assert!(ensure_author(3, 3, "update").is_ok());
        assert_matches!(
            ensure_author(4, 3, "delete"),
            Err(CoreError::Forbidden(msg)) if msg.contains("delete")
        );
    }
}
