//! Search-term helpers for dictionary lookups.

use crate::error::CoreError;

/// Shortest accepted search query, in characters.
pub const MIN_SEARCH_CHARS: usize = 2;

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Build an `ILIKE` pattern from a user query.
///
/// Rejects queries shorter than [`MIN_SEARCH_CHARS`] after trimming and
/// escapes `%`, `_` and `\` so they match literally.
pub fn build_like_pattern(query: &str) -> Result<String, CoreError> {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_SEARCH_CHARS {
        return Err(CoreError::Validation(format!(
            "Search query must be at least {MIN_SEARCH_CHARS} characters"
        )));
    }

    let mut pattern = String::with_capacity(trimmed.len() + 2);
    pattern.push('%');
    for c in trimmed.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Ok(pattern)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
