//! Username and nickname rules for user accounts.
//!
//! Usernames are login identifiers: 3-16 lowercase ASCII letters or digits.
//! Nicknames are what every listing displays: 2-16 lowercase letters, digits
//! or Hangul syllables.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]{3,16}$").expect("valid regex"));

static NICKNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9가-힣]{2,16}$").expect("valid regex"));

/// Validate a login username.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let len = username.chars().count();
    if !(3..=16).contains(&len) {
        return Err(CoreError::Validation(
            "Username must be 3 to 16 characters long".into(),
        ));
    }
    if !USERNAME_RE.is_match(username) {
        return Err(CoreError::Validation(
            "Username may only contain lowercase letters and digits".into(),
        ));
    }
    Ok(())
}

/// Validate a display nickname.
pub fn validate_nickname(nickname: &str) -> Result<(), CoreError> {
    let len = nickname.chars().count();
    if !(2..=16).contains(&len) {
        return Err(CoreError::Validation(
            "Nickname must be 2 to 16 characters long".into(),
        ));
    }
    if !NICKNAME_RE.is_match(nickname) {
        return Err(CoreError::Validation(
            "Nickname may only contain lowercase letters, digits and Hangul".into(),
        ));
    }
    Ok(())
}
