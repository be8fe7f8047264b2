//! User registration and nickname management.

use lexicon_core::account::{validate_nickname, validate_username};
use lexicon_core::error::CoreError;
use lexicon_core::types::DbId;

use crate::error::StoreResult;
use crate::models::user::{CreateUser, User};
use crate::repositories::UserRepo;
use crate::DbPool;

#[derive(Clone)]
pub struct AccountService {
    pool: DbPool,
}

impl AccountService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Register a user. Username and nickname must both be unused.
    pub async fn register(&self, input: &CreateUser) -> StoreResult<User> {
        validate_username(&input.username)?;
        validate_nickname(&input.nickname)?;

        if UserRepo::exists_by_username(&self.pool, &input.username).await? {
            return Err(CoreError::Conflict(format!(
                "Username '{}' is already taken",
                input.username
            ))
            .into());
        }
        if UserRepo::exists_by_nickname(&self.pool, &input.nickname).await? {
            return Err(CoreError::Conflict(format!(
                "Nickname '{}' is already taken",
                input.nickname
            ))
            .into());
        }

        // A concurrent registration still trips uq_users_* and maps to Conflict.
        let user = UserRepo::create(&self.pool, input).await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Change a user's nickname. Keeping the current nickname is a no-op.
    pub async fn change_nickname(&self, user_id: DbId, nickname: &str) -> StoreResult<User> {
        validate_nickname(nickname)?;

        let current = UserRepo::find_by_id(&self.pool, user_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "user",
                id: user_id,
            })?;
        if current.nickname == nickname {
            return Ok(current);
        }

        if UserRepo::exists_by_nickname(&self.pool, nickname).await? {
            return Err(
                CoreError::Conflict(format!("Nickname '{nickname}' is already taken")).into(),
            );
        }

        let user = UserRepo::update_nickname(&self.pool, user_id, nickname)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "user",
                id: user_id,
            })?;

        tracing::info!(user_id, nickname, "Nickname changed");
        Ok(user)
    }

    pub async fn username_available(&self, username: &str) -> StoreResult<bool> {
        Ok(!UserRepo::exists_by_username(&self.pool, username).await?)
    }

    pub async fn nickname_available(&self, nickname: &str) -> StoreResult<bool> {
        Ok(!UserRepo::exists_by_nickname(&self.pool, nickname).await?)
    }
}
