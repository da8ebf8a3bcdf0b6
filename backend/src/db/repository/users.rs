//! Accounts and per-user settings.

use async_trait::async_trait;
use serde_json::Value;

use super::error::RepositoryResult;
use crate::api::{NewUser, User, UserId};

/// Repository trait for teacher accounts.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Check if the backing store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if it is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Create an account.
    ///
    /// # Returns
    /// * `Ok(User)` - The stored account with its assigned id
    /// * `Err(RepositoryError::Conflict)` - If the username is taken
    async fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;

    async fn find_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;

    async fn get_user(&self, id: UserId) -> RepositoryResult<Option<User>>;

    /// Number of accounts. Used to decide whether demo data must be seeded.
    async fn count_users(&self) -> RepositoryResult<i64>;
}

/// Repository trait for the per-user settings blob.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Fetch the user's settings, or `None` if nothing was saved yet.
    async fn get_settings(&self, user: UserId) -> RepositoryResult<Option<Value>>;

    /// Insert or replace the user's settings.
    async fn save_settings(&self, user: UserId, settings: &Value) -> RepositoryResult<Value>;
}
