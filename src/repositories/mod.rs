pub mod memory;
pub mod user;

pub use memory::InMemoryUserStore;
pub use user::PgUserStore;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{IdentifierField, NewUser, User, UserChanges, UserSummary, VideoCandidate};

/// Storage backend for the `users` table
///
/// Implementations own their connections; callers only see rows.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a row and return its generated id
    async fn insert(&self, user: NewUser) -> AppResult<i32>;

    /// Find the row whose identifier column equals `value`
    async fn find_by(&self, field: IdentifierField, value: &str) -> AppResult<Option<User>>;

    /// Check whether any row matches without loading it
    async fn exists_by(&self, field: IdentifierField, value: &str) -> AppResult<bool>;

    /// Apply the change-set to the matching row and return it, `None` if nothing matched
    async fn update_by(
        &self,
        field: IdentifierField,
        value: &str,
        changes: &UserChanges,
    ) -> AppResult<Option<User>>;

    /// Every row, projected to the listing columns
    async fn list_summaries(&self) -> AppResult<Vec<UserSummary>>;

    /// Up to `limit` random rows that have at least one video
    async fn random_with_videos(
        &self,
        exclude_username: Option<&str>,
        limit: u64,
    ) -> AppResult<Vec<VideoCandidate>>;
}
