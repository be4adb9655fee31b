use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::AppResult;
use crate::models::{IdentifierField, NewUser, User, UserChanges, UserSummary, VideoCandidate};
use crate::repositories::UserStore;

/// In-memory user store for tests and local runs
#[derive(Clone)]
pub struct InMemoryUserStore {
    inner: Arc<Mutex<InMemoryUserStoreInner>>,
}

struct InMemoryUserStoreInner {
    users: Vec<User>,
    next_id: i32,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(InMemoryUserStoreInner {
                users: Vec::new(),
                next_id: 1,
            })),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

fn matches(user: &User, field: IdentifierField, value: &str) -> bool {
    match field {
        IdentifierField::Username => user.username == value,
        IdentifierField::Email => user.email == value,
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, input: NewUser) -> AppResult<i32> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let now = time::OffsetDateTime::now_utc();
        inner.users.push(User {
            id,
            username: input.username,
            email: input.email,
            phone_number: input.phone_number,
            address: input.address,
            password: input.password_hash,
            profile_picture: input.profile_picture,
            bio: input.bio,
            social_links: input.social_links,
            instruments: input.instruments,
            rating: input.rating,
            user_type: input.user_type,
            genres: input.genres,
            videos: input.videos,
            full_name: input.full_name,
            gender: None,
            created_at: now,
            updated_at: now,
        });

        Ok(id)
    }

    async fn find_by(&self, field: IdentifierField, value: &str) -> AppResult<Option<User>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .users
            .iter()
            .find(|u| matches(u, field, value))
            .cloned())
    }

    async fn exists_by(&self, field: IdentifierField, value: &str) -> AppResult<bool> {
        let inner = self.inner.lock().await;
        Ok(inner.users.iter().any(|u| matches(u, field, value)))
    }

    async fn update_by(
        &self,
        field: IdentifierField,
        value: &str,
        changes: &UserChanges,
    ) -> AppResult<Option<User>> {
        let mut inner = self.inner.lock().await;
        let mut first = None;

        // Same as the SQL path: every matching row is updated
        for user in inner.users.iter_mut().filter(|u| matches(u, field, value)) {
            changes.apply(user);
            if first.is_none() {
                first = Some(user.clone());
            }
        }

        Ok(first)
    }

    async fn list_summaries(&self) -> AppResult<Vec<UserSummary>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.iter().map(UserSummary::from).collect())
    }

    async fn random_with_videos(
        &self,
        exclude_username: Option<&str>,
        limit: u64,
    ) -> AppResult<Vec<VideoCandidate>> {
        let inner = self.inner.lock().await;
        let mut candidates: Vec<VideoCandidate> = inner
            .users
            .iter()
            .filter(|u| exclude_username != Some(u.username.as_str()))
            .filter_map(|u| {
                let videos = u.videos.as_ref().filter(|v| !v.is_empty())?;
                Some(VideoCandidate {
                    user_id: u.id,
                    username: u.username.clone(),
                    videos: videos.clone(),
                    instruments: u.instruments.clone(),
                })
            })
            .collect();

        candidates.shuffle(&mut rand::thread_rng());
        candidates.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(candidates)
    }
}
