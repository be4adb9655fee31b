use serde_json::{json, Value};

use groovi_users::models::CreateUser;
use groovi_users::services::UserService;
use groovi_users::state::AppState;

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create-user payload with every required field filled in
    pub fn user_payload(username: &str) -> Value {
        json!({
            "username": username,
            "phone_number": "555-0100",
            "email": format!("{}@example.com", username),
            "address": "1 Test Street",
            "password": "TestPassword123!",
            "user_type": "musician",
            "full_name": format!("Test User {}", username),
        })
    }

    /// Create a user without videos and return its id
    pub async fn create_user(&self, username: &str) -> i32 {
        self.insert(Self::user_payload(username)).await
    }

    /// Create a user with the given videos and instruments
    pub async fn create_user_with_videos(
        &self,
        username: &str,
        videos: &[&str],
        instruments: Value,
    ) -> i32 {
        let mut payload = Self::user_payload(username);
        payload["videos"] = json!(videos);
        payload["instruments"] = instruments;
        self.insert(payload).await
    }

    async fn insert(&self, payload: Value) -> i32 {
        let input: CreateUser = serde_json::from_value(payload).unwrap();
        UserService::create(self.state.store.as_ref(), input)
            .await
            .unwrap()
            .id
    }
}
