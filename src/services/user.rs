use crate::error::{AppError, AppResult};
use crate::models::{
    CreateUser, CreatedUserResponse, LookupUser, UpdateUser, UserExistsResponse, UserResponse,
    UserSummary,
};
use crate::repositories::UserStore;
use crate::services::PasswordService;

pub struct UserService;

impl UserService {
    pub async fn create(store: &dyn UserStore, input: CreateUser) -> AppResult<CreatedUserResponse> {
        let password_hash = PasswordService::hash(&input.password)?;
        let new_user = input.into_new_user(password_hash)?;
        let username = new_user.username.clone();

        let id = store.insert(new_user).await?;
        tracing::info!(user_id = id, %username, "User created");

        Ok(CreatedUserResponse {
            message: "User created successfully.".to_string(),
            id,
        })
    }

    pub async fn get(store: &dyn UserStore, input: LookupUser) -> AppResult<UserResponse> {
        let (field, value) = input.validate()?;

        let user = store
            .find_by(field, &value)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(user.into())
    }

    pub async fn exists(store: &dyn UserStore, input: LookupUser) -> AppResult<UserExistsResponse> {
        let (field, value) = input.validate()?;
        let found = store.exists_by(field, &value).await?;

        Ok(UserExistsResponse { found })
    }

    pub async fn update(store: &dyn UserStore, input: UpdateUser) -> AppResult<UserResponse> {
        let (field, value, changes) = input.into_parts()?;

        let user = store
            .update_by(field, &value, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;
        tracing::info!(user_id = user.id, field = field.as_str(), "User updated");

        Ok(user.into())
    }

    pub async fn list(store: &dyn UserStore) -> AppResult<Vec<UserSummary>> {
        store.list_summaries().await
    }
}
