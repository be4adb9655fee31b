use axum::{extract::State, Json};
use tracing::instrument;

use crate::error::AppResult;
use crate::handlers::JsonBody;
use crate::models::{
    CreateUser, CreatedUserResponse, LookupUser, UpdateUser, UserExistsResponse, UserResponse,
    UserSummary,
};
use crate::services::UserService;
use crate::state::AppState;

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User created successfully", body = CreatedUserResponse),
        (status = 400, description = "Missing or invalid field"),
        (status = 500, description = "Database error")
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUser>,
) -> AppResult<Json<CreatedUserResponse>> {
    let created = UserService::create(state.store.as_ref(), payload).await?;
    Ok(Json(created))
}

/// Get a user by username or email
#[utoipa::path(
    post,
    path = "/api/users/lookup",
    request_body = LookupUser,
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 400, description = "Invalid field or missing value"),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LookupUser>,
) -> AppResult<Json<UserResponse>> {
    let user = UserService::get(state.store.as_ref(), payload).await?;
    Ok(Json(user))
}

/// Check whether a user with the given username or email exists
#[utoipa::path(
    post,
    path = "/api/users/search",
    request_body = LookupUser,
    responses(
        (status = 200, description = "Existence flag", body = UserExistsResponse),
        (status = 400, description = "Invalid field or missing value")
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn search_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LookupUser>,
) -> AppResult<Json<UserExistsResponse>> {
    let found = UserService::exists(state.store.as_ref(), payload).await?;
    Ok(Json(found))
}

/// Update allow-listed profile fields
#[utoipa::path(
    patch,
    path = "/api/users",
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "No identifier or no valid fields"),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    let user = UserService::update(state.store.as_ref(), payload).await?;
    Ok(Json(user))
}

/// List every user
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = Vec<UserSummary>)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserSummary>>> {
    let users = UserService::list(state.store.as_ref()).await?;
    Ok(Json(users))
}
