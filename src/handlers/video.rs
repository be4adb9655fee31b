use axum::{extract::State, Json};
use tracing::instrument;

use crate::error::AppResult;
use crate::handlers::JsonBody;
use crate::models::{RandomVideosRequest, VideoPick};
use crate::services::VideoService;
use crate::state::AppState;

/// Sample one random video from up to five users
#[utoipa::path(
    post,
    path = "/api/videos/random",
    request_body = RandomVideosRequest,
    responses(
        (status = 200, description = "Sampled videos, possibly empty", body = Vec<VideoPick>),
        (status = 400, description = "Missing username")
    ),
    tag = "Videos"
)]
#[instrument(skip_all)]
pub async fn random_videos(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RandomVideosRequest>,
) -> AppResult<Json<Vec<VideoPick>>> {
    let picks =
        VideoService::sample(state.store.as_ref(), state.config.video_sampler, payload).await?;
    Ok(Json(picks))
}
