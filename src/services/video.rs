use rand::seq::SliceRandom;

use crate::config::VideoSamplerMode;
use crate::error::{AppError, AppResult};
use crate::models::{instrument_names, RandomVideosRequest, VideoCandidate, VideoPick};
use crate::repositories::UserStore;

/// Number of users drawn per request
pub const SAMPLE_SIZE: u64 = 5;

pub struct VideoService;

impl VideoService {
    /// Draw up to [`SAMPLE_SIZE`] users with videos and one random video from each
    pub async fn sample(
        store: &dyn UserStore,
        mode: VideoSamplerMode,
        input: RandomVideosRequest,
    ) -> AppResult<Vec<VideoPick>> {
        let exclude = match mode {
            VideoSamplerMode::ExcludeRequester => Some(input.username.ok_or_else(|| {
                AppError::Validation(
                    "Invalid input. Expected a JSON body with 'username' field.".to_string(),
                )
            })?),
            VideoSamplerMode::Everyone => None,
        };

        let candidates = store
            .random_with_videos(exclude.as_deref(), SAMPLE_SIZE)
            .await?;
        tracing::debug!(count = candidates.len(), "Sampled video candidates");

        Ok(pick_videos(candidates))
    }
}

fn pick_videos(candidates: Vec<VideoCandidate>) -> Vec<VideoPick> {
    let mut rng = rand::thread_rng();

    candidates
        .into_iter()
        .filter_map(|candidate| {
            let video_url = candidate.videos.choose(&mut rng)?.clone();
            Some(VideoPick {
                user_id: candidate.user_id,
                instruments: instrument_names(candidate.instruments.as_ref()),
                username: candidate.username,
                video_url,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn candidate(user_id: i32, videos: &[&str]) -> VideoCandidate {
        VideoCandidate {
            user_id,
            username: format!("user{}", user_id),
            videos: videos.iter().map(|v| v.to_string()).collect(),
            instruments: Some(json!({ "Keyboard": "Intermediate" })),
        }
    }

    #[test]
    fn test_pick_videos_draws_from_own_list() {
        let candidates = vec![candidate(1, &["a", "b", "c"]), candidate(2, &["z"])];

        for _ in 0..20 {
            let picks = pick_videos(candidates.clone());
            assert_eq!(picks.len(), 2);
            assert!(["a", "b", "c"].contains(&picks[0].video_url.as_str()));
            assert_eq!(picks[1].video_url, "z");
            assert_eq!(picks[1].instruments, vec!["Keyboard"]);
        }
    }

    #[test]
    fn test_pick_videos_skips_empty_lists() {
        let picks = pick_videos(vec![candidate(1, &[]), candidate(2, &["v"])]);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].user_id, 2);
    }
}
