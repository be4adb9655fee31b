use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// A user eligible for sampling: at least one stored video
#[derive(Debug, Clone, PartialEq)]
pub struct VideoCandidate {
    pub user_id: i32,
    pub username: String,
    pub videos: Vec<String>,
    pub instruments: Option<JsonValue>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RandomVideosRequest {
    /// The requesting user, left out of the sample
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VideoPick {
    pub user_id: i32,
    pub username: String,
    pub video_url: String,
    /// Instrument names only, skill levels are dropped
    pub instruments: Vec<String>,
}

/// Instrument names from the stored instruments column
pub fn instrument_names(instruments: Option<&JsonValue>) -> Vec<String> {
    match instruments {
        Some(JsonValue::Object(map)) => map.keys().cloned().collect(),
        Some(JsonValue::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_instrument_names_from_mapping() {
        let instruments = json!({ "Cello": "Beginner", "Cajón": "Advanced" });
        let mut names = instrument_names(Some(&instruments));
        names.sort();
        assert_eq!(names, vec!["Cajón", "Cello"]);
    }

    #[test]
    fn test_instrument_names_from_sequence() {
        let instruments = json!(["Guitar", 3, "Drums"]);
        assert_eq!(instrument_names(Some(&instruments)), vec!["Guitar", "Drums"]);
    }

    #[test]
    fn test_instrument_names_empty() {
        assert!(instrument_names(None).is_empty());
        assert!(instrument_names(Some(&JsonValue::Null)).is_empty());
        assert!(instrument_names(Some(&json!("Cello"))).is_empty());
    }
}
