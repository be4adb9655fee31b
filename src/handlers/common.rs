use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// JSON body extractor that reports parse failures as validation errors
///
/// The content type is not checked and an empty body reads as `{}`.
/// Example: `async fn handler(JsonBody(payload): JsonBody<CreateUser>) -> ... { }`
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(format!("Invalid input: {}", e)))?;

        parse_body(&bytes).map(JsonBody)
    }
}

/// Parse a raw request body into its typed schema
pub fn parse_body<T: DeserializeOwned>(raw: &[u8]) -> AppResult<T> {
    let result = if raw.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_slice(b"{}")
    } else {
        serde_json::from_slice(raw)
    };

    result.map_err(|e| AppError::Validation(format!("Invalid input: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LookupUser, RandomVideosRequest};

    #[test]
    fn test_empty_body_reads_as_object() {
        let request: RandomVideosRequest = parse_body(b"  ").unwrap();
        assert!(request.username.is_none());
    }

    #[test]
    fn test_malformed_body_is_validation_error() {
        let err = parse_body::<LookupUser>(b"{\"field\": ").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().starts_with("Invalid input:"));
    }

    #[test]
    fn test_wrong_type_is_validation_error() {
        let err = parse_body::<LookupUser>(br#"{"field": "email", "value": 42}"#).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
