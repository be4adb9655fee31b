//! Serverless-style invocation envelope.
//!
//! An [`Event`] carries the raw JSON body, an [`EventResponse`] carries the
//! status code, the serialized body and the response headers. Every
//! [`Operation`] runs through the same services as the HTTP routes.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::parse_body;
use crate::services::{UserService, VideoService};
use crate::state::AppState;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub body: Option<String>,
}

impl Event {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateUser,
    GetUser,
    SearchUser,
    UpdateUser,
    ListUsers,
    RandomVideos,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::CreateUser,
        Operation::GetUser,
        Operation::SearchUser,
        Operation::UpdateUser,
        Operation::ListUsers,
        Operation::RandomVideos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateUser => "create-user",
            Operation::GetUser => "get-user",
            Operation::SearchUser => "search-user",
            Operation::UpdateUser => "update-user",
            Operation::ListUsers => "list-users",
            Operation::RandomVideos => "random-videos",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// Run one operation against the event body; failures become error responses
pub async fn dispatch(state: &AppState, operation: Operation, event: Event) -> EventResponse {
    let raw = event.body.unwrap_or_default();
    let result = run(state, operation, raw.as_bytes()).await;

    let mut response = match result {
        Ok(body) => respond(200, &body),
        Err(err) => respond(err.status().as_u16(), &err.to_body()),
    };

    if operation == Operation::ListUsers {
        // The mobile app reads the listing cross-origin
        response
            .headers
            .insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
    }

    tracing::info!(
        operation = operation.as_str(),
        status = response.status_code,
        "Invocation finished"
    );
    response
}

async fn run(state: &AppState, operation: Operation, raw: &[u8]) -> AppResult<serde_json::Value> {
    let store = state.store.as_ref();

    match operation {
        Operation::CreateUser => to_json(UserService::create(store, parse_body(raw)?).await?),
        Operation::GetUser => to_json(UserService::get(store, parse_body(raw)?).await?),
        Operation::SearchUser => to_json(UserService::exists(store, parse_body(raw)?).await?),
        Operation::UpdateUser => to_json(UserService::update(store, parse_body(raw)?).await?),
        Operation::ListUsers => to_json(UserService::list(store).await?),
        Operation::RandomVideos => to_json(
            VideoService::sample(store, state.config.video_sampler, parse_body(raw)?).await?,
        ),
    }
}

fn to_json<T: Serialize>(value: T) -> AppResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))
}

fn respond<T: Serialize>(status_code: u16, body: &T) -> EventResponse {
    let (status_code, body) = match serde_json::to_string(body) {
        Ok(body) => (status_code, body),
        Err(e) => (500, serde_json::json!({ "error": e.to_string() }).to_string()),
    };

    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());

    EventResponse {
        status_code,
        body,
        headers,
    }
}
