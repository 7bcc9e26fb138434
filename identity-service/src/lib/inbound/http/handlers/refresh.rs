use auth::TokenPair;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

pub async fn refresh<S: SessionServicePort>(
    State(state): State<AppState<S>>,
    body: Result<Json<RefreshRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let Json(body) = body?;
    let refresh_token = body
        .refresh_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Refresh token required".to_string()))?;

    state
        .session_service
        .refresh(&refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|tokens| ApiSuccess::new(StatusCode::OK, tokens.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequestBody {
    refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponseData {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for RefreshResponseData {
    fn from(tokens: TokenPair) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}
