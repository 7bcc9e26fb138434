use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

/// Best-effort revocation: an absent or unknown token still succeeds.
///
/// The body is read as JSON whatever its content type, so beacon-style
/// `text/plain` requests revoke too. A body that cannot be read is a `400`.
pub async fn logout<S: SessionServicePort>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<ApiSuccess<LogoutResponseData>, ApiError> {
    let refresh_token = parse_body(&body)?
        .and_then(|body| body.refresh_token)
        .filter(|token| !token.is_empty());

    if let Some(refresh_token) = refresh_token {
        state.session_service.logout(&refresh_token).await?;
    }

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LogoutResponseData { success: true },
    ))
}

fn parse_body(body: &[u8]) -> Result<Option<LogoutRequestBody>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequestBody {
    refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub success: bool,
}
