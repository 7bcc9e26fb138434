use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::models::SignIn;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

pub async fn google_sign_in<S: SessionServicePort>(
    State(state): State<AppState<S>>,
    body: Result<Json<GoogleSignInRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<GoogleSignInResponseData>, ApiError> {
    let Json(body) = body?;
    let credential = body
        .credential
        .filter(|credential| !credential.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Credential required".to_string()))?;

    state
        .session_service
        .sign_in_with_google(&credential)
        .await
        .map_err(ApiError::from)
        .map(|sign_in| ApiSuccess::new(StatusCode::OK, sign_in.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GoogleSignInRequestBody {
    credential: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSignInResponseData {
    pub user: SignedInUserData,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedInUserData {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

impl From<&User> for SignedInUserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            name: user.name.clone(),
            image: user.image.clone(),
        }
    }
}

impl From<SignIn> for GoogleSignInResponseData {
    fn from(sign_in: SignIn) -> Self {
        Self {
            user: (&sign_in.user).into(),
            access_token: sign_in.tokens.access_token,
            refresh_token: sign_in.tokens.refresh_token,
        }
    }
}
