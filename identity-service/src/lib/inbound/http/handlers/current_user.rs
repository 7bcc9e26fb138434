use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::models::AuthenticatedUser;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

pub async fn current_user<S: SessionServicePort>(
    State(state): State<AppState<S>>,
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<CurrentUserResponseData>, ApiError> {
    state
        .session_service
        .current_user(&authenticated.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponseData {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for CurrentUserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            name: user.name.clone(),
            image: user.image.clone(),
            created_at: user.created_at,
        }
    }
}
