use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::domain::session::models::HealthStatus;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

pub async fn health<S: SessionServicePort>(
    State(state): State<AppState<S>>,
) -> ApiSuccess<HealthResponseData> {
    let status = state.session_service.health().await;
    let code = if status.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    ApiSuccess::new(code, status.into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub database: bool,
    pub ready: bool,
}

impl From<HealthStatus> for HealthResponseData {
    fn from(status: HealthStatus) -> Self {
        Self {
            database: status.database,
            ready: status.is_ready(),
        }
    }
}
