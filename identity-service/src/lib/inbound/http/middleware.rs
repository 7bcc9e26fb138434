use auth::AuthenticationError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::session::models::AuthenticatedUser;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that validates bearer access tokens and adds the user to request extensions.
///
/// Every failure answers the same `401`; the cause is only logged.
pub async fn authenticate<S: SessionServicePort>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let claims = state
        .authenticator
        .authenticate(authorization)
        .map_err(|e| {
            match &e {
                AuthenticationError::InvalidCredential(jwt) if jwt.is_expired() => {
                    tracing::debug!("Access token expired")
                }
                _ => tracing::warn!(error = %e, "Request authentication failed"),
            }
            ApiError::unauthorized()
        })?;

    let user = AuthenticatedUser::try_from(claims).map_err(|e| {
        tracing::warn!(error = %e, "Access token carries malformed claims");
        ApiError::unauthorized()
    })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
