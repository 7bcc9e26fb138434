use auth::JwtError;
use thiserror::Error;

use crate::user::errors::IdentityProviderError;
use crate::user::errors::UserError;

/// Top-level error for sign-in, refresh and logout operations
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Invalid Google token")]
    InvalidGoogleCredential,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Invalid token claims: {0}")]
    InvalidClaims(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Identity provider error: {0}")]
    IdentityProvider(#[from] IdentityProviderError),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<UserError> for SessionError {
    fn from(err: UserError) -> Self {
        SessionError::Persistence(err.to_string())
    }
}
