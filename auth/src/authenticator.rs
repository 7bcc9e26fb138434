use std::sync::Arc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::tokens::TokenCodec;

const BEARER_SCHEME: &str = "bearer";

/// Stateless request authenticator for bearer access tokens.
///
/// Resolves an `Authorization` header value to the access token claims
/// without touching any storage.
pub struct Authenticator {
    codec: Arc<TokenCodec>,
}

/// Authentication failure.
///
/// Callers must not reveal which variant occurred to the client.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Missing credential")]
    MissingCredential,

    #[error("Invalid credential: {0}")]
    InvalidCredential(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator sharing the given codec.
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Authenticate a request from its `Authorization` header value.
    ///
    /// # Arguments
    /// * `authorization` - Raw header value, if the header was present
    ///
    /// # Returns
    /// Verified access token claims
    ///
    /// # Errors
    /// * `MissingCredential` - No header, or a header without a bearer token
    /// * `InvalidCredential` - Token fails signature or expiry checks
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Claims, AuthenticationError> {
        let token = authorization
            .and_then(bearer_token)
            .ok_or(AuthenticationError::MissingCredential)?;

        Ok(self.codec.verify_access(token)?)
    }
}

/// Extract the token from a `Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
