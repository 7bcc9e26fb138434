use thiserror::Error;

/// Failure to sign or verify a token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Token signing failed: {0}")]
    EncodingFailed(String),

    /// Not a well-formed JWT, or its payload does not carry the expected claims.
    #[error("Malformed token: {0}")]
    DecodingFailed(String),

    #[error("Token has expired")]
    TokenExpired,

    /// Signature, algorithm or a required claim did not check out.
    #[error("Token rejected: {0}")]
    InvalidToken(String),

    #[error("Invalid token settings: {0}")]
    InvalidSettings(String),
}

impl JwtError {
    /// Whether the token was genuine but past its `exp`.
    pub fn is_expired(&self) -> bool {
        matches!(self, JwtError::TokenExpired)
    }
}
