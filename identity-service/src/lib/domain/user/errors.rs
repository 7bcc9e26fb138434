use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for identity provider calls
#[derive(Debug, Clone, Error)]
pub enum IdentityProviderError {
    #[error("Identity provider unreachable: {0}")]
    Unavailable(String),

    #[error("Unexpected identity provider response: {0}")]
    InvalidResponse(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
