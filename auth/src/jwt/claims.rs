use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::JwtError;

/// Identity payload carried by both access and refresh tokens.
///
/// Every field is required: a token whose payload lacks one of them fails
/// to deserialize and is rejected as invalid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Email address of the subject
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID, unique per issued token
    pub jti: String,
}

impl Claims {
    /// Create claims for a user, valid for `lifetime` starting at `issued_at`.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `email` - User email address
    /// * `issued_at` - Instant the token is minted at
    /// * `lifetime` - How long the token stays valid
    ///
    /// # Returns
    /// Claims with a fresh random `jti`
    ///
    /// # Errors
    /// * `InvalidSettings` - The expiry falls outside the representable time range
    pub fn for_user(
        user_id: impl ToString,
        email: impl ToString,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = issued_at.checked_add_signed(lifetime).ok_or_else(|| {
            JwtError::InvalidSettings(format!("token lifetime {} is out of range", lifetime))
        })?;

        Ok(Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// User identifier carried in `sub`.
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}
