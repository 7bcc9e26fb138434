use auth::Claims;
use auth::TokenPair;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Persisted record of an issued refresh token.
///
/// A token authenticates a refresh only while its record exists and
/// `expires_at` lies in the future.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Record for a token issued now, expiring after `ttl`.
    pub fn new(token: String, user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token,
            user_id,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
            created_at: now,
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Identity resolved from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: EmailAddress,
}

impl TryFrom<Claims> for AuthenticatedUser {
    type Error = SessionError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = UserId::from_string(&claims.sub)
            .map_err(|e| SessionError::InvalidClaims(e.to_string()))?;
        let email =
            EmailAddress::new(claims.email).map_err(|e| SessionError::InvalidClaims(e.to_string()))?;

        Ok(Self { user_id, email })
    }
}

/// Outcome of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignIn {
    pub user: User,
    pub tokens: TokenPair,
}

/// Reachability of backing stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub database: bool,
}

impl HealthStatus {
    pub fn is_ready(&self) -> bool {
        self.database
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, email: &str) -> Claims {
        Claims::for_user(sub, email, Utc::now(), Duration::minutes(15)).unwrap()
    }

    #[test]
    fn test_record_validity() {
        let record = RefreshTokenRecord::new("token".to_string(), UserId::new(), Duration::days(7));

        assert!(record.is_valid_at(Utc::now()));
        assert!(!record.is_valid_at(record.expires_at));
        assert!(!record.is_valid_at(record.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_authenticated_user_from_claims() {
        let user_id = UserId::new();
        let user = AuthenticatedUser::try_from(claims(&user_id.to_string(), "u1@x.com"))
            .expect("Claims should convert");

        assert_eq!(user.user_id, user_id);
        assert_eq!(user.email.as_str(), "u1@x.com");
    }

    #[test]
    fn test_authenticated_user_rejects_malformed_claims() {
        assert!(matches!(
            AuthenticatedUser::try_from(claims("u1", "u1@x.com")),
            Err(SessionError::InvalidClaims(_))
        ));
        assert!(matches!(
            AuthenticatedUser::try_from(claims(&UserId::new().to_string(), "nope")),
            Err(SessionError::InvalidClaims(_))
        ));
    }
}
