use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Signing material and lifetimes for the two token classes.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenSettings {
    pub const DEFAULT_ACCESS_TTL_MINUTES: i64 = 15;
    pub const DEFAULT_REFRESH_TTL_DAYS: i64 = 7;

    /// Settings with the default lifetimes (15 minutes / 7 days).
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl: Duration::minutes(Self::DEFAULT_ACCESS_TTL_MINUTES),
            refresh_ttl: Duration::days(Self::DEFAULT_REFRESH_TTL_DAYS),
        }
    }
}

/// Freshly minted access/refresh pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs and verifies access and refresh tokens.
///
/// Each class has its own secret and lifetime. Access tokens are checked
/// statelessly; refresh tokens must additionally be checked against the
/// refresh token store by the caller.
pub struct TokenCodec {
    access: JwtHandler,
    refresh: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    /// Build a codec from explicit settings.
    ///
    /// # Errors
    /// * `InvalidSettings` - A secret is empty, both classes share one secret, or a lifetime is
    ///   not positive or out of range
    pub fn new(settings: &TokenSettings) -> Result<Self, JwtError> {
        if settings.access_secret.is_empty() || settings.refresh_secret.is_empty() {
            return Err(JwtError::InvalidSettings("secret must not be empty".to_string()));
        }
        if settings.access_secret == settings.refresh_secret {
            return Err(JwtError::InvalidSettings(
                "access and refresh secrets must differ".to_string(),
            ));
        }
        if settings.access_ttl <= Duration::zero() || settings.refresh_ttl <= Duration::zero() {
            return Err(JwtError::InvalidSettings(
                "token lifetimes must be positive".to_string(),
            ));
        }
        let now = Utc::now();
        if now.checked_add_signed(settings.access_ttl).is_none()
            || now.checked_add_signed(settings.refresh_ttl).is_none()
        {
            return Err(JwtError::InvalidSettings(
                "token lifetimes are out of range".to_string(),
            ));
        }

        Ok(Self {
            access: JwtHandler::new(settings.access_secret.as_bytes()),
            refresh: JwtHandler::new(settings.refresh_secret.as_bytes()),
            access_ttl: settings.access_ttl,
            refresh_ttl: settings.refresh_ttl,
        })
    }

    /// Lifetime of refresh tokens, used by callers to size store records.
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Issue a new pair for the given identity, starting now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, user_id: &str, email: &str) -> Result<TokenPair, JwtError> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issue a new pair as if the current time were `now`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    /// * `InvalidSettings` - An expiry computed from `now` is out of range
    pub fn issue_at(
        &self,
        user_id: &str,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, JwtError> {
        let access_claims = Claims::for_user(user_id, email, now, self.access_ttl)?;
        let refresh_claims = Claims::for_user(user_id, email, now, self.refresh_ttl)?;

        Ok(TokenPair {
            access_token: self.access.encode(&access_claims)?,
            refresh_token: self.refresh.encode(&refresh_claims)?,
        })
    }

    /// Verify an access token's signature and expiry.
    pub fn verify_access(&self, token: &str) -> Result<Claims, JwtError> {
        self.access.decode(token)
    }

    /// Verify a refresh token's signature and expiry.
    ///
    /// This does not consult the store; a revoked token still verifies here.
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, JwtError> {
        self.refresh.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCESS_SECRET: &str = "access_secret_key_at_least_32_bytes!";
    const REFRESH_SECRET: &str = "refresh_secret_key_at_least_32_bytes";

    fn codec() -> TokenCodec {
        TokenCodec::new(&TokenSettings::new(ACCESS_SECRET, REFRESH_SECRET))
            .expect("Failed to build codec")
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let codec = codec();

        let pair = codec.issue("u1", "u1@x.com").expect("Failed to issue tokens");

        let access = codec
            .verify_access(&pair.access_token)
            .expect("Access token should verify");
        assert_eq!(access.user_id(), "u1");
        assert_eq!(access.email, "u1@x.com");

        let refresh = codec
            .verify_refresh(&pair.refresh_token)
            .expect("Refresh token should verify");
        assert_eq!(refresh.user_id(), "u1");
        assert_eq!(refresh.email, "u1@x.com");
    }

    #[test]
    fn test_lifetimes() {
        let codec = codec();
        let now = Utc::now();

        let pair = codec.issue_at("u1", "u1@x.com", now).unwrap();
        let access = codec.verify_access(&pair.access_token).unwrap();
        let refresh = codec.verify_refresh(&pair.refresh_token).unwrap();

        assert_eq!(access.exp - access.iat, 15 * 60);
        assert_eq!(refresh.exp - refresh.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_token_classes_are_not_interchangeable() {
        let codec = codec();
        let pair = codec.issue("u1", "u1@x.com").unwrap();

        assert!(matches!(
            codec.verify_access(&pair.refresh_token),
            Err(JwtError::InvalidToken(_))
        ));
        assert!(matches!(
            codec.verify_refresh(&pair.access_token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_access_token_expires() {
        let codec = codec();
        // Issued 16 minutes ago: access expired a minute ago, refresh still valid
        let issued_at = Utc::now() - Duration::minutes(16);
        let pair = codec.issue_at("u1", "u1@x.com", issued_at).unwrap();

        assert_eq!(
            codec.verify_access(&pair.access_token),
            Err(JwtError::TokenExpired)
        );
        assert!(codec.verify_refresh(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_refresh_token_expires() {
        let codec = codec();
        let issued_at = Utc::now() - Duration::days(7) - Duration::seconds(5);
        let pair = codec.issue_at("u1", "u1@x.com", issued_at).unwrap();

        assert_eq!(
            codec.verify_refresh(&pair.refresh_token),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_each_issue_is_distinct() {
        let codec = codec();
        let now = Utc::now();

        let first = codec.issue_at("u1", "u1@x.com", now).unwrap();
        let second = codec.issue_at("u1", "u1@x.com", now).unwrap();

        assert_ne!(first.refresh_token, second.refresh_token);
        assert_ne!(first.access_token, second.access_token);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let codec = codec();

        assert!(codec.verify_access("").is_err());
        assert!(codec.verify_access("not-a-jwt").is_err());
        assert!(codec
            .verify_refresh("eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJ1MSJ9.garbage")
            .is_err());
    }

    #[test]
    fn test_shared_secret_rejected() {
        let result = TokenCodec::new(&TokenSettings::new(ACCESS_SECRET, ACCESS_SECRET));
        assert!(matches!(result, Err(JwtError::InvalidSettings(_))));
    }

    #[test]
    fn test_out_of_range_lifetime_rejected() {
        let mut settings = TokenSettings::new(ACCESS_SECRET, REFRESH_SECRET);
        settings.refresh_ttl = Duration::days(100_000_000_000);

        let result = TokenCodec::new(&settings);
        assert!(matches!(result, Err(JwtError::InvalidSettings(_))));
    }

    #[test]
    fn test_issue_at_far_future_fails_without_panicking() {
        let codec = codec();
        let now = DateTime::<Utc>::MAX_UTC - Duration::days(1);

        let result = codec.issue_at("u1", "u1@x.com", now);
        assert!(matches!(result, Err(JwtError::InvalidSettings(_))));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let result = TokenCodec::new(&TokenSettings::new("", REFRESH_SECRET));
        assert!(matches!(result, Err(JwtError::InvalidSettings(_))));
    }
}
