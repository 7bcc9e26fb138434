use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenCodec;
use auth::TokenPair;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::HealthStatus;
use crate::domain::session::models::RefreshTokenRecord;
use crate::domain::session::models::SignIn;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::GoogleProfile;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::IdentityProvider;
use crate::user::ports::UserRepository;

/// Domain service implementation for session operations.
///
/// Concrete implementation of SessionServicePort with dependency injection.
pub struct SessionService<RR, UR, IP>
where
    RR: RefreshTokenRepository,
    UR: UserRepository,
    IP: IdentityProvider,
{
    refresh_tokens: Arc<RR>,
    users: Arc<UR>,
    identity_provider: Arc<IP>,
    codec: Arc<TokenCodec>,
}

impl<RR, UR, IP> SessionService<RR, UR, IP>
where
    RR: RefreshTokenRepository,
    UR: UserRepository,
    IP: IdentityProvider,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `refresh_tokens` - Refresh token store
    /// * `users` - User persistence implementation
    /// * `identity_provider` - Google credential verifier
    /// * `codec` - Token codec holding both signing secrets
    pub fn new(
        refresh_tokens: Arc<RR>,
        users: Arc<UR>,
        identity_provider: Arc<IP>,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            refresh_tokens,
            users,
            identity_provider,
            codec,
        }
    }

    fn issue_for(&self, user: &User) -> Result<(TokenPair, RefreshTokenRecord), SessionError> {
        let tokens = self
            .codec
            .issue(&user.id.to_string(), user.email.as_str())?;
        let record = RefreshTokenRecord::new(
            tokens.refresh_token.clone(),
            user.id,
            self.codec.refresh_ttl(),
        );

        Ok((tokens, record))
    }

    async fn find_or_create_user(&self, profile: GoogleProfile) -> Result<User, SessionError> {
        if let Some(user) = self.users.find_by_email(&profile.email).await? {
            return Ok(user);
        }

        let email = profile.email.clone();
        match self.users.create(User::from_profile(profile)).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, email = %user.email, "User created");
                Ok(user)
            }
            // Concurrent first sign-in created the row first
            Err(UserError::EmailAlreadyExists(_)) => self
                .users
                .find_by_email(&email)
                .await?
                .ok_or_else(|| SessionError::Persistence(format!("user {} vanished", email))),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl<RR, UR, IP> SessionServicePort for SessionService<RR, UR, IP>
where
    RR: RefreshTokenRepository,
    UR: UserRepository,
    IP: IdentityProvider,
{
    async fn sign_in_with_google(&self, credential: &str) -> Result<SignIn, SessionError> {
        let profile = self
            .identity_provider
            .verify(credential)
            .await?
            .ok_or(SessionError::InvalidGoogleCredential)?;

        let user = self.find_or_create_user(profile).await?;
        let (tokens, record) = self.issue_for(&user)?;
        self.refresh_tokens.store(&record).await?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(SignIn { user, tokens })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, SessionError> {
        let stored = self
            .refresh_tokens
            .find_valid(refresh_token)
            .await?
            .ok_or(SessionError::InvalidRefreshToken)?;

        let claims = self.codec.verify_refresh(refresh_token).map_err(|e| {
            tracing::warn!(error = %e, "Stored refresh token failed verification");
            SessionError::InvalidRefreshToken
        })?;

        let user_id = UserId::from_string(claims.user_id())
            .map_err(|_| SessionError::InvalidRefreshToken)?;
        if user_id != stored.user_id {
            tracing::warn!(
                token_user_id = %user_id,
                stored_user_id = %stored.user_id,
                "Refresh token subject does not match stored owner"
            );
            return Err(SessionError::InvalidRefreshToken);
        }

        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| SessionError::UserNotFound(user_id.to_string()))?;

        let (tokens, record) = self.issue_for(&user)?;

        if !self.refresh_tokens.swap(refresh_token, &record).await? {
            tracing::warn!(user_id = %user.id, "Refresh token already rotated or revoked");
            return Err(SessionError::InvalidRefreshToken);
        }

        tracing::debug!(user_id = %user.id, "Refresh token rotated");

        Ok(tokens)
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), SessionError> {
        let removed = self.refresh_tokens.remove(refresh_token).await?;
        tracing::debug!(removed, "Refresh token revoked");

        Ok(())
    }

    async fn current_user(&self, user_id: &UserId) -> Result<User, SessionError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| SessionError::UserNotFound(user_id.to_string()))
    }

    async fn health(&self) -> HealthStatus {
        let database = match self.refresh_tokens.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Database health check failed");
                false
            }
        };

        HealthStatus { database }
    }
}
