use async_trait::async_trait;
use auth::TokenPair;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::HealthStatus;
use crate::domain::session::models::RefreshTokenRecord;
use crate::domain::session::models::SignIn;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for session domain service operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Sign in with a Google ID token credential.
    ///
    /// Creates the user on first sign-in, then issues and stores a token pair.
    ///
    /// # Errors
    /// * `InvalidGoogleCredential` - Google rejected the credential
    /// * `IdentityProvider` - Google could not be queried
    /// * `Persistence` - Store operation failed
    async fn sign_in_with_google(&self, credential: &str) -> Result<SignIn, SessionError>;

    /// Exchange a refresh token for a new pair, revoking the old one.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token absent, expired, revoked or mis-signed,
    ///   or another rotation of the same token won the race
    /// * `UserNotFound` - Referenced identity no longer exists
    /// * `Persistence` - Store operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, SessionError>;

    /// Revoke a refresh token. Revoking an unknown token succeeds.
    ///
    /// # Errors
    /// * `Persistence` - Store operation failed
    async fn logout(&self, refresh_token: &str) -> Result<(), SessionError>;

    /// Load the profile of an authenticated user.
    ///
    /// # Errors
    /// * `UserNotFound` - Identity no longer exists
    /// * `Persistence` - Store operation failed
    async fn current_user(&self, user_id: &UserId) -> Result<User, SessionError>;

    /// Probe backing stores.
    async fn health(&self) -> HealthStatus;
}

/// Persistence operations for issued refresh tokens.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Insert a new record.
    ///
    /// # Errors
    /// * `Persistence` - Store unavailable or token already stored
    async fn store(&self, record: &RefreshTokenRecord) -> Result<(), SessionError>;

    /// Find a record whose expiry lies in the future.
    ///
    /// # Returns
    /// The record, or None if absent or expired
    async fn find_valid(&self, token: &str) -> Result<Option<RefreshTokenRecord>, SessionError>;

    /// Delete a record.
    ///
    /// # Returns
    /// Whether a record was deleted
    async fn remove(&self, token: &str) -> Result<bool, SessionError>;

    /// Atomically delete the unexpired `old_token` record and insert `new_record`.
    ///
    /// # Returns
    /// false, with nothing inserted, if no unexpired `old_token` record existed
    async fn swap(
        &self,
        old_token: &str,
        new_record: &RefreshTokenRecord,
    ) -> Result<bool, SessionError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), SessionError>;
}
