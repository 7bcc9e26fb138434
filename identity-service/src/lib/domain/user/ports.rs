use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::GoogleProfile;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::IdentityProviderError;
use crate::user::errors::UserError;

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
}

/// External verifier for third-party sign-in credentials.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Verify a credential issued by the provider.
    ///
    /// # Returns
    /// The asserted profile, or None if the provider rejects the credential
    ///
    /// # Errors
    /// * `Unavailable` - Provider could not be reached
    /// * `InvalidResponse` - Provider answered with an unexpected payload
    async fn verify(&self, credential: &str) -> Result<Option<GoogleProfile>, IdentityProviderError>;
}
