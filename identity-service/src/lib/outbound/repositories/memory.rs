use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::RefreshTokenRecord;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// In-memory implementation of the refresh token store.
#[derive(Debug, Default)]
pub struct InMemoryRefreshTokenRepository {
    records: RwLock<HashMap<String, RefreshTokenRecord>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held, expired ones included.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn store(&self, record: &RefreshTokenRecord) -> Result<(), SessionError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.token) {
            return Err(SessionError::Persistence(
                "refresh token already stored".to_string(),
            ));
        }
        records.insert(record.token.clone(), record.clone());
        Ok(())
    }

    async fn find_valid(&self, token: &str) -> Result<Option<RefreshTokenRecord>, SessionError> {
        let now = Utc::now();
        Ok(self
            .records
            .read()
            .await
            .get(token)
            .filter(|record| record.is_valid_at(now))
            .cloned())
    }

    async fn remove(&self, token: &str) -> Result<bool, SessionError> {
        Ok(self.records.write().await.remove(token).is_some())
    }

    async fn swap(
        &self,
        old_token: &str,
        new_record: &RefreshTokenRecord,
    ) -> Result<bool, SessionError> {
        let mut records = self.records.write().await;

        let now = Utc::now();
        match records.get(old_token) {
            Some(record) if record.is_valid_at(now) => {}
            _ => return Ok(false),
        }
        if records.contains_key(&new_record.token) {
            return Err(SessionError::Persistence(
                "refresh token already stored".to_string(),
            ));
        }

        records.remove(old_token);
        records.insert(new_record.token.clone(), new_record.clone());
        Ok(true)
    }

    async fn ping(&self) -> Result<(), SessionError> {
        Ok(())
    }
}

/// In-memory implementation of the user repository.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a user, as an account deletion by the owning layer would.
    pub async fn delete(&self, id: &UserId) -> bool {
        self.users.write().await.remove(id).is_some()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn record(token: &str, ttl: Duration) -> RefreshTokenRecord {
        RefreshTokenRecord::new(token.to_string(), UserId::new(), ttl)
    }

    #[tokio::test]
    async fn test_store_and_find_valid() {
        let repository = InMemoryRefreshTokenRepository::new();
        let record = record("token-1", Duration::days(7));

        repository.store(&record).await.unwrap();

        let found = repository.find_valid("token-1").await.unwrap();
        assert_eq!(found, Some(record));
        assert_eq!(repository.find_valid("token-2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_valid_ignores_expired() {
        let repository = InMemoryRefreshTokenRepository::new();
        repository
            .store(&record("expired", Duration::seconds(-1)))
            .await
            .unwrap();

        assert_eq!(repository.find_valid("expired").await.unwrap(), None);
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_duplicate_fails() {
        let repository = InMemoryRefreshTokenRepository::new();
        repository
            .store(&record("token-1", Duration::days(7)))
            .await
            .unwrap();

        let result = repository.store(&record("token-1", Duration::days(7))).await;
        assert!(matches!(result, Err(SessionError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let repository = InMemoryRefreshTokenRepository::new();
        repository
            .store(&record("token-1", Duration::days(7)))
            .await
            .unwrap();

        assert!(repository.remove("token-1").await.unwrap());
        assert_eq!(repository.find_valid("token-1").await.unwrap(), None);
        assert!(!repository.remove("token-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_swap() {
        let repository = InMemoryRefreshTokenRepository::new();
        repository
            .store(&record("old", Duration::days(7)))
            .await
            .unwrap();

        let new = record("new", Duration::days(7));
        assert!(repository.swap("old", &new).await.unwrap());
        assert_eq!(repository.find_valid("old").await.unwrap(), None);
        assert_eq!(repository.find_valid("new").await.unwrap(), Some(new));

        // Second swap of the same token loses and inserts nothing
        let other = record("other", Duration::days(7));
        assert!(!repository.swap("old", &other).await.unwrap());
        assert_eq!(repository.find_valid("other").await.unwrap(), None);
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_swap_expired_token() {
        let repository = InMemoryRefreshTokenRepository::new();
        repository
            .store(&record("old", Duration::seconds(-1)))
            .await
            .unwrap();

        let new = record("new", Duration::days(7));
        assert!(!repository.swap("old", &new).await.unwrap());
        assert_eq!(repository.find_valid("new").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_user_repository() {
        let repository = InMemoryUserRepository::new();
        let email = EmailAddress::new("u1@x.com".to_string()).unwrap();
        let user = User {
            id: UserId::new(),
            email: email.clone(),
            name: None,
            image: None,
            google_id: "google-u1".to_string(),
            created_at: Utc::now(),
        };

        repository.create(user.clone()).await.unwrap();
        assert_eq!(
            repository.find_by_email(&email).await.unwrap(),
            Some(user.clone())
        );
        assert_eq!(
            repository.find_by_id(&user.id).await.unwrap(),
            Some(user.clone())
        );

        let duplicate = User {
            id: UserId::new(),
            ..user.clone()
        };
        assert!(matches!(
            repository.create(duplicate).await,
            Err(UserError::EmailAlreadyExists(_))
        ));

        assert!(repository.delete(&user.id).await);
        assert_eq!(repository.find_by_id(&user.id).await.unwrap(), None);
    }
}
