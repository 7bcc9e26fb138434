use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::RefreshTokenRecord;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::user::models::UserId;

pub struct PostgresRefreshTokenRepository {
    pool: PgPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    token: String,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<RefreshTokenRow> for RefreshTokenRecord {
    fn from(row: RefreshTokenRow) -> Self {
        Self {
            token: row.token,
            user_id: UserId(row.user_id),
            expires_at: row.expires_at,
            created_at: row.created_at,
        }
    }
}

fn persistence_error(e: sqlx::Error) -> SessionError {
    SessionError::Persistence(e.to_string())
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn store(&self, record: &RefreshTokenRecord) -> Result<(), SessionError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&record.token)
        .bind(record.user_id.0)
        .bind(record.expires_at)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(persistence_error)?;

        Ok(())
    }

    async fn find_valid(&self, token: &str) -> Result<Option<RefreshTokenRecord>, SessionError> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT token, user_id, expires_at, created_at
            FROM refresh_tokens
            WHERE token = $1 AND expires_at > $2
            "#,
        )
        .bind(token)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence_error)?;

        Ok(row.map(RefreshTokenRecord::from))
    }

    async fn remove(&self, token: &str) -> Result<bool, SessionError> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(persistence_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn swap(
        &self,
        old_token: &str,
        new_record: &RefreshTokenRecord,
    ) -> Result<bool, SessionError> {
        let mut transaction = self.pool.begin().await.map_err(persistence_error)?;

        // Concurrent swaps of the same token serialize on the row lock;
        // the loser deletes nothing.
        let deleted = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE token = $1 AND expires_at > $2
            "#,
        )
        .bind(old_token)
        .bind(Utc::now())
        .execute(&mut *transaction)
        .await
        .map_err(persistence_error)?;

        if deleted.rows_affected() == 0 {
            transaction.rollback().await.map_err(persistence_error)?;
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&new_record.token)
        .bind(new_record.user_id.0)
        .bind(new_record.expires_at)
        .bind(new_record.created_at)
        .execute(&mut *transaction)
        .await
        .map_err(persistence_error)?;

        transaction.commit().await.map_err(persistence_error)?;

        Ok(true)
    }

    async fn ping(&self) -> Result<(), SessionError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(persistence_error)?;

        Ok(())
    }
}
