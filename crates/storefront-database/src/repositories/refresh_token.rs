//! PostgreSQL refresh token repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use storefront_core::AppResult;
use storefront_core::error::{AppError, ErrorKind};
use storefront_entity::refresh_token::{NewRefreshToken, RefreshTokenRecord};

use super::RefreshTokenRepository;
use crate::connection::DatabasePool;

/// Refresh tokens table backed by sqlx.
#[derive(Debug, Clone)]
pub struct PgRefreshTokenRepository {
    db: DatabasePool,
}

impl PgRefreshTokenRepository {
    /// Create a new refresh token repository.
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    async fn insert(&self, data: NewRefreshToken) -> AppResult<RefreshTokenRecord> {
        let record = data.into_record();
        sqlx::query_as::<_, RefreshTokenRecord>(
            "INSERT INTO refresh_tokens \
             (id, user_id, token_hash, is_active, expires_at, created_at, user_agent, ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.token_hash)
        .bind(record.is_active)
        .bind(record.expires_at)
        .bind(record.created_at)
        .bind(&record.user_agent)
        .bind(&record.ip_address)
        .fetch_one(self.db.get().await?)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict("Refresh token already stored")
            }
            other => {
                AppError::with_source(ErrorKind::Database, "Failed to store refresh token", other)
            }
        })
    }

    async fn find_active_by_hash(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<RefreshTokenRecord>> {
        sqlx::query_as::<_, RefreshTokenRecord>(
            "SELECT * FROM refresh_tokens \
             WHERE token_hash = $1 AND is_active = TRUE AND expires_at > $2",
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(self.db.get().await?)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to look up refresh token", e)
        })
    }

    async fn invalidate(&self, token_hash: &str, now: DateTime<Utc>) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET is_active = FALSE, expires_at = $2 \
             WHERE token_hash = $1 AND is_active = TRUE",
        )
        .bind(token_hash)
        .bind(now)
        .execute(self.db.get().await?)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to invalidate refresh token", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn invalidate_all_for_user(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET is_active = FALSE, expires_at = $2 \
             WHERE user_id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .bind(now)
        .execute(self.db.get().await?)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke user tokens", e)
        })?;

        Ok(result.rows_affected())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM refresh_tokens WHERE is_active = FALSE OR expires_at <= $1")
                .bind(now)
                .execute(self.db.get().await?)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to purge refresh tokens", e)
                })?;

        Ok(result.rows_affected())
    }
}
