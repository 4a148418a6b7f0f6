//! PostgreSQL-backed share-code store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use snipsync_core::error::{AppError, ErrorKind};
use snipsync_core::result::AppResult;
use snipsync_entity::share_code::{NewShareCode, ShareCode};

use super::{InsertOutcome, ShareCodeStore};

/// Share-code store backed by the `share_codes` table.
///
/// The table carries a unique index on `code`; the insert path converts the
/// resulting unique violation into [`InsertOutcome::DuplicateCode`].
#[derive(Debug, Clone)]
pub struct PgShareCodeStore {
    pool: PgPool,
}

impl PgShareCodeStore {
    /// Create a new store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareCodeStore for PgShareCodeStore {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<ShareCode>> {
        sqlx::query_as::<_, ShareCode>("SELECT * FROM share_codes WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find share code", e)
            })
    }

    async fn insert(&self, new: NewShareCode) -> AppResult<InsertOutcome> {
        let result = sqlx::query_as::<_, ShareCode>(
            "INSERT INTO share_codes (code, snippet_id, created_at, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&new.code)
        .bind(new.snippet_id)
        .bind(new.created_at)
        .bind(new.expires_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(InsertOutcome::Inserted(row)),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Ok(InsertOutcome::DuplicateCode)
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::Database,
                "Failed to insert share code",
                e,
            )),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM share_codes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete share code", e)
            })?;
        Ok(())
    }

    async fn delete_expired_before(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM share_codes WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to sweep share codes", e)
            })?;
        Ok(result.rows_affected())
    }

    async fn find_active_for_snippet(
        &self,
        snippet_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ShareCode>> {
        sqlx::query_as::<_, ShareCode>(
            "SELECT * FROM share_codes WHERE snippet_id = $1 AND expires_at > $2 \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(snippet_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find active share code", e)
        })
    }

    async fn exists_active(&self, code: &str, now: DateTime<Utc>) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM share_codes WHERE code = $1 AND expires_at > $2)",
        )
        .bind(code)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to probe share code", e)
        })
    }
}
