//! Upvote repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use snipsync_core::error::{AppError, ErrorKind};
use snipsync_core::result::AppResult;
use snipsync_entity::upvote::Upvote;

/// Repository for upvote rows.
#[derive(Debug, Clone)]
pub struct UpvoteRepository {
    pool: PgPool,
}

impl UpvoteRepository {
    /// Create a new upvote repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's upvote on a snippet.
    pub async fn find(&self, snippet_id: Uuid, user_id: Uuid) -> AppResult<Option<Upvote>> {
        sqlx::query_as::<_, Upvote>(
            "SELECT * FROM upvotes WHERE snippet_id = $1 AND user_id = $2",
        )
        .bind(snippet_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find upvote", e))
    }

    /// Record an upvote.
    pub async fn insert(&self, snippet_id: Uuid, user_id: Uuid) -> AppResult<Upvote> {
        sqlx::query_as::<_, Upvote>(
            "INSERT INTO upvotes (snippet_id, user_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(snippet_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict("Snippet already upvoted")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to insert upvote", e),
        })
    }

    /// Remove an upvote by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM upvotes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete upvote", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Count upvotes on a snippet.
    pub async fn count_for_snippet(&self, snippet_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM upvotes WHERE snippet_id = $1")
            .bind(snippet_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count upvotes", e))
    }
}
