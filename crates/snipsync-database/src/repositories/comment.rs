//! Comment repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use snipsync_core::error::{AppError, ErrorKind};
use snipsync_core::result::AppResult;
use snipsync_entity::comment::{Comment, CommentWithAuthor};

/// Repository for comment rows.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a comment by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find comment", e))
    }

    /// List all comments on a snippet, newest first, joined with authors.
    pub async fn list_for_snippet(&self, snippet_id: Uuid) -> AppResult<Vec<CommentWithAuthor>> {
        sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.snippet_id, c.author_id, c.content, c.created_at, c.updated_at, \
             u.username AS author_username, u.profile_picture AS author_profile_picture \
             FROM comments c JOIN users u ON u.id = c.author_id \
             WHERE c.snippet_id = $1 ORDER BY c.created_at DESC",
        )
        .bind(snippet_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list comments", e))
    }

    /// Create a comment.
    pub async fn create(
        &self,
        snippet_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (snippet_id, author_id, content) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(snippet_id)
        .bind(author_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create comment", e))
    }

    /// Replace a comment's content, bumping `updated_at`.
    pub async fn update_content(&self, id: Uuid, content: &str) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET content = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update comment", e))
    }

    /// Delete a comment.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete comment", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
