//! Snippet repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use snipsync_core::error::{AppError, ErrorKind};
use snipsync_core::result::AppResult;
use snipsync_entity::snippet::{CreateSnippet, Snippet, SnippetListing};

/// Columns selected for every joined listing query.
const LISTING_SELECT: &str = "SELECT s.id, s.author_id, s.title, s.description, s.language, \
     s.code, s.visibility, s.tags, s.created_at, s.updated_at, \
     u.username AS author_username, u.profile_picture AS author_profile_picture, \
     (SELECT COUNT(*) FROM comments c WHERE c.snippet_id = s.id) AS comment_count, \
     (SELECT COUNT(*) FROM upvotes v WHERE v.snippet_id = s.id) AS upvote_count \
     FROM snippets s JOIN users u ON u.id = s.author_id";

/// Repository for snippet rows and joined listing views.
#[derive(Debug, Clone)]
pub struct SnippetRepository {
    pool: PgPool,
}

impl SnippetRepository {
    /// Create a new snippet repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a snippet by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Snippet>> {
        sqlx::query_as::<_, Snippet>("SELECT * FROM snippets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find snippet", e))
    }

    /// Whether a snippet with this ID exists.
    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM snippets WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check snippet existence", e)
            })
    }

    /// Find a snippet joined with author and counts.
    pub async fn find_listing_by_id(&self, id: Uuid) -> AppResult<Option<SnippetListing>> {
        let sql = format!("{LISTING_SELECT} WHERE s.id = $1");
        sqlx::query_as::<_, SnippetListing>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load snippet view", e)
            })
    }

    /// List all public snippets, newest first.
    pub async fn list_public(&self) -> AppResult<Vec<SnippetListing>> {
        let sql =
            format!("{LISTING_SELECT} WHERE s.visibility = 'public' ORDER BY s.created_at DESC");
        sqlx::query_as::<_, SnippetListing>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list public snippets", e)
            })
    }

    /// List a user's snippets, newest first.
    ///
    /// Private snippets are included only when the author is browsing their
    /// own collection.
    pub async fn list_by_author(
        &self,
        author_id: Uuid,
        include_private: bool,
    ) -> AppResult<Vec<SnippetListing>> {
        let sql = if include_private {
            format!("{LISTING_SELECT} WHERE s.author_id = $1 ORDER BY s.created_at DESC")
        } else {
            format!(
                "{LISTING_SELECT} WHERE s.author_id = $1 AND s.visibility = 'public' \
                 ORDER BY s.created_at DESC"
            )
        };
        sqlx::query_as::<_, SnippetListing>(&sql)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list author snippets", e)
            })
    }

    /// Create a new snippet.
    pub async fn create(&self, data: &CreateSnippet) -> AppResult<Snippet> {
        sqlx::query_as::<_, Snippet>(
            "INSERT INTO snippets (author_id, title, description, language, code, visibility, tags) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.author_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.language)
        .bind(&data.code)
        .bind(data.visibility)
        .bind(&data.tags)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create snippet", e))
    }

    /// Persist an updated snippet, bumping `updated_at`.
    pub async fn update(&self, snippet: &Snippet) -> AppResult<Snippet> {
        sqlx::query_as::<_, Snippet>(
            "UPDATE snippets SET title = $2, description = $3, language = $4, code = $5, \
             visibility = $6, tags = $7, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(snippet.id)
        .bind(&snippet.title)
        .bind(&snippet.description)
        .bind(&snippet.language)
        .bind(&snippet.code)
        .bind(snippet.visibility)
        .bind(&snippet.tags)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update snippet", e))
    }

    /// Delete a snippet. Comments, upvotes, and share codes cascade.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM snippets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete snippet", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
