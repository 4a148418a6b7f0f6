//! Comment CRUD service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use snipsync_core::error::AppError;
use snipsync_database::repositories::comment::CommentRepository;
use snipsync_database::repositories::snippet::SnippetRepository;
use snipsync_entity::comment::Comment;

use crate::context::RequestContext;
use crate::snippet::CommentView;

/// Manages comments on snippets.
#[derive(Debug, Clone)]
pub struct CommentService {
    /// Comment repository.
    comment_repo: Arc<CommentRepository>,
    /// Snippet repository, for existence checks.
    snippet_repo: Arc<SnippetRepository>,
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(comment_repo: Arc<CommentRepository>, snippet_repo: Arc<SnippetRepository>) -> Self {
        Self {
            comment_repo,
            snippet_repo,
        }
    }

    /// Adds a comment to a snippet.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        snippet_id: Uuid,
        content: &str,
    ) -> Result<Comment, AppError> {
        if !self.snippet_repo.exists(snippet_id).await? {
            return Err(AppError::not_found("Snippet not found"));
        }

        let comment = self
            .comment_repo
            .create(snippet_id, ctx.user_id, content)
            .await?;

        info!(
            user_id = %ctx.user_id,
            snippet_id = %snippet_id,
            comment_id = %comment.id,
            "Comment created"
        );

        Ok(comment)
    }

    /// Lists a snippet's comments, newest first.
    pub async fn list_for_snippet(&self, snippet_id: Uuid) -> Result<Vec<CommentView>, AppError> {
        if !self.snippet_repo.exists(snippet_id).await? {
            return Err(AppError::not_found("Snippet not found"));
        }

        let comments = self.comment_repo.list_for_snippet(snippet_id).await?;
        Ok(comments
            .into_iter()
            .map(|c| {
                let author = c.author();
                CommentView {
                    id: c.id,
                    content: c.content,
                    author,
                    created_at: c.created_at,
                    updated_at: c.updated_at,
                }
            })
            .collect())
    }

    /// Replaces a comment's content (author only).
    pub async fn update(
        &self,
        ctx: &RequestContext,
        comment_id: Uuid,
        content: &str,
    ) -> Result<Comment, AppError> {
        let comment = self
            .comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment not found"))?;

        if comment.author_id != ctx.user_id {
            return Err(AppError::forbidden("Access denied"));
        }

        self.comment_repo.update_content(comment_id, content).await
    }

    /// Deletes a comment (author only).
    pub async fn delete(&self, ctx: &RequestContext, comment_id: Uuid) -> Result<(), AppError> {
        let comment = self
            .comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment not found"))?;

        if comment.author_id != ctx.user_id {
            return Err(AppError::forbidden("Access denied"));
        }

        self.comment_repo.delete(comment_id).await?;

        info!(
            user_id = %ctx.user_id,
            comment_id = %comment_id,
            "Comment deleted"
        );

        Ok(())
    }
}
