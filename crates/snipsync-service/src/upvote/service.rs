//! Upvote toggle service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use snipsync_core::error::{AppError, ErrorKind};
use snipsync_database::repositories::snippet::SnippetRepository;
use snipsync_database::repositories::upvote::UpvoteRepository;

use crate::context::RequestContext;

/// Outcome of an upvote toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleResult {
    /// Whether the caller now upvotes the snippet.
    pub upvoted: bool,
    /// Current upvote count after the toggle.
    pub upvote_count: i64,
}

/// Manages per-user snippet upvotes.
#[derive(Debug, Clone)]
pub struct UpvoteService {
    /// Upvote repository.
    upvote_repo: Arc<UpvoteRepository>,
    /// Snippet repository, for existence checks.
    snippet_repo: Arc<SnippetRepository>,
}

impl UpvoteService {
    /// Creates a new upvote service.
    pub fn new(upvote_repo: Arc<UpvoteRepository>, snippet_repo: Arc<SnippetRepository>) -> Self {
        Self {
            upvote_repo,
            snippet_repo,
        }
    }

    /// Adds the caller's upvote if absent, removes it if present.
    pub async fn toggle(
        &self,
        ctx: &RequestContext,
        snippet_id: Uuid,
    ) -> Result<ToggleResult, AppError> {
        if !self.snippet_repo.exists(snippet_id).await? {
            return Err(AppError::not_found("Snippet not found"));
        }

        let upvoted = match self.upvote_repo.find(snippet_id, ctx.user_id).await? {
            Some(existing) => {
                self.upvote_repo.delete(existing.id).await?;
                false
            }
            None => match self.upvote_repo.insert(snippet_id, ctx.user_id).await {
                Ok(_) => true,
                // Lost a race against a concurrent toggle; the vote is there.
                Err(e) if e.kind == ErrorKind::Conflict => true,
                Err(e) => return Err(e),
            },
        };

        let upvote_count = self.upvote_repo.count_for_snippet(snippet_id).await?;

        info!(
            user_id = %ctx.user_id,
            snippet_id = %snippet_id,
            upvoted,
            "Upvote toggled"
        );

        Ok(ToggleResult {
            upvoted,
            upvote_count,
        })
    }

    /// Whether the caller has upvoted a snippet.
    pub async fn has_upvoted(
        &self,
        ctx: &RequestContext,
        snippet_id: Uuid,
    ) -> Result<bool, AppError> {
        if !self.snippet_repo.exists(snippet_id).await? {
            return Err(AppError::not_found("Snippet not found"));
        }
        Ok(self.upvote_repo.find(snippet_id, ctx.user_id).await?.is_some())
    }
}
