//! Snippet CRUD service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use snipsync_core::error::AppError;
use snipsync_database::repositories::comment::CommentRepository;
use snipsync_database::repositories::snippet::SnippetRepository;
use snipsync_entity::comment::CommentWithAuthor;
use snipsync_entity::snippet::{CreateSnippet, SnippetListing, UpdateSnippet, Visibility};
use snipsync_entity::user::AuthorSummary;

use crate::context::RequestContext;

/// A snippet with author and counts, as returned by listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetSummary {
    /// Snippet ID.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Language label.
    pub language: String,
    /// Snippet body.
    pub code: String,
    /// Visibility.
    pub visibility: Visibility,
    /// Tags.
    pub tags: Vec<String>,
    /// Author summary.
    pub author: AuthorSummary,
    /// Number of comments.
    pub comment_count: i64,
    /// Number of upvotes.
    pub upvote_count: i64,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

/// A comment with its author, as embedded in a snippet detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    /// Comment ID.
    pub id: Uuid,
    /// Comment text.
    pub content: String,
    /// Comment author.
    pub author: AuthorSummary,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

/// The full denormalized snippet view: summary plus its comment thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetDetail {
    /// Summary fields.
    #[serde(flatten)]
    pub summary: SnippetSummary,
    /// Comments, newest first.
    pub comments: Vec<CommentView>,
}

/// Data accepted when creating a new snippet.
#[derive(Debug, Clone)]
pub struct NewSnippetData {
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Language label.
    pub language: String,
    /// Snippet body.
    pub code: String,
    /// Visibility (defaults to public at the DTO layer).
    pub visibility: Visibility,
    /// Tags.
    pub tags: Vec<String>,
}

/// Manages snippet creation, listing, visibility, and ownership.
#[derive(Debug, Clone)]
pub struct SnippetService {
    /// Snippet repository.
    snippet_repo: Arc<SnippetRepository>,
    /// Comment repository, for detail views.
    comment_repo: Arc<CommentRepository>,
}

impl SnippetService {
    /// Creates a new snippet service.
    pub fn new(snippet_repo: Arc<SnippetRepository>, comment_repo: Arc<CommentRepository>) -> Self {
        Self {
            snippet_repo,
            comment_repo,
        }
    }

    /// Creates a new snippet owned by the current user.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: NewSnippetData,
    ) -> Result<SnippetSummary, AppError> {
        let snippet = self
            .snippet_repo
            .create(&CreateSnippet {
                author_id: ctx.user_id,
                title: data.title,
                description: data.description,
                language: data.language,
                code: data.code,
                visibility: data.visibility,
                tags: data.tags,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            snippet_id = %snippet.id,
            visibility = ?snippet.visibility,
            "Snippet created"
        );

        let listing = self
            .snippet_repo
            .find_listing_by_id(snippet.id)
            .await?
            .ok_or_else(|| AppError::internal("Snippet vanished after insert"))?;

        Ok(summary_from(listing))
    }

    /// Fetches a snippet detail view, enforcing visibility.
    ///
    /// Private snippets are visible only to their author.
    pub async fn get(
        &self,
        snippet_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<SnippetDetail, AppError> {
        let listing = self
            .snippet_repo
            .find_listing_by_id(snippet_id)
            .await?
            .ok_or_else(|| AppError::not_found("Snippet not found"))?;

        if listing.visibility == Visibility::Private && viewer != Some(listing.author_id) {
            return Err(AppError::forbidden("Access denied"));
        }

        self.assemble_detail(listing).await
    }

    /// Fetches a snippet detail view with **no** visibility check.
    ///
    /// Only the share-code resolution path uses this: an active code grants
    /// read access regardless of visibility.
    pub async fn detail_by_id(&self, snippet_id: Uuid) -> Result<Option<SnippetDetail>, AppError> {
        match self.snippet_repo.find_listing_by_id(snippet_id).await? {
            Some(listing) => Ok(Some(self.assemble_detail(listing).await?)),
            None => Ok(None),
        }
    }

    /// Whether a snippet exists, visibility regardless.
    pub async fn exists(&self, snippet_id: Uuid) -> Result<bool, AppError> {
        self.snippet_repo.exists(snippet_id).await
    }

    /// Lists all public snippets, newest first.
    pub async fn list_public(&self) -> Result<Vec<SnippetSummary>, AppError> {
        let listings = self.snippet_repo.list_public().await?;
        Ok(listings.into_iter().map(summary_from).collect())
    }

    /// Lists a user's snippets; private ones only when the requester is the
    /// author.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        requester: Option<Uuid>,
    ) -> Result<Vec<SnippetSummary>, AppError> {
        let include_private = requester == Some(user_id);
        let listings = self
            .snippet_repo
            .list_by_author(user_id, include_private)
            .await?;
        Ok(listings.into_iter().map(summary_from).collect())
    }

    /// Updates a snippet (author only).
    pub async fn update(
        &self,
        ctx: &RequestContext,
        snippet_id: Uuid,
        changes: UpdateSnippet,
    ) -> Result<SnippetSummary, AppError> {
        let mut snippet = self
            .snippet_repo
            .find_by_id(snippet_id)
            .await?
            .ok_or_else(|| AppError::not_found("Snippet not found"))?;

        if snippet.author_id != ctx.user_id {
            return Err(AppError::forbidden("Access denied"));
        }

        if let Some(title) = changes.title {
            snippet.title = title;
        }
        if let Some(description) = changes.description {
            snippet.description = description;
        }
        if let Some(language) = changes.language {
            snippet.language = language;
        }
        if let Some(code) = changes.code {
            snippet.code = code;
        }
        if let Some(visibility) = changes.visibility {
            snippet.visibility = visibility;
        }
        if let Some(tags) = changes.tags {
            snippet.tags = tags;
        }

        let updated = self.snippet_repo.update(&snippet).await?;

        info!(
            user_id = %ctx.user_id,
            snippet_id = %snippet_id,
            "Snippet updated"
        );

        let listing = self
            .snippet_repo
            .find_listing_by_id(updated.id)
            .await?
            .ok_or_else(|| AppError::internal("Snippet vanished after update"))?;

        Ok(summary_from(listing))
    }

    /// Deletes a snippet (author only). Comments, upvotes, and share codes
    /// go with it.
    pub async fn delete(&self, ctx: &RequestContext, snippet_id: Uuid) -> Result<(), AppError> {
        let snippet = self
            .snippet_repo
            .find_by_id(snippet_id)
            .await?
            .ok_or_else(|| AppError::not_found("Snippet not found"))?;

        if snippet.author_id != ctx.user_id {
            return Err(AppError::forbidden("Access denied"));
        }

        self.snippet_repo.delete(snippet_id).await?;

        info!(
            user_id = %ctx.user_id,
            snippet_id = %snippet_id,
            "Snippet deleted"
        );

        Ok(())
    }

    async fn assemble_detail(&self, listing: SnippetListing) -> Result<SnippetDetail, AppError> {
        let comments = self.comment_repo.list_for_snippet(listing.id).await?;
        Ok(SnippetDetail {
            summary: summary_from(listing),
            comments: comments.into_iter().map(comment_view_from).collect(),
        })
    }
}

fn summary_from(listing: SnippetListing) -> SnippetSummary {
    let author = listing.author();
    SnippetSummary {
        id: listing.id,
        title: listing.title,
        description: listing.description,
        language: listing.language,
        code: listing.code,
        visibility: listing.visibility,
        tags: listing.tags,
        author,
        comment_count: listing.comment_count,
        upvote_count: listing.upvote_count,
        created_at: listing.created_at,
        updated_at: listing.updated_at,
    }
}

fn comment_view_from(comment: CommentWithAuthor) -> CommentView {
    let author = comment.author();
    CommentView {
        id: comment.id,
        content: comment.content,
        author,
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}
