//! Comment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::AuthorSummary;

/// A comment left on a snippet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: Uuid,
    /// Snippet the comment belongs to.
    pub snippet_id: Uuid,
    /// User who wrote the comment.
    pub author_id: Uuid,
    /// Comment text.
    pub content: String,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
    /// When the comment was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A comment row joined with its author.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    /// Comment ID.
    pub id: Uuid,
    /// Snippet the comment belongs to.
    pub snippet_id: Uuid,
    /// Comment author.
    pub author_id: Uuid,
    /// Comment text.
    pub content: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
    /// Author's username.
    pub author_username: String,
    /// Author's profile picture URL.
    pub author_profile_picture: Option<String>,
}

impl CommentWithAuthor {
    /// Author fields as a nested summary.
    pub fn author(&self) -> AuthorSummary {
        AuthorSummary {
            id: self.author_id,
            username: self.author_username.clone(),
            profile_picture: self.author_profile_picture.clone(),
        }
    }
}
