//! Snippet entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::AuthorSummary;

/// Who can see a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "snippet_visibility", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Listed publicly and readable by anyone.
    Public,
    /// Readable only by the author (and through an active share code).
    Private,
}

/// A stored unit of code with title, language, visibility, and ownership.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Snippet {
    /// Unique snippet identifier.
    pub id: Uuid,
    /// User who owns the snippet.
    pub author_id: Uuid,
    /// Snippet title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Programming language label.
    pub language: String,
    /// The snippet body itself.
    pub code: String,
    /// Visibility level.
    pub visibility: Visibility,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// When the snippet was created.
    pub created_at: DateTime<Utc>,
    /// When the snippet was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new snippet.
#[derive(Debug, Clone)]
pub struct CreateSnippet {
    /// Owning user.
    pub author_id: Uuid,
    /// Snippet title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Programming language label.
    pub language: String,
    /// The snippet body.
    pub code: String,
    /// Visibility level.
    pub visibility: Visibility,
    /// Free-form tags.
    pub tags: Vec<String>,
}

/// Field updates for an existing snippet. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateSnippet {
    /// New title.
    pub title: Option<String>,
    /// New description (`Some(None)` clears it).
    pub description: Option<Option<String>>,
    /// New language label.
    pub language: Option<String>,
    /// New snippet body.
    pub code: Option<String>,
    /// New visibility.
    pub visibility: Option<Visibility>,
    /// New tag set.
    pub tags: Option<Vec<String>>,
}

/// A snippet row joined with its author and aggregate counts.
///
/// Flat on purpose: this is the shape `query_as` maps a listing row into.
#[derive(Debug, Clone, FromRow)]
pub struct SnippetListing {
    /// Snippet ID.
    pub id: Uuid,
    /// Owning user.
    pub author_id: Uuid,
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
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
    /// Author's username.
    pub author_username: String,
    /// Author's profile picture URL.
    pub author_profile_picture: Option<String>,
    /// Number of comments on the snippet.
    pub comment_count: i64,
    /// Number of upvotes on the snippet.
    pub upvote_count: i64,
}

impl SnippetListing {
    /// Author fields as a nested summary.
    pub fn author(&self) -> AuthorSummary {
        AuthorSummary {
            id: self.author_id,
            username: self.author_username.clone(),
            profile_picture: self.author_profile_picture.clone(),
        }
    }
}
