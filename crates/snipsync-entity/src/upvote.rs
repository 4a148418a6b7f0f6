//! Upvote entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single user's upvote on a snippet.
///
/// `(snippet_id, user_id)` is unique — a user upvotes a snippet at most once.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Upvote {
    /// Unique upvote identifier.
    pub id: Uuid,
    /// Upvoted snippet.
    pub snippet_id: Uuid,
    /// Upvoting user.
    pub user_id: Uuid,
    /// When the upvote was cast.
    pub created_at: DateTime<Utc>,
}
