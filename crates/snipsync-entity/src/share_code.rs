//! Share-code entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A short-lived token granting time-boxed read access to one snippet.
///
/// Rows are immutable after creation. A row past `expires_at` is logically
/// dead: read paths treat it as absent and delete it, which frees the code
/// value for reuse.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShareCode {
    /// Unique row identifier.
    pub id: Uuid,
    /// The six-character code value, unique among stored rows.
    pub code: String,
    /// Snippet the code grants access to.
    pub snippet_id: Uuid,
    /// When the code was minted.
    pub created_at: DateTime<Utc>,
    /// When the code stops being redeemable. Fixed at creation.
    pub expires_at: DateTime<Utc>,
}

impl ShareCode {
    /// Whether the code is past its validity window at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Data required to persist a freshly generated share code.
#[derive(Debug, Clone)]
pub struct NewShareCode {
    /// The candidate code value.
    pub code: String,
    /// Snippet the code grants access to.
    pub snippet_id: Uuid,
    /// Mint time.
    pub created_at: DateTime<Utc>,
    /// Expiry, computed by the service as mint time + the fixed window.
    pub expires_at: DateTime<Utc>,
}
