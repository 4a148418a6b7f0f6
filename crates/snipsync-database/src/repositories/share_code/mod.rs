//! Share-code persistence interface and implementations.
//!
//! The store is the one shared mutable resource in the share-code
//! subsystem. Uniqueness of the `code` column is delegated to the backing
//! engine's constraint enforcement, never to application-level locking: a
//! lost insert race surfaces as [`InsertOutcome::DuplicateCode`] and the
//! service retries with a fresh candidate.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use snipsync_core::result::AppResult;
use snipsync_entity::share_code::{NewShareCode, ShareCode};

pub use memory::MemoryShareCodeStore;
pub use postgres::PgShareCodeStore;

/// Result of attempting to persist a freshly generated code.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    /// The row was written.
    Inserted(ShareCode),
    /// Another row already holds this code value; the caller should retry
    /// with a new candidate.
    DuplicateCode,
}

/// Persistence interface over share-code rows.
#[async_trait]
pub trait ShareCodeStore: Send + Sync + 'static {
    /// Exact-match lookup with **no** expiry filtering.
    ///
    /// Callers check `expires_at` themselves: "found but expired" triggers a
    /// lazy delete, which is distinguishable from "not found".
    async fn find_by_code(&self, code: &str) -> AppResult<Option<ShareCode>>;

    /// Insert a new row, reporting a duplicate instead of erroring so the
    /// generate-and-persist loop can retry.
    async fn insert(&self, new: NewShareCode) -> AppResult<InsertOutcome>;

    /// Remove a row by ID. Idempotent — deleting an already-deleted row is
    /// not an error (a lazy delete may race the periodic sweep).
    async fn delete_by_id(&self, id: Uuid) -> AppResult<()>;

    /// Bulk-remove every row with `expires_at < now`. Returns the number of
    /// rows removed. Used by the periodic sweep.
    async fn delete_expired_before(&self, now: DateTime<Utc>) -> AppResult<u64>;

    /// Most recently created non-expired row for a snippet, if any.
    async fn find_active_for_snippet(
        &self,
        snippet_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ShareCode>>;

    /// Whether a non-expired row with this code value exists.
    ///
    /// Scoped to active rows on purpose: an expired code's value is free for
    /// reuse even before cleanup has removed the row.
    async fn exists_active(&self, code: &str, now: DateTime<Utc>) -> AppResult<bool>;
}
