//! In-memory share-code store.
//!
//! Backs the share-code service and worker unit tests, which exercise the
//! full expiry/retry state machine without a running PostgreSQL.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use snipsync_core::result::AppResult;
use snipsync_entity::share_code::{NewShareCode, ShareCode};

use super::{InsertOutcome, ShareCodeStore};

/// Share-code store over a mutex-guarded map keyed by row ID.
#[derive(Debug, Default)]
pub struct MemoryShareCodeStore {
    rows: Mutex<HashMap<Uuid, ShareCode>>,
}

impl MemoryShareCodeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently held. Test assertion helper.
    pub fn len(&self) -> usize {
        self.rows.lock().expect("store poisoned").len()
    }

    /// Whether the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ShareCodeStore for MemoryShareCodeStore {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<ShareCode>> {
        let rows = self.rows.lock().expect("store poisoned");
        Ok(rows.values().find(|r| r.code == code).cloned())
    }

    async fn insert(&self, new: NewShareCode) -> AppResult<InsertOutcome> {
        let mut rows = self.rows.lock().expect("store poisoned");
        if rows.values().any(|r| r.code == new.code) {
            return Ok(InsertOutcome::DuplicateCode);
        }
        let row = ShareCode {
            id: Uuid::new_v4(),
            code: new.code,
            snippet_id: new.snippet_id,
            created_at: new.created_at,
            expires_at: new.expires_at,
        };
        rows.insert(row.id, row.clone());
        Ok(InsertOutcome::Inserted(row))
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().expect("store poisoned");
        rows.remove(&id);
        Ok(())
    }

    async fn delete_expired_before(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut rows = self.rows.lock().expect("store poisoned");
        let before = rows.len();
        rows.retain(|_, r| r.expires_at >= now);
        Ok((before - rows.len()) as u64)
    }

    async fn find_active_for_snippet(
        &self,
        snippet_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ShareCode>> {
        let rows = self.rows.lock().expect("store poisoned");
        Ok(rows
            .values()
            .filter(|r| r.snippet_id == snippet_id && r.expires_at > now)
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn exists_active(&self, code: &str, now: DateTime<Utc>) -> AppResult<bool> {
        let rows = self.rows.lock().expect("store poisoned");
        Ok(rows.values().any(|r| r.code == code && r.expires_at > now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_code(code: &str, snippet_id: Uuid, now: DateTime<Utc>) -> NewShareCode {
        NewShareCode {
            code: code.to_string(),
            snippet_id,
            created_at: now,
            expires_at: now + Duration::minutes(5),
        }
    }

    #[tokio::test]
    async fn test_insert_reports_duplicates() {
        let store = MemoryShareCodeStore::new();
        let now = Utc::now();
        let snippet = Uuid::new_v4();

        let first = store.insert(new_code("abc123", snippet, now)).await.unwrap();
        assert!(matches!(first, InsertOutcome::Inserted(_)));

        let second = store.insert(new_code("abc123", snippet, now)).await.unwrap();
        assert!(matches!(second, InsertOutcome::DuplicateCode));
    }

    #[tokio::test]
    async fn test_exists_active_ignores_expired_rows() {
        let store = MemoryShareCodeStore::new();
        let now = Utc::now();
        store
            .insert(new_code("abc123", Uuid::new_v4(), now))
            .await
            .unwrap();

        assert!(store.exists_active("abc123", now).await.unwrap());
        // One second past expiry the value is free again.
        let later = now + Duration::minutes(5) + Duration::seconds(1);
        assert!(!store.exists_active("abc123", later).await.unwrap());
    }

    #[tokio::test]
    async fn test_sweep_removes_only_expired_rows() {
        let store = MemoryShareCodeStore::new();
        let now = Utc::now();
        store
            .insert(new_code("aaaaaa", Uuid::new_v4(), now - Duration::minutes(10)))
            .await
            .unwrap();
        store
            .insert(new_code("bbbbbb", Uuid::new_v4(), now))
            .await
            .unwrap();

        let removed = store.delete_expired_before(now).await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.find_by_code("bbbbbb").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_find_active_prefers_most_recent() {
        let store = MemoryShareCodeStore::new();
        let now = Utc::now();
        let snippet = Uuid::new_v4();

        store
            .insert(NewShareCode {
                code: "old111".to_string(),
                snippet_id: snippet,
                created_at: now - Duration::minutes(2),
                expires_at: now + Duration::minutes(3),
            })
            .await
            .unwrap();
        store
            .insert(NewShareCode {
                code: "new222".to_string(),
                snippet_id: snippet,
                created_at: now,
                expires_at: now + Duration::minutes(5),
            })
            .await
            .unwrap();

        let active = store
            .find_active_for_snippet(snippet, now)
            .await
            .unwrap()
            .expect("one active code");
        assert_eq!(active.code, "new222");
    }
}
