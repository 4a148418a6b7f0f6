//! Expired share-code sweep.

use std::sync::Arc;

use tracing;

use snipsync_core::clock::Clock;
use snipsync_core::error::AppError;
use snipsync_database::repositories::share_code::ShareCodeStore;

/// Deletes every share code whose expiry has passed.
pub struct ShareCodeSweepJob {
    /// Share-code store.
    store: Arc<dyn ShareCodeStore>,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ShareCodeSweepJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareCodeSweepJob").finish()
    }
}

impl ShareCodeSweepJob {
    /// Create a new sweep job.
    pub fn new(store: Arc<dyn ShareCodeStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Run one sweep pass. Returns the number of rows removed.
    pub async fn run(&self) -> Result<u64, AppError> {
        let now = self.clock.now();
        let removed = self.store.delete_expired_before(now).await?;

        if removed > 0 {
            tracing::info!(removed, "Swept expired share codes");
        } else {
            tracing::debug!("Share-code sweep found nothing to remove");
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use snipsync_core::clock::SystemClock;
    use snipsync_database::repositories::share_code::MemoryShareCodeStore;
    use snipsync_entity::share_code::NewShareCode;
    use uuid::Uuid;

    fn new_code(code: &str, expires_at: DateTime<Utc>) -> NewShareCode {
        NewShareCode {
            code: code.to_string(),
            snippet_id: Uuid::new_v4(),
            created_at: expires_at - Duration::minutes(5),
            expires_at,
        }
    }

    #[tokio::test]
    async fn test_sweep_removes_expired_and_keeps_live() {
        let store = Arc::new(MemoryShareCodeStore::new());
        let now = Utc::now();

        store.insert(new_code("old111", now - Duration::minutes(1))).await.unwrap();
        store.insert(new_code("old222", now - Duration::hours(2))).await.unwrap();
        store.insert(new_code("live33", now + Duration::minutes(4))).await.unwrap();

        let job = ShareCodeSweepJob::new(
            Arc::clone(&store) as Arc<dyn ShareCodeStore>,
            Arc::new(SystemClock),
        );

        let removed = job.run().await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);

        // A second pass is a no-op: the sweep is idempotent.
        let removed = job.run().await.unwrap();
        assert_eq!(removed, 0);
    }
}
