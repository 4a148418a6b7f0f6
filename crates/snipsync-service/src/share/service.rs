//! Share-code minting and resolution.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use snipsync_core::clock::Clock;
use snipsync_core::error::AppError;
use snipsync_database::repositories::share_code::{InsertOutcome, ShareCodeStore};
use snipsync_entity::share_code::NewShareCode;

use super::error::ShareCodeError;
use super::generator::CandidateSource;
use crate::snippet::{SnippetDetail, SnippetService};

/// How long a freshly minted code stays redeemable. Fixed, non-renewable.
const CODE_TTL_MINUTES: i64 = 5;

/// Upper bound on generate-and-persist attempts per issuance.
///
/// Purely defensive given the 36^6 keyspace; hitting it means either the
/// store holds an enormous share of the space or the candidate source is
/// broken.
const MAX_GENERATION_ATTEMPTS: u32 = 10;

/// A freshly minted code as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedCode {
    /// The six-character code value.
    pub code: String,
    /// When the code stops being redeemable.
    pub expires_at: DateTime<Utc>,
}

/// The slice of the snippet collaborator the share-code service consumes.
///
/// The service never mutates snippets; it checks existence before minting
/// and fetches the denormalized view at resolution. What that view contains
/// is the collaborator's concern.
#[async_trait]
pub trait SnippetLookup: Send + Sync {
    /// Whether a snippet with this ID exists.
    async fn exists(&self, snippet_id: Uuid) -> Result<bool, AppError>;

    /// The full snippet view, with no visibility filtering.
    async fn detail_by_id(&self, snippet_id: Uuid) -> Result<Option<SnippetDetail>, AppError>;
}

#[async_trait]
impl SnippetLookup for SnippetService {
    async fn exists(&self, snippet_id: Uuid) -> Result<bool, AppError> {
        SnippetService::exists(self, snippet_id).await
    }

    async fn detail_by_id(&self, snippet_id: Uuid) -> Result<Option<SnippetDetail>, AppError> {
        SnippetService::detail_by_id(self, snippet_id).await
    }
}

/// Mints and resolves temporary share codes.
pub struct ShareCodeService {
    /// Share-code persistence.
    store: Arc<dyn ShareCodeStore>,
    /// Snippet collaborator.
    snippets: Arc<dyn SnippetLookup>,
    /// Candidate code source.
    generator: Arc<dyn CandidateSource>,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ShareCodeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareCodeService").finish()
    }
}

impl ShareCodeService {
    /// Creates a new share-code service.
    pub fn new(
        store: Arc<dyn ShareCodeStore>,
        snippets: Arc<dyn SnippetLookup>,
        generator: Arc<dyn CandidateSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            snippets,
            generator,
            clock,
        }
    }

    /// Mints a new share code for a snippet.
    ///
    /// Deliberately not ownership-scoped: any caller may mint a code for any
    /// existing snippet. Multiple simultaneously active codes per snippet
    /// are permitted.
    ///
    /// Collisions are handled optimistically: each attempt probes for an
    /// active duplicate, inserts, and treats a lost insert race as one more
    /// failed attempt. The uniqueness invariant itself lives in the store's
    /// constraint, not here.
    pub async fn issue_code(&self, snippet_id: Uuid) -> Result<IssuedCode, ShareCodeError> {
        if !self.snippets.exists(snippet_id).await? {
            return Err(ShareCodeError::SnippetNotFound);
        }

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let candidate = self.generator.candidate();
            let now = self.clock.now();

            if self.store.exists_active(&candidate, now).await? {
                debug!(attempt, code = %candidate, "Share-code candidate collided");
                continue;
            }

            let new = NewShareCode {
                code: candidate,
                snippet_id,
                created_at: now,
                expires_at: now + Duration::minutes(CODE_TTL_MINUTES),
            };

            match self.store.insert(new).await? {
                InsertOutcome::Inserted(row) => {
                    info!(
                        snippet_id = %snippet_id,
                        code = %row.code,
                        expires_at = %row.expires_at,
                        "Share code issued"
                    );
                    return Ok(IssuedCode {
                        code: row.code,
                        expires_at: row.expires_at,
                    });
                }
                InsertOutcome::DuplicateCode => {
                    debug!(attempt, "Share-code insert lost a race, retrying");
                    continue;
                }
            }
        }

        Err(ShareCodeError::GenerationExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }

    /// Resolves a code to the snippet it points at.
    ///
    /// An expired row is deleted on the spot (lazy cleanup) and reported as
    /// [`ShareCodeError::CodeExpired`] — distinct from `CodeNotFound` so the
    /// caller can prompt for regeneration. Resolution never consumes the
    /// code; it stays redeemable until expiry.
    pub async fn resolve_code(&self, code: &str) -> Result<SnippetDetail, ShareCodeError> {
        let row = self
            .store
            .find_by_code(code)
            .await?
            .ok_or(ShareCodeError::CodeNotFound)?;

        if row.is_expired(self.clock.now()) {
            self.store.delete_by_id(row.id).await?;
            debug!(code = %row.code, "Expired share code deleted on read");
            return Err(ShareCodeError::CodeExpired);
        }

        // Snippet deletion cascades to its codes, so a live row without a
        // snippet means the delete landed between our two reads.
        self.snippets
            .detail_by_id(row.snippet_id)
            .await?
            .ok_or(ShareCodeError::SnippetNotFound)
    }

    /// The currently active code for a snippet, if one exists.
    ///
    /// When several codes are active, the most recently minted wins.
    pub async fn active_code_for(
        &self,
        snippet_id: Uuid,
    ) -> Result<Option<IssuedCode>, ShareCodeError> {
        if !self.snippets.exists(snippet_id).await? {
            return Err(ShareCodeError::SnippetNotFound);
        }

        let row = self
            .store
            .find_active_for_snippet(snippet_id, self.clock.now())
            .await?;

        Ok(row.map(|r| IssuedCode {
            code: r.code,
            expires_at: r.expires_at,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    use snipsync_database::repositories::share_code::MemoryShareCodeStore;
    use snipsync_entity::snippet::Visibility;
    use snipsync_entity::user::AuthorSummary;

    use crate::share::generator::{CODE_ALPHABET, CODE_LENGTH, RandomCodeGenerator};
    use crate::snippet::SnippetSummary;

    /// Clock that only moves when a test advances it.
    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn new(start: DateTime<Utc>) -> Self {
            Self {
                now: Mutex::new(start),
            }
        }

        fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    /// Candidate source that replays a fixed script, then panics.
    struct ScriptedGenerator {
        script: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(codes: &[&str]) -> Self {
            Self {
                script: Mutex::new(codes.iter().rev().map(|c| c.to_string()).collect()),
            }
        }
    }

    impl CandidateSource for ScriptedGenerator {
        fn candidate(&self) -> String {
            self.script
                .lock()
                .unwrap()
                .pop()
                .expect("scripted generator ran out of candidates")
        }
    }

    /// Snippet collaborator stub backed by a set of known IDs.
    struct StubSnippets {
        known: HashSet<Uuid>,
    }

    impl StubSnippets {
        fn with(ids: &[Uuid]) -> Self {
            Self {
                known: ids.iter().copied().collect(),
            }
        }
    }

    #[async_trait]
    impl SnippetLookup for StubSnippets {
        async fn exists(&self, snippet_id: Uuid) -> Result<bool, AppError> {
            Ok(self.known.contains(&snippet_id))
        }

        async fn detail_by_id(
            &self,
            snippet_id: Uuid,
        ) -> Result<Option<SnippetDetail>, AppError> {
            if !self.known.contains(&snippet_id) {
                return Ok(None);
            }
            let now = Utc::now();
            Ok(Some(SnippetDetail {
                summary: SnippetSummary {
                    id: snippet_id,
                    title: "hello".to_string(),
                    description: None,
                    language: "rust".to_string(),
                    code: "fn main() {}".to_string(),
                    visibility: Visibility::Public,
                    tags: vec![],
                    author: AuthorSummary {
                        id: Uuid::new_v4(),
                        username: "alice".to_string(),
                        profile_picture: None,
                    },
                    comment_count: 0,
                    upvote_count: 0,
                    created_at: now,
                    updated_at: now,
                },
                comments: vec![],
            }))
        }
    }

    struct Harness {
        service: ShareCodeService,
        store: Arc<MemoryShareCodeStore>,
        clock: Arc<ManualClock>,
        snippet_id: Uuid,
    }

    fn harness_with_generator(generator: Arc<dyn CandidateSource>) -> Harness {
        let snippet_id = Uuid::new_v4();
        let store = Arc::new(MemoryShareCodeStore::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let service = ShareCodeService::new(
            Arc::clone(&store) as Arc<dyn ShareCodeStore>,
            Arc::new(StubSnippets::with(&[snippet_id])),
            generator,
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        Harness {
            service,
            store,
            clock,
            snippet_id,
        }
    }

    fn harness() -> Harness {
        harness_with_generator(Arc::new(RandomCodeGenerator::new()))
    }

    #[tokio::test]
    async fn test_issued_code_shape_and_expiry() {
        let h = harness();
        let t0 = h.clock.now();

        let issued = h.service.issue_code(h.snippet_id).await.unwrap();

        assert_eq!(issued.code.len(), CODE_LENGTH);
        assert!(issued.code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        assert_eq!(issued.expires_at, t0 + Duration::minutes(5));
    }

    #[tokio::test]
    async fn test_resolve_just_before_expiry_then_expired_then_gone() {
        let h = harness();
        let issued = h.service.issue_code(h.snippet_id).await.unwrap();

        // t = 299s: still valid.
        h.clock.advance(Duration::seconds(299));
        let detail = h.service.resolve_code(&issued.code).await.unwrap();
        assert_eq!(detail.summary.id, h.snippet_id);

        // t = 301s: expired, and the read deletes the row.
        h.clock.advance(Duration::seconds(2));
        let err = h.service.resolve_code(&issued.code).await.unwrap_err();
        assert!(matches!(err, ShareCodeError::CodeExpired));
        assert!(h.store.find_by_code(&issued.code).await.unwrap().is_none());

        // t = 302s: the row is gone, so now it is simply not found.
        h.clock.advance(Duration::seconds(1));
        let err = h.service.resolve_code(&issued.code).await.unwrap_err();
        assert!(matches!(err, ShareCodeError::CodeNotFound));
    }

    #[tokio::test]
    async fn test_resolve_at_exact_expiry_is_expired() {
        let h = harness();
        let issued = h.service.issue_code(h.snippet_id).await.unwrap();

        h.clock.advance(Duration::minutes(5));
        let err = h.service.resolve_code(&issued.code).await.unwrap_err();
        assert!(matches!(err, ShareCodeError::CodeExpired));
    }

    #[tokio::test]
    async fn test_code_redeemable_multiple_times_within_window() {
        let h = harness();
        let issued = h.service.issue_code(h.snippet_id).await.unwrap();

        h.service.resolve_code(&issued.code).await.unwrap();
        h.clock.advance(Duration::minutes(2));
        h.service.resolve_code(&issued.code).await.unwrap();
        h.service.resolve_code(&issued.code).await.unwrap();
    }

    #[tokio::test]
    async fn test_multiple_active_codes_are_independent() {
        let h = harness();

        let first = h.service.issue_code(h.snippet_id).await.unwrap();
        h.clock.advance(Duration::seconds(10));
        let second = h.service.issue_code(h.snippet_id).await.unwrap();
        assert_ne!(first.code, second.code);

        // Drop the first row; the second must be unaffected.
        let first_row = h
            .store
            .find_by_code(&first.code)
            .await
            .unwrap()
            .expect("first code stored");
        h.store.delete_by_id(first_row.id).await.unwrap();

        assert!(matches!(
            h.service.resolve_code(&first.code).await.unwrap_err(),
            ShareCodeError::CodeNotFound
        ));
        h.service.resolve_code(&second.code).await.unwrap();
    }

    #[tokio::test]
    async fn test_issue_for_missing_snippet_persists_nothing() {
        let h = harness();
        let err = h.service.issue_code(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ShareCodeError::SnippetNotFound));
        assert!(h.store.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_never_issued_code() {
        let h = harness();
        let err = h.service.resolve_code("zzz999").await.unwrap_err();
        assert!(matches!(err, ShareCodeError::CodeNotFound));
    }

    #[tokio::test]
    async fn test_generator_collisions_are_retried() {
        let h = harness_with_generator(Arc::new(ScriptedGenerator::new(&[
            "dup111", "dup111", "dup111", "fresh2",
        ])));

        // Occupy "dup111" so later candidates collide against it.
        let occupied = h.service.issue_code(h.snippet_id).await.unwrap();
        assert_eq!(occupied.code, "dup111");

        // The next issuance draws "dup111" twice before a unique candidate.
        let issued = h.service.issue_code(h.snippet_id).await.unwrap();
        assert_eq!(issued.code, "fresh2");
        assert_ne!(issued.code, occupied.code);
    }

    #[tokio::test]
    async fn test_lost_insert_race_is_retried() {
        // An expired row still occupies the unique index until cleanup, so
        // the active-collision probe passes but the insert reports a
        // duplicate. The service must shrug and take the next candidate.
        let h = harness_with_generator(Arc::new(ScriptedGenerator::new(&["stale1", "live22"])));
        let t0 = h.clock.now();
        h.store
            .insert(NewShareCode {
                code: "stale1".to_string(),
                snippet_id: h.snippet_id,
                created_at: t0 - Duration::minutes(10),
                expires_at: t0 - Duration::minutes(5),
            })
            .await
            .unwrap();

        let issued = h.service.issue_code(h.snippet_id).await.unwrap();
        assert_eq!(issued.code, "live22");
    }

    #[tokio::test]
    async fn test_ten_collisions_exhaust_generation() {
        let script = vec!["taken1"; 10];
        let h = harness_with_generator(Arc::new(ScriptedGenerator::new(&script)));

        let t0 = h.clock.now();
        h.store
            .insert(NewShareCode {
                code: "taken1".to_string(),
                snippet_id: h.snippet_id,
                created_at: t0,
                expires_at: t0 + Duration::minutes(5),
            })
            .await
            .unwrap();

        let err = h.service.issue_code(h.snippet_id).await.unwrap_err();
        assert!(matches!(
            err,
            ShareCodeError::GenerationExhausted { attempts: 10 }
        ));
        // Nothing new was persisted.
        assert_eq!(h.store.len(), 1);
    }

    #[tokio::test]
    async fn test_active_codes_never_share_a_value() {
        let h = harness();
        let mut seen = HashSet::new();
        for _ in 0..30 {
            let issued = h.service.issue_code(h.snippet_id).await.unwrap();
            assert!(seen.insert(issued.code.clone()), "duplicate active code");
        }
    }

    #[tokio::test]
    async fn test_active_code_for_surfaces_most_recent() {
        let h = harness();

        assert!(h.service.active_code_for(h.snippet_id).await.unwrap().is_none());

        h.service.issue_code(h.snippet_id).await.unwrap();
        h.clock.advance(Duration::seconds(10));
        let second = h.service.issue_code(h.snippet_id).await.unwrap();

        let active = h
            .service
            .active_code_for(h.snippet_id)
            .await
            .unwrap()
            .expect("an active code");
        assert_eq!(active.code, second.code);

        // Once both expire there is no active code, even though rows may
        // still be awaiting cleanup.
        h.clock.advance(Duration::minutes(5));
        assert!(h.service.active_code_for(h.snippet_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_active_code_for_missing_snippet() {
        let h = harness();
        let err = h.service.active_code_for(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ShareCodeError::SnippetNotFound));
    }
}
