//! Shared test helpers for integration tests.
//!
//! These tests exercise the full router against a real PostgreSQL. Set
//! `SNIPSYNC_TEST_DATABASE_URL` to run them; without it every test prints a
//! skip notice and passes vacuously.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use snipsync_core::clock::{Clock, SystemClock};
use snipsync_core::config::AppConfig;
use snipsync_core::config::app::{CorsConfig, ServerConfig};
use snipsync_core::config::auth::AuthConfig;
use snipsync_core::config::database::DatabaseConfig;
use snipsync_core::config::logging::LoggingConfig;
use snipsync_core::config::worker::WorkerConfig;
use snipsync_database::repositories::comment::CommentRepository;
use snipsync_database::repositories::share_code::{PgShareCodeStore, ShareCodeStore};
use snipsync_database::repositories::snippet::SnippetRepository;
use snipsync_database::repositories::upvote::UpvoteRepository;
use snipsync_database::repositories::user::UserRepository;
use snipsync_service::share::{RandomCodeGenerator, ShareCodeService, SnippetLookup};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
}

impl TestApp {
    /// Create a new test application, or `None` when no test database is
    /// configured/reachable.
    pub async fn try_new() -> Option<Self> {
        let Ok(url) = std::env::var("SNIPSYNC_TEST_DATABASE_URL") else {
            eprintln!("SNIPSYNC_TEST_DATABASE_URL not set; skipping integration test");
            return None;
        };

        let config = test_config(url);

        let db_pool = match snipsync_database::connection::create_pool(&config.database).await {
            Ok(pool) => pool,
            Err(e) => {
                eprintln!("Test database unreachable ({e}); skipping integration test");
                return None;
            }
        };

        snipsync_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let snippet_repo = Arc::new(SnippetRepository::new(db_pool.clone()));
        let comment_repo = Arc::new(CommentRepository::new(db_pool.clone()));
        let upvote_repo = Arc::new(UpvoteRepository::new(db_pool.clone()));
        let share_code_store: Arc<dyn ShareCodeStore> =
            Arc::new(PgShareCodeStore::new(db_pool.clone()));

        let password_hasher = Arc::new(snipsync_auth::password::hasher::PasswordHasher::new());
        let password_validator = Arc::new(
            snipsync_auth::password::validator::PasswordValidator::new(&config.auth),
        );
        let jwt_encoder = Arc::new(snipsync_auth::jwt::encoder::JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(snipsync_auth::jwt::decoder::JwtDecoder::new(&config.auth));

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let auth_service = Arc::new(snipsync_service::auth::AuthService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&password_validator),
            Arc::clone(&jwt_encoder),
        ));
        let snippet_service = Arc::new(snipsync_service::snippet::SnippetService::new(
            Arc::clone(&snippet_repo),
            Arc::clone(&comment_repo),
        ));
        let share_code_service = Arc::new(ShareCodeService::new(
            Arc::clone(&share_code_store),
            Arc::clone(&snippet_service) as Arc<dyn SnippetLookup>,
            Arc::new(RandomCodeGenerator::new()),
            clock,
        ));
        let comment_service = Arc::new(snipsync_service::comment::CommentService::new(
            Arc::clone(&comment_repo),
            Arc::clone(&snippet_repo),
        ));
        let upvote_service = Arc::new(snipsync_service::upvote::UpvoteService::new(
            Arc::clone(&upvote_repo),
            Arc::clone(&snippet_repo),
        ));

        let app_state = snipsync_api::state::AppState {
            config: Arc::new(config),
            db_pool: db_pool.clone(),
            jwt_decoder,
            auth_service,
            snippet_service,
            share_code_service,
            comment_service,
            upvote_service,
        };

        let router = snipsync_api::router::build_router(app_state);

        Some(Self { router, db_pool })
    }

    /// Register a fresh user and return `(access_token, user_id)`.
    ///
    /// Usernames are randomized so tests never collide on unique columns.
    pub async fn signup(&self) -> (String, Uuid) {
        let suffix = &Uuid::new_v4().simple().to_string()[..8];
        let username = format!("user_{suffix}");

        let response = self
            .request(
                "POST",
                "/api/auth/signup",
                Some(serde_json::json!({
                    "username": username,
                    "email": format!("{username}@test.com"),
                    "password": "vT9#mQx4!kRw7zP2",
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Signup failed: {:?}",
            response.body
        );

        let token = response.body["data"]["access_token"]
            .as_str()
            .expect("No access_token in signup response")
            .to_string();
        let user_id = response.body["data"]["user"]["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("No user id in signup response");

        (token, user_id)
    }

    /// Create a snippet and return its ID.
    pub async fn create_snippet(&self, token: &str, visibility: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/snippets",
                Some(serde_json::json!({
                    "title": "Quicksort",
                    "description": "Classic pivot partitioning",
                    "language": "rust",
                    "code": "fn sort(v: &mut Vec<i32>) { v.sort(); }",
                    "visibility": visibility,
                    "tags": ["algorithms", "sorting"],
                })),
                Some(token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Snippet creation failed: {:?}",
            response.body
        );

        response.body["data"]["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("No snippet id in response")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

fn test_config(url: String) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors: CorsConfig::default(),
        },
        database: DatabaseConfig {
            url,
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 5,
            idle_timeout_seconds: 60,
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            access_ttl_hours: 1,
            min_password_score: 3,
        },
        worker: WorkerConfig {
            enabled: false,
            ..WorkerConfig::default()
        },
        logging: LoggingConfig::default(),
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
