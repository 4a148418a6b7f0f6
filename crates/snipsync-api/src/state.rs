//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use snipsync_auth::jwt::decoder::JwtDecoder;
use snipsync_core::config::AppConfig;
use snipsync_service::auth::AuthService;
use snipsync_service::comment::CommentService;
use snipsync_service::share::ShareCodeService;
use snipsync_service::snippet::SnippetService;
use snipsync_service::upvote::UpvoteService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Account service.
    pub auth_service: Arc<AuthService>,
    /// Snippet service.
    pub snippet_service: Arc<SnippetService>,
    /// Share-code service.
    pub share_code_service: Arc<ShareCodeService>,
    /// Comment service.
    pub comment_service: Arc<CommentService>,
    /// Upvote service.
    pub upvote_service: Arc<UpvoteService>,
}
