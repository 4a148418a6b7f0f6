//! SnipSync Server — code snippet sharing platform
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use snipsync_core::clock::{Clock, SystemClock};
use snipsync_core::config::AppConfig;
use snipsync_core::error::AppError;
use snipsync_database::repositories::comment::CommentRepository;
use snipsync_database::repositories::share_code::{PgShareCodeStore, ShareCodeStore};
use snipsync_database::repositories::snippet::SnippetRepository;
use snipsync_database::repositories::upvote::UpvoteRepository;
use snipsync_database::repositories::user::UserRepository;
use snipsync_service::share::{RandomCodeGenerator, ShareCodeService, SnippetLookup};
use snipsync_worker::jobs::cleanup::ShareCodeSweepJob;

#[tokio::main]
async fn main() {
    let env = std::env::var("SNIPSYNC_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting SnipSync v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = snipsync_database::connection::create_pool(&config.database).await?;
    snipsync_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let snippet_repo = Arc::new(SnippetRepository::new(db_pool.clone()));
    let comment_repo = Arc::new(CommentRepository::new(db_pool.clone()));
    let upvote_repo = Arc::new(UpvoteRepository::new(db_pool.clone()));
    let share_code_store: Arc<dyn ShareCodeStore> =
        Arc::new(PgShareCodeStore::new(db_pool.clone()));

    // ── Step 3: Auth primitives ──────────────────────────────────
    let password_hasher = Arc::new(snipsync_auth::password::hasher::PasswordHasher::new());
    let password_validator = Arc::new(snipsync_auth::password::validator::PasswordValidator::new(
        &config.auth,
    ));
    let jwt_encoder = Arc::new(snipsync_auth::jwt::encoder::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(snipsync_auth::jwt::decoder::JwtDecoder::new(&config.auth));

    // ── Step 4: Services ─────────────────────────────────────────
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
        Arc::clone(&clock),
    ));
    let comment_service = Arc::new(snipsync_service::comment::CommentService::new(
        Arc::clone(&comment_repo),
        Arc::clone(&snippet_repo),
    ));
    let upvote_service = Arc::new(snipsync_service::upvote::UpvoteService::new(
        Arc::clone(&upvote_repo),
        Arc::clone(&snippet_repo),
    ));

    // ── Step 5: Background worker ────────────────────────────────
    let scheduler = if config.worker.enabled {
        let sweep = Arc::new(ShareCodeSweepJob::new(
            Arc::clone(&share_code_store),
            Arc::clone(&clock),
        ));

        let scheduler = snipsync_worker::CronScheduler::new(config.worker.clone()).await?;
        scheduler.register_default_tasks(sweep).await?;
        scheduler.start().await?;

        tracing::info!("Background worker started");
        Some(scheduler)
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    // ── Step 6: Build and start HTTP server ──────────────────────
    let app_state = snipsync_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        jwt_decoder,
        auth_service,
        snippet_service,
        share_code_service,
        comment_service,
        upvote_service,
    };

    let app = snipsync_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("SnipSync server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 7: Stop background tasks ────────────────────────────
    if let Some(mut scheduler) = scheduler {
        scheduler.shutdown().await?;
    }

    db_pool.close().await;
    tracing::info!("SnipSync server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
