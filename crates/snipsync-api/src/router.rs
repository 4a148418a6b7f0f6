//! Route definitions for the SnipSync HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(snippet_routes())
        .merge(comment_routes())
        .merge(user_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: signup, login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Snippet CRUD, upvotes, and the share-code bridge
fn snippet_routes() -> Router<AppState> {
    Router::new()
        .route("/snippets", post(handlers::snippet::create_snippet))
        .route("/snippets/public", get(handlers::snippet::list_public_snippets))
        .route("/snippets/my", get(handlers::snippet::list_my_snippets))
        .route(
            "/snippets/user/{user_id}",
            get(handlers::snippet::list_user_snippets),
        )
        // Share-code bridge for the editor extension. Import sits under a
        // static segment so it never collides with /snippets/{id}.
        .route("/snippets/import/{code}", get(handlers::share::import_snippet))
        .route(
            "/snippets/{id}/generate-code",
            post(handlers::share::generate_code),
        )
        .route(
            "/snippets/{id}/share-code",
            get(handlers::share::active_share_code),
        )
        .route("/snippets/{id}", get(handlers::snippet::get_snippet))
        .route("/snippets/{id}", put(handlers::snippet::update_snippet))
        .route("/snippets/{id}", delete(handlers::snippet::delete_snippet))
        .route("/snippets/{id}/upvote", post(handlers::upvote::toggle_upvote))
        .route("/snippets/{id}/upvote", get(handlers::upvote::upvote_status))
        .route(
            "/snippets/{id}/comments",
            post(handlers::comment::create_comment),
        )
        .route(
            "/snippets/{id}/comments",
            get(handlers::comment::list_comments),
        )
}

/// Standalone comment endpoints
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments/{id}", put(handlers::comment::update_comment))
        .route("/comments/{id}", delete(handlers::comment::delete_comment))
}

/// Public user profiles
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/{id}", get(handlers::user::get_user))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/db", get(handlers::health::health_db))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use http::Method;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}
