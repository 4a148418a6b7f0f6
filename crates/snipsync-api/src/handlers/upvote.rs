//! Upvote handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use uuid::Uuid;

use snipsync_core::error::AppError;
use snipsync_service::upvote::ToggleResult;

use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Whether the caller upvotes a snippet.
#[derive(Debug, Clone, Serialize)]
pub struct UpvoteStatus {
    /// True when the caller's upvote exists.
    pub upvoted: bool,
}

/// POST /api/snippets/{id}/upvote
pub async fn toggle_upvote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(snippet_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ToggleResult>>, AppError> {
    let result = state
        .upvote_service
        .toggle(auth.context(), snippet_id)
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/snippets/{id}/upvote
pub async fn upvote_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(snippet_id): Path<Uuid>,
) -> Result<Json<ApiResponse<UpvoteStatus>>, AppError> {
    let upvoted = state
        .upvote_service
        .has_upvoted(auth.context(), snippet_id)
        .await?;
    Ok(Json(ApiResponse::ok(UpvoteStatus { upvoted })))
}
