//! Comment handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use snipsync_core::error::AppError;
use snipsync_entity::comment::Comment;
use snipsync_service::snippet::CommentView;

use crate::dto::request::CommentRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate_dto;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/snippets/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(snippet_id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Comment>>), AppError> {
    validate_dto(&req)?;

    let comment = state
        .comment_service
        .create(auth.context(), snippet_id, &req.content)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(comment))))
}

/// GET /api/snippets/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(snippet_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<CommentView>>>, AppError> {
    let comments = state.comment_service.list_for_snippet(snippet_id).await?;
    Ok(Json(ApiResponse::ok(comments)))
}

/// PUT /api/comments/{id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> Result<Json<ApiResponse<Comment>>, AppError> {
    validate_dto(&req)?;

    let comment = state
        .comment_service
        .update(auth.context(), id, &req.content)
        .await?;

    Ok(Json(ApiResponse::ok(comment)))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.comment_service.delete(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Comment deleted".to_string(),
    })))
}
