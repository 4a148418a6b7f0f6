//! Snippet CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use snipsync_core::error::AppError;
use snipsync_entity::snippet::{UpdateSnippet, Visibility};
use snipsync_service::snippet::{NewSnippetData, SnippetDetail, SnippetSummary};

use crate::dto::request::{CreateSnippetRequest, UpdateSnippetRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate_dto;
use crate::extractors::{AuthUser, OptionalAuthUser};
use crate::state::AppState;

/// POST /api/snippets
pub async fn create_snippet(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateSnippetRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SnippetSummary>>), AppError> {
    validate_dto(&req)?;

    let snippet = state
        .snippet_service
        .create(
            auth.context(),
            NewSnippetData {
                title: req.title,
                description: req.description,
                language: req.language,
                code: req.code,
                visibility: req.visibility.unwrap_or(Visibility::Public),
                tags: req.tags,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(snippet))))
}

/// GET /api/snippets/public
pub async fn list_public_snippets(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SnippetSummary>>>, AppError> {
    let snippets = state.snippet_service.list_public().await?;
    Ok(Json(ApiResponse::ok(snippets)))
}

/// GET /api/snippets/my
pub async fn list_my_snippets(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<SnippetSummary>>>, AppError> {
    let snippets = state
        .snippet_service
        .list_for_user(auth.user_id, Some(auth.user_id))
        .await?;
    Ok(Json(ApiResponse::ok(snippets)))
}

/// GET /api/snippets/user/{user_id}
pub async fn list_user_snippets(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<SnippetSummary>>>, AppError> {
    let snippets = state
        .snippet_service
        .list_for_user(user_id, viewer.user_id())
        .await?;
    Ok(Json(ApiResponse::ok(snippets)))
}

/// GET /api/snippets/{id}
pub async fn get_snippet(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SnippetDetail>>, AppError> {
    let detail = state.snippet_service.get(id, viewer.user_id()).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// PUT /api/snippets/{id}
pub async fn update_snippet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSnippetRequest>,
) -> Result<Json<ApiResponse<SnippetSummary>>, AppError> {
    validate_dto(&req)?;

    let snippet = state
        .snippet_service
        .update(
            auth.context(),
            id,
            UpdateSnippet {
                title: req.title,
                description: req.description.map(Some),
                language: req.language,
                code: req.code,
                visibility: req.visibility,
                tags: req.tags,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(snippet)))
}

/// DELETE /api/snippets/{id}
pub async fn delete_snippet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.snippet_service.delete(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Snippet deleted".to_string(),
    })))
}
