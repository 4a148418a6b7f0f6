//! Share-code handlers — the bridge between the platform and the editor
//! extension.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use snipsync_core::error::AppError;
use snipsync_service::share::IssuedCode;
use snipsync_service::snippet::SnippetDetail;

use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/snippets/{id}/generate-code
///
/// Public on purpose: any caller may mint a code for any existing snippet.
pub async fn generate_code(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApiResponse<IssuedCode>>), AppError> {
    let issued = state.share_code_service.issue_code(id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(issued))))
}

/// GET /api/snippets/import/{code}
///
/// 404 for unknown codes, 410 for known-but-expired ones so the extension
/// can tell the user to regenerate rather than retype.
pub async fn import_snippet(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<SnippetDetail>>, AppError> {
    let detail = state.share_code_service.resolve_code(&code).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// GET /api/snippets/{id}/share-code
///
/// Surfaces the snippet's currently usable code, if one exists.
pub async fn active_share_code(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<IssuedCode>>, AppError> {
    let issued = state
        .share_code_service
        .active_code_for(id)
        .await?
        .ok_or_else(|| AppError::not_found("No active share code for this snippet"))?;
    Ok(Json(ApiResponse::ok(issued)))
}
