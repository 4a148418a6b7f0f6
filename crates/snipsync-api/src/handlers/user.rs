//! Public user profile handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use snipsync_core::error::AppError;

use crate::dto::response::{ApiResponse, UserResponse};
use crate::state::AppState;

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.auth_service.profile(id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
