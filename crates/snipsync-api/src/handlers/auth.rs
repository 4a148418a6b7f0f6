//! Signup, login, and current-user handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use snipsync_core::error::AppError;
use snipsync_service::auth::{LoginData, SignupData};

use crate::dto::request::{LoginRequest, SignupRequest};
use crate::dto::response::{ApiResponse, AuthResponse, UserResponse};
use crate::dto::validate_dto;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), AppError> {
    validate_dto(&req)?;

    let authed = state
        .auth_service
        .signup(SignupData {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AuthResponse {
            access_token: authed.token.access_token,
            expires_at: authed.token.expires_at,
            user: authed.user.into(),
        })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    validate_dto(&req)?;

    let authed = state
        .auth_service
        .login(LoginData {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        access_token: authed.token.access_token,
        expires_at: authed.token.expires_at,
        user: authed.user.into(),
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.auth_service.profile(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
