//! Login and the current-user profile.

use axum::{extract::State, Json};

use super::HandlerResult;
use crate::db::services;
use crate::http::dto::{LoginRequest, MeResponse, TokenResponse};
use crate::http::error::AppError;
use crate::http::extract::{ApiJson, CurrentUser};
use crate::http::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> HandlerResult<TokenResponse> {
    let user = services::authenticate(
        state.repository.as_ref(),
        &request.username,
        &request.password,
    )
    .await?
    .ok_or_else(|| AppError::Unauthorized("Incorrect username or password".to_string()))?;

    let token = state
        .tokens
        .issue(user.id)
        .map_err(|e| AppError::Internal(format!("token signing failed: {}", e)))?;
    Ok(Json(TokenResponse::bearer(token)))
}

/// GET /api/auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> HandlerResult<MeResponse> {
    Ok(Json(user.into()))
}
