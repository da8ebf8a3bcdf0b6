use axum::{extract::State, Json};

use super::HandlerResult;
use crate::db::services;
use crate::http::dto::SettingsPayload;
use crate::http::extract::{ApiJson, CurrentUser};
use crate::http::state::AppState;

/// GET /api/settings
pub async fn get_settings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> HandlerResult<SettingsPayload> {
    let settings = services::get_settings(state.repository.as_ref(), user.id).await?;
    Ok(Json(SettingsPayload { settings }))
}

/// PUT /api/settings
///
/// Replaces the whole settings document.
pub async fn save_settings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(payload): ApiJson<SettingsPayload>,
) -> HandlerResult<SettingsPayload> {
    let settings =
        services::save_settings(state.repository.as_ref(), user.id, &payload.settings).await?;
    Ok(Json(SettingsPayload { settings }))
}
