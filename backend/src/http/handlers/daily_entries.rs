use axum::{extract::State, http::StatusCode, Json};

use super::{created, CreatedResult, HandlerResult};
use crate::api::{DailyEntry, DailyEntryId, DailyEntryInput};
use crate::db::services;
use crate::http::error::AppError;
use crate::http::extract::{ApiJson, ApiPath, CurrentUser};
use crate::http::state::AppState;

/// GET /api/daily-entries
pub async fn list_daily_entries(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> HandlerResult<Vec<DailyEntry>> {
    Ok(Json(
        services::list_daily_entries(state.repository.as_ref(), user.id).await?,
    ))
}

/// POST /api/daily-entries
pub async fn create_daily_entry(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(input): ApiJson<DailyEntryInput>,
) -> CreatedResult<DailyEntry> {
    let entry = services::create_daily_entry(state.repository.as_ref(), user.id, &input).await?;
    Ok(created(entry))
}

/// PUT /api/daily-entries/{id}
pub async fn update_daily_entry(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<DailyEntryId>,
    ApiJson(input): ApiJson<DailyEntryInput>,
) -> HandlerResult<DailyEntry> {
    let entry =
        services::update_daily_entry(state.repository.as_ref(), user.id, id, &input).await?;
    Ok(Json(entry))
}

/// DELETE /api/daily-entries/{id}
pub async fn delete_daily_entry(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<DailyEntryId>,
) -> Result<StatusCode, AppError> {
    services::delete_daily_entry(state.repository.as_ref(), user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
