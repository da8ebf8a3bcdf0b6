use axum::{extract::State, http::StatusCode, Json};

use super::{created, CreatedResult, HandlerResult};
use crate::api::{ScheduleEntry, ScheduleEntryId, ScheduleEntryInput};
use crate::db::services;
use crate::http::error::AppError;
use crate::http::extract::{ApiJson, ApiPath, CurrentUser};
use crate::http::state::AppState;

/// GET /api/schedule
///
/// Monday first, then by creation order within a day.
pub async fn list_schedule(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> HandlerResult<Vec<ScheduleEntry>> {
    Ok(Json(
        services::list_schedule(state.repository.as_ref(), user.id).await?,
    ))
}

/// POST /api/schedule
pub async fn create_schedule_entry(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(input): ApiJson<ScheduleEntryInput>,
) -> CreatedResult<ScheduleEntry> {
    let entry =
        services::create_schedule_entry(state.repository.as_ref(), user.id, &input).await?;
    Ok(created(entry))
}

/// PUT /api/schedule/{id}
pub async fn update_schedule_entry(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<ScheduleEntryId>,
    ApiJson(input): ApiJson<ScheduleEntryInput>,
) -> HandlerResult<ScheduleEntry> {
    let entry =
        services::update_schedule_entry(state.repository.as_ref(), user.id, id, &input).await?;
    Ok(Json(entry))
}

/// DELETE /api/schedule/{id}
pub async fn delete_schedule_entry(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<ScheduleEntryId>,
) -> Result<StatusCode, AppError> {
    services::delete_schedule_entry(state.repository.as_ref(), user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
