use axum::{extract::State, http::StatusCode, Json};

use super::{created, CreatedResult, HandlerResult};
use crate::api::{Observation, ObservationId, ObservationInput};
use crate::db::services;
use crate::http::error::AppError;
use crate::http::extract::{ApiJson, ApiPath, ApiQuery, CurrentUser};
use crate::http::state::AppState;
use crate::services::observations::ObservationFilter;

/// GET /api/observations?student=&area=&q=
///
/// Newest first.
pub async fn list_observations(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiQuery(filter): ApiQuery<ObservationFilter>,
) -> HandlerResult<Vec<Observation>> {
    let observations = services::list_observations(state.repository.as_ref(), user.id).await?;
    Ok(Json(filter.apply(observations)))
}

/// POST /api/observations
///
/// The body names the student; an unknown name is a 400.
pub async fn create_observation(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(input): ApiJson<ObservationInput>,
) -> CreatedResult<Observation> {
    let observation =
        services::create_observation(state.repository.as_ref(), user.id, &input).await?;
    Ok(created(observation))
}

/// PUT /api/observations/{id}
pub async fn update_observation(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<ObservationId>,
    ApiJson(input): ApiJson<ObservationInput>,
) -> HandlerResult<Observation> {
    let observation =
        services::update_observation(state.repository.as_ref(), user.id, id, &input).await?;
    Ok(Json(observation))
}

/// DELETE /api/observations/{id}
pub async fn delete_observation(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<ObservationId>,
) -> Result<StatusCode, AppError> {
    services::delete_observation(state.repository.as_ref(), user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
