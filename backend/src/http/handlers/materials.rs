use axum::{extract::State, http::StatusCode, Json};

use super::{created, CreatedResult, HandlerResult};
use crate::api::{Material, MaterialId, MaterialInput, MaterialUpdate};
use crate::db::services;
use crate::http::error::AppError;
use crate::http::extract::{ApiJson, ApiPath, ApiQuery, CurrentUser};
use crate::http::state::AppState;
use crate::services::materials::{usage_statistics, MaterialFilter, MaterialStats};

/// GET /api/materials?category=&q=
pub async fn list_materials(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiQuery(filter): ApiQuery<MaterialFilter>,
) -> HandlerResult<Vec<Material>> {
    let materials = services::list_materials(state.repository.as_ref(), user.id).await?;
    Ok(Json(filter.apply(materials)))
}

/// GET /api/materials/stats
pub async fn material_stats(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> HandlerResult<MaterialStats> {
    Ok(Json(
        usage_statistics(state.repository.as_ref(), user.id).await?,
    ))
}

/// POST /api/materials
pub async fn create_material(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(input): ApiJson<MaterialInput>,
) -> CreatedResult<Material> {
    let material = services::create_material(state.repository.as_ref(), user.id, &input).await?;
    Ok(created(material))
}

/// PUT /api/materials/{id}
pub async fn update_material(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<MaterialId>,
    ApiJson(input): ApiJson<MaterialUpdate>,
) -> HandlerResult<Material> {
    let material =
        services::update_material(state.repository.as_ref(), user.id, id, &input).await?;
    Ok(Json(material))
}

/// POST /api/materials/{id}/use
pub async fn use_material(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<MaterialId>,
) -> HandlerResult<Material> {
    let material = services::use_material(state.repository.as_ref(), user.id, id).await?;
    Ok(Json(material))
}

/// DELETE /api/materials/{id}
pub async fn delete_material(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<MaterialId>,
) -> Result<StatusCode, AppError> {
    services::delete_material(state.repository.as_ref(), user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
