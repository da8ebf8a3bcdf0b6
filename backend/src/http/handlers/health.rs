use axum::{extract::State, Json};

use super::HandlerResult;
use crate::db::services;
use crate::http::dto::HealthResponse;
use crate::http::state::AppState;

/// GET /api/health
///
/// Reports the process as up and whether the repository answers.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let database = match services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        database,
    }))
}
