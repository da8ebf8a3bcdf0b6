use axum::{extract::State, Json};
use chrono::Utc;

use super::HandlerResult;
use crate::http::extract::CurrentUser;
use crate::http::state::AppState;
use crate::services::dashboard::{self, DashboardSummary};

/// GET /api/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> HandlerResult<DashboardSummary> {
    let today = Utc::now().date_naive();
    let summary = dashboard::summary(state.repository.as_ref(), user.id, today).await?;
    Ok(Json(summary))
}
