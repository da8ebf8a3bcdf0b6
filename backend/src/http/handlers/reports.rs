//! Downloadable progress reports and weekly newsletters.

use axum::{extract::State, Json};
use chrono::Utc;

use super::HandlerResult;
use crate::api::StudentId;
use crate::http::dto::{ClassNewsletterQuery, NewsletterQuery};
use crate::http::extract::{ApiPath, ApiQuery, CurrentUser};
use crate::http::state::AppState;
use crate::services::newsletter::{self, Newsletter};
use crate::services::reports::{self, ProgressReport};

/// GET /api/reports/students/{id}
pub async fn student_report(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<StudentId>,
) -> HandlerResult<ProgressReport> {
    let report = reports::student_report(state.repository.as_ref(), user.id, id).await?;
    Ok(Json(report))
}

/// GET /api/reports/newsletter?student=&week_offset=&date=
pub async fn student_newsletter(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiQuery(query): ApiQuery<NewsletterQuery>,
) -> HandlerResult<Newsletter> {
    let anchor = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let letter = newsletter::student_newsletter(
        state.repository.as_ref(),
        user.id,
        query.student,
        anchor,
        query.week_offset,
    )
    .await?;
    Ok(Json(letter))
}

/// GET /api/reports/newsletter/class?week_offset=&date=
pub async fn class_newsletter(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiQuery(query): ApiQuery<ClassNewsletterQuery>,
) -> HandlerResult<Newsletter> {
    let anchor = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let letter = newsletter::whole_class_newsletter(
        state.repository.as_ref(),
        user.id,
        anchor,
        query.week_offset,
    )
    .await?;
    Ok(Json(letter))
}
