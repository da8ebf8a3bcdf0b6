use axum::{extract::State, http::StatusCode, Json};

use super::{created, CreatedResult, HandlerResult};
use crate::api::{Student, StudentId, StudentInput};
use crate::db::services;
use crate::http::error::AppError;
use crate::http::extract::{ApiJson, ApiPath, CurrentUser};
use crate::http::state::AppState;

/// GET /api/students
pub async fn list_students(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> HandlerResult<Vec<Student>> {
    let students = services::list_students(state.repository.as_ref(), user.id).await?;
    Ok(Json(students))
}

/// POST /api/students
pub async fn create_student(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(input): ApiJson<StudentInput>,
) -> CreatedResult<Student> {
    let student = services::create_student(state.repository.as_ref(), user.id, &input).await?;
    Ok(created(student))
}

/// PUT /api/students/{id}
pub async fn update_student(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<StudentId>,
    ApiJson(input): ApiJson<StudentInput>,
) -> HandlerResult<Student> {
    let student =
        services::update_student(state.repository.as_ref(), user.id, id, &input).await?;
    Ok(Json(student))
}

/// DELETE /api/students/{id}
///
/// Also removes the student's observations and daily entries.
pub async fn delete_student(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<StudentId>,
) -> Result<StatusCode, AppError> {
    services::delete_student(state.repository.as_ref(), user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
