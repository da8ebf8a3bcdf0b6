//! HTTP handlers for the REST API, one module per resource.
//!
//! Every handler except health and login takes a [`CurrentUser`], so a
//! missing or invalid token is rejected before the handler body runs.
//!
//! [`CurrentUser`]: super::extract::CurrentUser

use axum::{http::StatusCode, Json};

use super::error::AppError;

pub mod auth;
pub mod chat;
pub mod daily_entries;
pub mod dashboard;
pub mod health;
pub mod materials;
pub mod observations;
pub mod reports;
pub mod schedule;
pub mod settings;
pub mod students;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Result type for handlers that create a resource.
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), AppError>;

pub(crate) fn created<T>(value: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(value))
}
