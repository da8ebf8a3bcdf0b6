//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    auth, chat, daily_entries, dashboard, health, materials, observations, reports, schedule,
    settings, students,
};
use super::state::AppState;

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Students
        .route(
            "/students",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/students/{id}",
            put(students::update_student).delete(students::delete_student),
        )
        // Observations
        .route(
            "/observations",
            get(observations::list_observations).post(observations::create_observation),
        )
        .route(
            "/observations/{id}",
            put(observations::update_observation).delete(observations::delete_observation),
        )
        // Weekly schedule
        .route(
            "/schedule",
            get(schedule::list_schedule).post(schedule::create_schedule_entry),
        )
        .route(
            "/schedule/{id}",
            put(schedule::update_schedule_entry).delete(schedule::delete_schedule_entry),
        )
        // Materials
        .route(
            "/materials",
            get(materials::list_materials).post(materials::create_material),
        )
        .route(
            "/materials/{id}",
            put(materials::update_material).delete(materials::delete_material),
        )
        .route("/materials/stats", get(materials::material_stats))
        .route("/materials/{id}/use", post(materials::use_material))
        // Daily progress tracking
        .route(
            "/daily-entries",
            get(daily_entries::list_daily_entries).post(daily_entries::create_daily_entry),
        )
        .route(
            "/daily-entries/{id}",
            put(daily_entries::update_daily_entry).delete(daily_entries::delete_daily_entry),
        )
        // Settings, assistant, dashboard
        .route(
            "/settings",
            get(settings::get_settings).put(settings::save_settings),
        )
        .route("/chat", post(chat::chat))
        .route("/dashboard", get(dashboard::get_dashboard))
        // Reports
        .route("/reports/students/{id}", get(reports::student_report))
        .route("/reports/newsletter", get(reports::student_newsletter))
        .route("/reports/newsletter/class", get(reports::class_newsletter));

    Router::new()
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenSigner;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::FullRepository;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_router_creation() {
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>;
        let state = AppState::new(repo, TokenSigner::new("test", Duration::from_secs(60)));
        let _router = create_router(state, &["http://localhost:5173".to_string()]);
    }
}
