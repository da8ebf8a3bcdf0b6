//! Data Transfer Objects for the HTTP API.
//!
//! Entity bodies (students, observations, ...) are the model types from
//! [`crate::api`]; this module only holds envelopes specific to HTTP.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{StudentId, User, UserId};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Profile of the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub email: String,
    pub school: Option<String>,
    pub classroom: Option<String>,
}

impl From<User> for MeResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            school: user.school,
            classroom: user.classroom,
        }
    }
}

/// Settings envelope used for both GET and PUT.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsPayload {
    pub settings: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Query for `/api/reports/newsletter`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsletterQuery {
    pub student: StudentId,
    #[serde(default)]
    pub week_offset: i64,
    /// Anchor date; defaults to today (UTC).
    pub date: Option<NaiveDate>,
}

/// Query for `/api/reports/newsletter/class`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassNewsletterQuery {
    #[serde(default)]
    pub week_offset: i64,
    pub date: Option<NaiveDate>,
}
