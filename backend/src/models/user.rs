use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::UserId;

/// A teacher account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub school: Option<String>,
    pub classroom: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data required to create a teacher account. The password is already hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub school: Option<String>,
    pub classroom: Option<String>,
}
