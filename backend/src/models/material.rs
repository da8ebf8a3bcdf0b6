use serde::{Deserialize, Serialize};

use crate::api::MaterialId;

/// An item in the classroom materials library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    pub category: String,
    pub age_range: String,
    pub description: String,
    pub in_stock: bool,
    pub times_used: i32,
}

fn default_true() -> bool {
    true
}

/// Create payload. New materials start with `times_used = 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialInput {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub age_range: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

/// Update payload. Unlike creation, the usage counter may be overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialUpdate {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub age_range: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub times_used: i32,
}
