use serde::{Deserialize, Serialize};

use crate::api::StudentId;

/// A child on a teacher's roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub age: i32,
    pub interests: Vec<String>,
    pub allergies: Vec<String>,
    pub parent_name: String,
    pub parent_email: String,
}

/// Create/update payload for a student. Child collections are replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentInput {
    pub name: String,
    pub age: i32,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub parent_name: String,
    #[serde(default)]
    pub parent_email: String,
}
