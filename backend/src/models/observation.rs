use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{ObservationId, StudentId};

/// A dated note about one student in a curriculum area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: ObservationId,
    pub student_id: StudentId,
    /// Student name, resolved at read time so renames are reflected.
    pub student: String,
    pub date: NaiveDate,
    pub area: String,
    pub skills: Vec<String>,
    pub notes: String,
}

/// Client payload. The student is referenced by name within the teacher's roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationInput {
    pub student: String,
    pub date: NaiveDate,
    pub area: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

/// Observation with its student already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewObservation {
    pub student_id: StudentId,
    pub date: NaiveDate,
    pub area: String,
    pub skills: Vec<String>,
    pub notes: String,
}
