use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{DailyEntryId, StudentId};

/// Skill levels offered by the tracking form, from least to most mastered.
pub const SKILL_LEVELS: [&str; 4] = ["Emerging", "Developing", "Proficient", "Advanced"];

/// One subject session for one student on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub id: DailyEntryId,
    pub student_id: StudentId,
    pub student: String,
    pub date: NaiveDate,
    pub subject: String,
    pub activities: Vec<String>,
    pub skill_level: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntryInput {
    pub student: String,
    pub date: NaiveDate,
    pub subject: String,
    #[serde(default)]
    pub activities: Vec<String>,
    pub skill_level: String,
    #[serde(default)]
    pub notes: String,
}

/// Daily entry with its student already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDailyEntry {
    pub student_id: StudentId,
    pub date: NaiveDate,
    pub subject: String,
    pub activities: Vec<String>,
    pub skill_level: String,
    pub notes: String,
}
