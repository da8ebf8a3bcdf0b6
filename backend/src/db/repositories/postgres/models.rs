use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

use super::schema::{
    daily_activities, daily_entries, materials, observation_skills, observations, schedules,
    student_allergies, student_interests, students, user_settings, users,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub school: Option<String>,
    pub classroom: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub school: Option<&'a str>,
    pub classroom: Option<&'a str>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_settings)]
pub struct NewSettingsRow<'a> {
    pub user_id: i64,
    pub settings_json: &'a Value,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StudentRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub age: i32,
    pub parent_name: Option<String>,
    pub parent_email: Option<String>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = students)]
#[diesel(treat_none_as_null = true)]
pub struct StudentChanges<'a> {
    pub user_id: i64,
    pub name: &'a str,
    pub age: i32,
    pub parent_name: Option<&'a str>,
    pub parent_email: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = student_interests)]
#[diesel(belongs_to(StudentRow, foreign_key = student_id))]
pub struct InterestRow {
    pub id: i64,
    pub student_id: i64,
    pub interest: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = student_interests)]
pub struct NewInterestRow<'a> {
    pub student_id: i64,
    pub interest: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = student_allergies)]
#[diesel(belongs_to(StudentRow, foreign_key = student_id))]
pub struct AllergyRow {
    pub id: i64,
    pub student_id: i64,
    pub allergy: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = student_allergies)]
pub struct NewAllergyRow<'a> {
    pub student_id: i64,
    pub allergy: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = observations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ObservationRow {
    pub id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub area: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = observations)]
#[diesel(treat_none_as_null = true)]
pub struct ObservationChanges<'a> {
    pub student_id: i64,
    pub date: NaiveDate,
    pub area: &'a str,
    pub notes: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = observation_skills)]
#[diesel(belongs_to(ObservationRow, foreign_key = observation_id))]
pub struct SkillRow {
    pub id: i64,
    pub observation_id: i64,
    pub skill: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = observation_skills)]
pub struct NewSkillRow<'a> {
    pub observation_id: i64,
    pub skill: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schedules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)] // user_id is only used in filters
pub struct ScheduleRow {
    pub id: i64,
    pub user_id: i64,
    pub day: String,
    pub time: String,
    pub activity: String,
    pub duration: i32,
    pub students_group: String,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = schedules)]
pub struct ScheduleChanges<'a> {
    pub user_id: i64,
    pub day: &'a str,
    pub time: &'a str,
    pub activity: &'a str,
    pub duration: i32,
    pub students_group: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = materials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)] // user_id is only used in filters
pub struct MaterialRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub category: String,
    pub age_range: Option<String>,
    pub description: Option<String>,
    pub in_stock: bool,
    pub times_used: i32,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = materials)]
#[diesel(treat_none_as_null = true)]
pub struct MaterialChanges<'a> {
    pub user_id: i64,
    pub name: &'a str,
    pub category: &'a str,
    pub age_range: Option<&'a str>,
    pub description: Option<&'a str>,
    pub in_stock: bool,
    pub times_used: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = daily_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)] // user_id is only used in filters
pub struct DailyEntryRow {
    pub id: i64,
    pub user_id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub subject: String,
    pub skill_level: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = daily_entries)]
#[diesel(treat_none_as_null = true)]
pub struct DailyEntryChanges<'a> {
    pub user_id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub subject: &'a str,
    pub skill_level: &'a str,
    pub notes: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = daily_activities)]
#[diesel(belongs_to(DailyEntryRow, foreign_key = daily_entry_id))]
pub struct ActivityRow {
    pub id: i64,
    pub daily_entry_id: i64,
    pub activity: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = daily_activities)]
pub struct NewActivityRow<'a> {
    pub daily_entry_id: i64,
    pub activity: &'a str,
}

/// Empty strings are stored as NULL in optional text columns.
pub fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
