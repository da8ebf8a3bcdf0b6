//! High-level database service layer.
//!
//! Repository-agnostic operations used by the HTTP layer. They validate and
//! normalize input before it reaches storage, resolve student names to ids
//! within the caller's roster, and keep behaviour identical across backends.
//!
//! ```text
//! HTTP handlers ──► services (this module) ──► repository traits ──► Local / Postgres
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use monty::api::UserId;
//! use monty::db::{repositories::LocalRepository, services};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let students = services::list_students(&repo, UserId(1)).await?;
//!     println!("Found {} students", students.len());
//!     Ok(())
//! }
//! ```

use log::{debug, info, warn};
use serde_json::Value;

use super::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::api::*;
use crate::auth::verify_password;

// ==================== Validation helpers ====================

fn invalid(operation: &str, entity: &str, message: impl Into<String>) -> RepositoryError {
    RepositoryError::validation_with_context(
        message,
        ErrorContext::new(operation).with_entity(entity),
    )
}

fn require(value: &str, field: &str, operation: &str, entity: &str) -> RepositoryResult<()> {
    if value.trim().is_empty() {
        return Err(invalid(operation, entity, format!("{} is required", field)));
    }
    Ok(())
}

/// Trim every item and drop the blank ones, keeping order.
pub fn clean_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ==================== Health & Accounts ====================

pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Look up a user by username and check the password.
///
/// Returns `Ok(None)` for an unknown user or a wrong password; the two cases
/// are not distinguished.
pub async fn authenticate<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
    password: &str,
) -> RepositoryResult<Option<User>> {
    let user = repo.find_user_by_username(username.trim()).await?;
    match user {
        Some(user) if verify_password(password, &user.password_hash) => {
            info!("User '{}' authenticated", user.username);
            Ok(Some(user))
        }
        Some(_) => {
            warn!("Failed login for user '{}': wrong password", username);
            Ok(None)
        }
        None => {
            warn!("Failed login for unknown user '{}'", username);
            Ok(None)
        }
    }
}

// ==================== Students ====================

fn normalize_student(input: &StudentInput, operation: &str) -> RepositoryResult<StudentInput> {
    require(&input.name, "name", operation, "student")?;
    if input.age < 0 {
        return Err(invalid(operation, "student", "age must not be negative"));
    }
    Ok(StudentInput {
        name: input.name.trim().to_string(),
        age: input.age,
        interests: clean_list(&input.interests),
        allergies: clean_list(&input.allergies),
        parent_name: input.parent_name.trim().to_string(),
        parent_email: input.parent_email.trim().to_string(),
    })
}

pub async fn list_students<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
) -> RepositoryResult<Vec<Student>> {
    repo.list_students(user).await
}

pub async fn get_student<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    id: StudentId,
) -> RepositoryResult<Student> {
    repo.get_student(user, id).await
}

pub async fn create_student<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    input: &StudentInput,
) -> RepositoryResult<Student> {
    let input = normalize_student(input, "create_student")?;
    let student = repo.create_student(user, &input).await?;
    debug!("Created student {} for user {}", student.id, user);
    Ok(student)
}

pub async fn update_student<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    id: StudentId,
    input: &StudentInput,
) -> RepositoryResult<Student> {
    let input = normalize_student(input, "update_student")?;
    repo.update_student(user, id, &input).await
}

/// Delete a student and, through the cascade, its observations and daily entries.
pub async fn delete_student<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    id: StudentId,
) -> RepositoryResult<()> {
    repo.delete_student(user, id).await?;
    info!("Deleted student {} for user {}", id, user);
    Ok(())
}

/// Resolve a student name within the user's roster.
///
/// An unknown name is a validation failure, since it comes from the request
/// body rather than the path.
pub async fn resolve_student<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    name: &str,
    operation: &str,
) -> RepositoryResult<Student> {
    let name = name.trim();
    repo.find_student_by_name(user, name)
        .await?
        .ok_or_else(|| invalid(operation, "student", format!("Student '{}' not found", name)))
}

// ==================== Observations ====================

async fn prepare_observation<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    input: &ObservationInput,
    operation: &str,
) -> RepositoryResult<NewObservation> {
    require(&input.student, "student", operation, "observation")?;
    require(&input.area, "area", operation, "observation")?;
    let student = resolve_student(repo, user, &input.student, operation).await?;
    Ok(NewObservation {
        student_id: student.id,
        date: input.date,
        area: input.area.trim().to_string(),
        skills: clean_list(&input.skills),
        notes: input.notes.trim().to_string(),
    })
}

pub async fn list_observations<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
) -> RepositoryResult<Vec<Observation>> {
    repo.list_observations(user).await
}

pub async fn create_observation<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    input: &ObservationInput,
) -> RepositoryResult<Observation> {
    let observation = prepare_observation(repo, user, input, "create_observation").await?;
    repo.create_observation(user, &observation).await
}

pub async fn update_observation<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    id: ObservationId,
    input: &ObservationInput,
) -> RepositoryResult<Observation> {
    repo.get_observation(user, id).await?;
    let observation = prepare_observation(repo, user, input, "update_observation").await?;
    repo.update_observation(user, id, &observation).await
}

pub async fn delete_observation<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    id: ObservationId,
) -> RepositoryResult<()> {
    repo.delete_observation(user, id).await
}

// ==================== Schedule ====================

fn normalize_schedule_entry(
    input: &ScheduleEntryInput,
    operation: &str,
) -> RepositoryResult<ScheduleEntryInput> {
    require(&input.time, "time", operation, "schedule entry")?;
    require(&input.activity, "activity", operation, "schedule entry")?;
    if input.duration <= 0 {
        return Err(invalid(
            operation,
            "schedule entry",
            "duration must be a positive number of minutes",
        ));
    }
    let students = match input.students.trim() {
        "" => "All".to_string(),
        group => group.to_string(),
    };
    Ok(ScheduleEntryInput {
        day: input.day,
        time: input.time.trim().to_string(),
        activity: input.activity.trim().to_string(),
        duration: input.duration,
        students,
    })
}

pub async fn list_schedule<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
) -> RepositoryResult<Vec<ScheduleEntry>> {
    repo.list_schedule(user).await
}

pub async fn create_schedule_entry<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    input: &ScheduleEntryInput,
) -> RepositoryResult<ScheduleEntry> {
    let input = normalize_schedule_entry(input, "create_schedule_entry")?;
    repo.create_schedule_entry(user, &input).await
}

pub async fn update_schedule_entry<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    id: ScheduleEntryId,
    input: &ScheduleEntryInput,
) -> RepositoryResult<ScheduleEntry> {
    let input = normalize_schedule_entry(input, "update_schedule_entry")?;
    repo.update_schedule_entry(user, id, &input).await
}

pub async fn delete_schedule_entry<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    id: ScheduleEntryId,
) -> RepositoryResult<()> {
    repo.delete_schedule_entry(user, id).await
}

// ==================== Materials ====================

/// Upper bound for a usage counter set through an update.
pub const MAX_TIMES_USED: i32 = 1_000_000;

pub async fn list_materials<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
) -> RepositoryResult<Vec<Material>> {
    repo.list_materials(user).await
}

pub async fn create_material<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    input: &MaterialInput,
) -> RepositoryResult<Material> {
    require(&input.name, "name", "create_material", "material")?;
    require(&input.category, "category", "create_material", "material")?;
    let input = MaterialInput {
        name: input.name.trim().to_string(),
        category: input.category.trim().to_string(),
        age_range: input.age_range.trim().to_string(),
        description: input.description.trim().to_string(),
        in_stock: input.in_stock,
    };
    repo.create_material(user, &input).await
}

pub async fn update_material<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    id: MaterialId,
    input: &MaterialUpdate,
) -> RepositoryResult<Material> {
    require(&input.name, "name", "update_material", "material")?;
    require(&input.category, "category", "update_material", "material")?;
    if !(0..=MAX_TIMES_USED).contains(&input.times_used) {
        return Err(invalid(
            "update_material",
            "material",
            format!("times_used must be between 0 and {}", MAX_TIMES_USED),
        ));
    }
    let input = MaterialUpdate {
        name: input.name.trim().to_string(),
        category: input.category.trim().to_string(),
        age_range: input.age_range.trim().to_string(),
        description: input.description.trim().to_string(),
        in_stock: input.in_stock,
        times_used: input.times_used,
    };
    repo.update_material(user, id, &input).await
}

/// Record one use of a material.
pub async fn use_material<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    id: MaterialId,
) -> RepositoryResult<Material> {
    repo.increment_material_usage(user, id).await
}

pub async fn delete_material<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    id: MaterialId,
) -> RepositoryResult<()> {
    repo.delete_material(user, id).await
}

// ==================== Daily entries ====================

async fn prepare_daily_entry<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    input: &DailyEntryInput,
    operation: &str,
) -> RepositoryResult<NewDailyEntry> {
    require(&input.student, "student", operation, "daily entry")?;
    require(&input.subject, "subject", operation, "daily entry")?;
    require(&input.skill_level, "skill_level", operation, "daily entry")?;
    let student = resolve_student(repo, user, &input.student, operation).await?;
    Ok(NewDailyEntry {
        student_id: student.id,
        date: input.date,
        subject: input.subject.trim().to_string(),
        activities: clean_list(&input.activities),
        skill_level: input.skill_level.trim().to_string(),
        notes: input.notes.trim().to_string(),
    })
}

pub async fn list_daily_entries<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
) -> RepositoryResult<Vec<DailyEntry>> {
    repo.list_daily_entries(user).await
}

pub async fn create_daily_entry<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    input: &DailyEntryInput,
) -> RepositoryResult<DailyEntry> {
    let entry = prepare_daily_entry(repo, user, input, "create_daily_entry").await?;
    repo.create_daily_entry(user, &entry).await
}

pub async fn update_daily_entry<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    id: DailyEntryId,
    input: &DailyEntryInput,
) -> RepositoryResult<DailyEntry> {
    repo.get_daily_entry(user, id).await?;
    let entry = prepare_daily_entry(repo, user, input, "update_daily_entry").await?;
    repo.update_daily_entry(user, id, &entry).await
}

pub async fn delete_daily_entry<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    id: DailyEntryId,
) -> RepositoryResult<()> {
    repo.delete_daily_entry(user, id).await
}

// ==================== Settings ====================

/// The user's settings object, or `{}` if none was saved.
pub async fn get_settings<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
) -> RepositoryResult<Value> {
    Ok(repo
        .get_settings(user)
        .await?
        .unwrap_or_else(|| Value::Object(Default::default())))
}

pub async fn save_settings<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    settings: &Value,
) -> RepositoryResult<Value> {
    if !settings.is_object() {
        return Err(invalid(
            "save_settings",
            "settings",
            "settings must be a JSON object",
        ));
    }
    repo.save_settings(user, settings).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hash_password;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::UserRepository;
    use chrono::NaiveDate;

    const TEACHER: UserId = UserId(1);

    fn observation_for(student: &str) -> ObservationInput {
        ObservationInput {
            student: student.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            area: "Practical Life".to_string(),
            skills: vec![" Concentration ".into(), "".into(), "Fine Motor".into()],
            notes: "Pouring activity".to_string(),
        }
    }

    #[test]
    fn test_clean_list() {
        let items = vec![" a ".to_string(), "  ".to_string(), "b".to_string()];
        assert_eq!(clean_list(&items), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let repo = LocalRepository::new();
        repo.create_user(&NewUser {
            username: "demo".into(),
            password_hash: hash_password("demo"),
            name: "Demo Teacher".into(),
            email: "demo@monty.app".into(),
            school: None,
            classroom: None,
        })
        .await
        .unwrap();

        assert!(authenticate(&repo, "demo", "demo").await.unwrap().is_some());
        assert!(authenticate(&repo, "demo", "nope").await.unwrap().is_none());
        assert!(authenticate(&repo, "ghost", "demo").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_student_validation() {
        let repo = LocalRepository::new();
        let blank = StudentInput {
            name: "   ".into(),
            age: 4,
            ..Default::default()
        };
        assert!(matches!(
            create_student(&repo, TEACHER, &blank).await,
            Err(RepositoryError::ValidationError { .. })
        ));

        let negative = StudentInput {
            name: "Liam".into(),
            age: -1,
            ..Default::default()
        };
        assert!(create_student(&repo, TEACHER, &negative).await.is_err());
    }

    #[tokio::test]
    async fn test_observation_resolves_student_and_cleans_skills() {
        let repo = LocalRepository::new();
        let student = create_student(
            &repo,
            TEACHER,
            &StudentInput {
                name: "Emma Johnson".into(),
                age: 5,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let obs = create_observation(&repo, TEACHER, &observation_for("Emma Johnson"))
            .await
            .unwrap();
        assert_eq!(obs.student_id, student.id);
        assert_eq!(obs.student, "Emma Johnson");
        assert_eq!(obs.skills, vec!["Concentration", "Fine Motor"]);
    }

    #[tokio::test]
    async fn test_observation_unknown_student_is_validation_error() {
        let repo = LocalRepository::new();
        let result = create_observation(&repo, TEACHER, &observation_for("Nobody")).await;
        assert!(matches!(
            result,
            Err(RepositoryError::ValidationError { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_missing_observation_is_not_found() {
        let repo = LocalRepository::new();
        create_student(
            &repo,
            TEACHER,
            &StudentInput {
                name: "Emma Johnson".into(),
                age: 5,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let result = update_observation(
            &repo,
            TEACHER,
            ObservationId(404),
            &observation_for("Emma Johnson"),
        )
        .await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_schedule_requires_positive_duration() {
        let repo = LocalRepository::new();
        let input = ScheduleEntryInput {
            day: Weekday::Monday,
            time: "9:00 AM".into(),
            activity: "Practical Life".into(),
            duration: 0,
            students: "".into(),
        };
        assert!(create_schedule_entry(&repo, TEACHER, &input).await.is_err());

        let input = ScheduleEntryInput {
            duration: 45,
            ..input
        };
        let entry = create_schedule_entry(&repo, TEACHER, &input).await.unwrap();
        assert_eq!(entry.students, "All");
    }

    #[tokio::test]
    async fn test_settings_default_and_object_check() {
        let repo = LocalRepository::new();
        assert_eq!(
            get_settings(&repo, TEACHER).await.unwrap(),
            serde_json::json!({})
        );
        assert!(save_settings(&repo, TEACHER, &serde_json::json!([1, 2]))
            .await
            .is_err());
        save_settings(&repo, TEACHER, &serde_json::json!({"appearance": {"theme": "dark"}}))
            .await
            .unwrap();
        assert_eq!(
            get_settings(&repo, TEACHER).await.unwrap()["appearance"]["theme"],
            "dark"
        );
    }
}
