//! Demo data loaded into an empty database so the UI has something to show.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::api::{
    MaterialInput, MaterialUpdate, NewObservation, NewUser, ScheduleEntryInput, StudentId,
    StudentInput, Weekday,
};
use crate::auth::hash_password;
use crate::models::default_settings;

use super::repository::{FullRepository, RepositoryError, RepositoryResult};

pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "demo";

type StudentSeed<'a> = (&'a str, i32, &'a [&'a str], &'a [&'a str], &'a str, &'a str);

const STUDENTS: [StudentSeed; 6] = [
    ("Emma Johnson", 5, &["Nature", "Painting"], &["Peanuts"], "Sarah Johnson", "sarah.j@email.com"),
    ("Liam Chen", 4, &["Building Blocks", "Music"], &[], "David Chen", "david.c@email.com"),
    ("Olivia Martinez", 6, &["Reading", "Science"], &["Milk", "Eggs"], "Maria Martinez", "maria.m@email.com"),
    ("Noah Williams", 5, &["Sports", "Animals"], &[], "James Williams", "james.w@email.com"),
    ("Ava Thompson", 4, &["Dancing", "Art"], &["Tree Nuts"], "Lisa Thompson", "lisa.t@email.com"),
    ("Ethan Brown", 6, &["Mathematics", "Puzzles"], &["Wheat"], "Robert Brown", "robert.b@email.com"),
];

const SCHEDULE: [(Weekday, &str, &str, i32, &str); 15] = [
    (Weekday::Monday, "8:30 AM", "Morning Circle", 15, "All"),
    (Weekday::Monday, "9:00 AM", "Practical Life", 45, "Primary A"),
    (Weekday::Monday, "10:00 AM", "Language Arts", 45, "Primary B"),
    (Weekday::Monday, "11:00 AM", "Outdoor Play", 30, "All"),
    (Weekday::Tuesday, "8:30 AM", "Morning Circle", 15, "All"),
    (Weekday::Tuesday, "9:00 AM", "Mathematics", 45, "Primary A"),
    (Weekday::Tuesday, "10:00 AM", "Sensory Activities", 45, "Primary B"),
    (Weekday::Wednesday, "8:30 AM", "Morning Circle", 15, "All"),
    (Weekday::Wednesday, "9:00 AM", "Art & Creativity", 60, "All"),
    (Weekday::Thursday, "8:30 AM", "Morning Circle", 15, "All"),
    (Weekday::Thursday, "9:00 AM", "Science & Nature", 45, "Primary A"),
    (Weekday::Thursday, "10:00 AM", "Music & Movement", 45, "Primary B"),
    (Weekday::Friday, "8:30 AM", "Morning Circle", 15, "All"),
    (Weekday::Friday, "9:00 AM", "Free Choice Work", 60, "All"),
    (Weekday::Friday, "11:00 AM", "Show & Tell", 30, "All"),
];

const OBSERVATIONS: [(&str, &str, &str, &[&str], &str); 5] = [
    (
        "Emma Johnson",
        "2026-02-10",
        "Practical Life",
        &["Concentration", "Fine Motor"],
        "Emma showed excellent concentration while working with the pouring activity. \
         She was able to pour water from one jug to another with minimal spills.",
    ),
    (
        "Liam Chen",
        "2026-02-10",
        "Sensorial",
        &["Visual Discrimination", "Math Readiness"],
        "Liam spent 20 minutes working with the pink tower. He carefully stacked the cubes \
         from largest to smallest, showing good visual discrimination.",
    ),
    (
        "Olivia Martinez",
        "2026-02-11",
        "Language",
        &["Phonics", "Writing"],
        "Olivia is beginning to sound out CVC words using the movable alphabet. \
         She successfully wrote 'cat', 'dog', and 'sun'.",
    ),
    (
        "Noah Williams",
        "2026-02-11",
        "Mathematics",
        &["Counting", "Quantity/Symbol"],
        "Noah demonstrated understanding of number rods 1-10. He was able to count \
         accurately and associate quantity with symbol.",
    ),
    (
        "Ava Thompson",
        "2026-02-12",
        "Art",
        &["Fine Motor", "Hand-eye Coordination"],
        "Ava enjoyed the cutting activity with scissors. She showed good control and \
         was able to follow curved lines.",
    ),
];

const MATERIALS: [(&str, &str, &str, &str, i32); 6] = [
    ("Pink Tower", "Sensorial", "3-6", "Ten pink wooden cubes of varying sizes to develop visual discrimination of dimension.", 45),
    ("Brown Stairs", "Sensorial", "3-6", "Ten brown wooden prisms of varying thickness to develop visual discrimination.", 38),
    ("Red Rods", "Sensorial", "3-6", "Ten red wooden rods of varying length to develop visual discrimination of length.", 32),
    ("Movable Alphabet", "Language", "3-6", "Set of wooden letters for building words and sentences phonetically.", 67),
    ("Number Rods", "Mathematics", "3-6", "Red and blue wooden rods for learning numbers 1-10 and quantity.", 52),
    ("Sandpaper Letters", "Language", "2.5-4", "Rough letters for tactile letter recognition and learning letter sounds.", 28),
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Populate the demo account. Does nothing and returns `false` when any
/// user already exists.
pub async fn seed_demo_data<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    if repo.count_users().await? > 0 {
        log::debug!("Users already present; skipping demo seed");
        return Ok(false);
    }

    let user = repo
        .create_user(&NewUser {
            username: DEMO_USERNAME.to_string(),
            password_hash: hash_password(DEMO_PASSWORD),
            name: "Demo Teacher".to_string(),
            email: "demo@monty.app".to_string(),
            school: Some("Montessori Academy".to_string()),
            classroom: Some("Primary".to_string()),
        })
        .await?;
    repo.save_settings(user.id, &default_settings()).await?;

    let mut roster: HashMap<&str, StudentId> = HashMap::new();
    for (name, age, interests, allergies, parent_name, parent_email) in STUDENTS {
        let student = repo
            .create_student(
                user.id,
                &StudentInput {
                    name: name.to_string(),
                    age,
                    interests: owned(interests),
                    allergies: owned(allergies),
                    parent_name: parent_name.to_string(),
                    parent_email: parent_email.to_string(),
                },
            )
            .await?;
        roster.insert(name, student.id);
    }

    for (day, time, activity, duration, students) in SCHEDULE {
        repo.create_schedule_entry(
            user.id,
            &ScheduleEntryInput {
                day,
                time: time.to_string(),
                activity: activity.to_string(),
                duration,
                students: students.to_string(),
            },
        )
        .await?;
    }

    for (name, date, area, skills, notes) in OBSERVATIONS {
        let student_id = *roster
            .get(name)
            .ok_or_else(|| RepositoryError::internal(format!("seed student {} missing", name)))?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| RepositoryError::internal(format!("bad seed date {}: {}", date, e)))?;
        repo.create_observation(
            user.id,
            &NewObservation {
                student_id,
                date,
                area: area.to_string(),
                skills: owned(skills),
                notes: notes.to_string(),
            },
        )
        .await?;
    }

    for (name, category, age_range, description, times_used) in MATERIALS {
        let material = repo
            .create_material(
                user.id,
                &MaterialInput {
                    name: name.to_string(),
                    category: category.to_string(),
                    age_range: age_range.to_string(),
                    description: description.to_string(),
                    in_stock: true,
                },
            )
            .await?;
        repo.update_material(
            user.id,
            material.id,
            &MaterialUpdate {
                name: material.name,
                category: material.category,
                age_range: material.age_range,
                description: material.description,
                in_stock: material.in_stock,
                times_used,
            },
        )
        .await?;
    }

    log::info!(
        "Seeded demo account '{}' with {} students, {} schedule entries, {} observations and {} materials",
        DEMO_USERNAME,
        STUDENTS.len(),
        SCHEDULE.len(),
        OBSERVATIONS.len(),
        MATERIALS.len()
    );
    Ok(true)
}
