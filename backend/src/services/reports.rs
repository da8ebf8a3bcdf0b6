//! Plain-text progress reports for a single student.

use serde::Serialize;

use crate::api::{Observation, Student, StudentId, UserId};
use crate::db::repository::{FullRepository, RepositoryResult};

/// A rendered report ready to be downloaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    pub student_id: StudentId,
    pub student_name: String,
    pub filename: String,
    pub content: String,
}

fn bullet_list(out: &mut String, items: &[String], empty: &str) {
    if items.is_empty() {
        out.push_str(empty);
        out.push('\n');
    }
    for item in items {
        out.push_str(&format!("- {}\n", item));
    }
}

/// Render the report text. Only observations of `student` are included,
/// oldest first.
pub fn progress_report(student: &Student, observations: &[Observation]) -> String {
    let mut content = String::from("PROGRESS REPORT\n===============\n\n");
    content.push_str(&format!("Student: {}\n", student.name));
    content.push_str(&format!("Age: {} years\n", student.age));
    content.push_str(&format!("Parent: {}\n", student.parent_name));
    content.push_str(&format!("Email: {}\n", student.parent_email));

    content.push_str("\nINTERESTS\n---------\n");
    bullet_list(&mut content, &student.interests, "None listed");

    content.push_str("\nALLERGIES\n---------\n");
    bullet_list(&mut content, &student.allergies, "None reported");

    content.push_str("\nOBSERVATIONS\n------------\n");
    let mut own: Vec<&Observation> = observations
        .iter()
        .filter(|o| o.student_id == student.id)
        .collect();
    own.sort_by_key(|o| (o.date, o.id));
    if own.is_empty() {
        content.push_str("No observations recorded\n");
    }
    for obs in own {
        content.push_str(&format!("\nDate: {}\n", obs.date.format("%Y-%m-%d")));
        content.push_str(&format!("Area: {}\n", obs.area));
        content.push_str(&format!("Skills: {}\n", obs.skills.join(", ")));
        content.push_str(&format!("Notes: {}\n", obs.notes));
    }

    content
}

pub fn report_filename(student: &Student) -> String {
    format!("report_{}.txt", student.name.replace(' ', "_"))
}

/// Load a student and its observations and render the report.
pub async fn student_report<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    student_id: StudentId,
) -> RepositoryResult<ProgressReport> {
    let student = repo.get_student(user, student_id).await?;
    let observations = repo.list_observations(user).await?;
    Ok(ProgressReport {
        student_id: student.id,
        student_name: student.name.clone(),
        filename: report_filename(&student),
        content: progress_report(&student, &observations),
    })
}
