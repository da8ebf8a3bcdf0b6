//! Weekly Markdown newsletters built from daily entries.
//!
//! Weeks run Monday through Sunday. A newsletter only covers entries whose
//! date falls inside its week; an empty selection yields `None`.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::api::{DailyEntry, Student, StudentId, UserId};
use crate::db::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};

/// Oldest week that may be requested, counted back from the anchor week.
pub const MAX_WEEKS_BACK: i64 = 52;

const HIGHLIGHT_LIMIT: usize = 5;
const SIGN_OFF: &str = "*Thank you for being part of our Montessori community!*\n";

/// Monday-based week containing `anchor`, shifted by `offset_weeks`.
///
/// `None` when any day of the week falls outside the supported calendar.
pub fn week_dates(anchor: NaiveDate, offset_weeks: i64) -> Option<[NaiveDate; 7]> {
    let monday =
        anchor.checked_sub_days(Days::new(u64::from(anchor.weekday().num_days_from_monday())))?;
    let shift = Days::new(offset_weeks.unsigned_abs().checked_mul(7)?);
    let monday = if offset_weeks < 0 {
        monday.checked_sub_days(shift)?
    } else {
        monday.checked_add_days(shift)?
    };
    let days: Vec<NaiveDate> = monday.iter_days().take(7).collect();
    days.try_into().ok()
}

/// An inclusive Monday..Sunday range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Week {
    pub fn new(anchor: NaiveDate, offset_weeks: i64) -> Option<Self> {
        let dates = week_dates(anchor, offset_weeks)?;
        Some(Self {
            start: dates[0],
            end: dates[6],
        })
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|day| *day <= self.end)
            .collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    fn heading(&self) -> String {
        format!(
            "**Week of {} - {}**",
            self.start.format("%B %d, %Y"),
            self.end.format("%B %d, %Y")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Newsletter {
    pub title: String,
    pub filename: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub content: String,
}

fn in_week<'a>(entries: &'a [DailyEntry], week: &Week) -> Vec<&'a DailyEntry> {
    let mut selected: Vec<&DailyEntry> = entries.iter().filter(|e| week.contains(e.date)).collect();
    selected.sort_by_key(|e| (e.date, e.id));
    selected
}

/// Newsletter for one student's parent.
pub fn individual_newsletter(
    student: &Student,
    entries: &[DailyEntry],
    week: &Week,
) -> Option<Newsletter> {
    let own: Vec<&DailyEntry> = in_week(entries, week)
        .into_iter()
        .filter(|e| e.student_id == student.id)
        .collect();
    if own.is_empty() {
        return None;
    }

    let title = format!("Weekly Update for {}", student.name);
    let mut content = format!("# {}\n\n{}\n\n", title, week.heading());
    content.push_str(&format!("**Parent:** {}\n\n---\n\n", student.parent_name));
    content.push_str("## This Week's Activities\n\n");

    let mut by_subject: BTreeMap<&str, Vec<&DailyEntry>> = BTreeMap::new();
    let mut levels: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in &own {
        by_subject.entry(entry.subject.as_str()).or_default().push(entry);
        *levels.entry(entry.skill_level.as_str()).or_default() += 1;
    }

    for (subject, subject_entries) in by_subject {
        content.push_str(&format!("### {}\n", subject));
        for entry in subject_entries {
            content.push_str(&format!(
                "- **{}**: {} ({})\n",
                entry.date.format("%A, %b %d"),
                entry.activities.join(", "),
                entry.skill_level
            ));
            if !entry.notes.trim().is_empty() {
                content.push_str(&format!("  - {}\n", entry.notes.trim()));
            }
        }
        content.push('\n');
    }

    content.push_str("---\n\n## Skills Development\n\n");
    for (level, count) in levels {
        content.push_str(&format!("- {}: {} sessions\n", level, count));
    }
    content.push_str("\n---\n\n");
    content.push_str(SIGN_OFF);

    Some(Newsletter {
        title,
        filename: format!(
            "newsletter_{}_{}.md",
            student.name.to_lowercase().replace(' ', "_"),
            week.start.format("%Y%m%d")
        ),
        week_start: week.start,
        week_end: week.end,
        content,
    })
}

#[derive(Default)]
struct StudentWeek<'a> {
    subjects: BTreeSet<&'a str>,
    highlights: Vec<&'a str>,
}

/// Newsletter for the whole class.
pub fn class_newsletter(entries: &[DailyEntry], week: &Week) -> Option<Newsletter> {
    let selected = in_week(entries, week);
    if selected.is_empty() {
        return None;
    }

    let mut students: BTreeMap<&str, StudentWeek> = BTreeMap::new();
    let mut subjects: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in &selected {
        let summary = students.entry(entry.student.as_str()).or_default();
        summary.subjects.insert(entry.subject.as_str());
        for activity in &entry.activities {
            if summary.highlights.len() < HIGHLIGHT_LIMIT
                && !summary.highlights.contains(&activity.as_str())
            {
                summary.highlights.push(activity.as_str());
            }
        }
        *subjects.entry(entry.subject.as_str()).or_default() += 1;
    }

    let title = "Weekly Class Update".to_string();
    let mut content = format!("# {}\n\n{}\n\n---\n\n", title, week.heading());
    content.push_str("## Class Highlights\n\n");
    for (name, summary) in &students {
        content.push_str(&format!("### {}\n", name));
        content.push_str(&format!(
            "- Explored: {}\n",
            summary.subjects.iter().copied().collect::<Vec<_>>().join(", ")
        ));
        if !summary.highlights.is_empty() {
            content.push_str(&format!("- Highlights: {}\n", summary.highlights.join(", ")));
        }
        content.push('\n');
    }

    let mut overview: Vec<(&str, usize)> = subjects.into_iter().collect();
    overview.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    content.push_str("---\n\n## Subject Overview\n\n");
    for (subject, count) in overview {
        content.push_str(&format!("- {}: {} sessions\n", subject, count));
    }
    content.push_str(&format!(
        "\n---\n\n**Total Entries This Week:** {}\n\n---\n\n",
        selected.len()
    ));
    content.push_str(SIGN_OFF);

    Some(Newsletter {
        title,
        filename: format!("class_newsletter_{}.md", week.start.format("%Y%m%d")),
        week_start: week.start,
        week_end: week.end,
        content,
    })
}

/// Validate a requested offset and build its week.
pub fn requested_week(anchor: NaiveDate, offset_weeks: i64) -> RepositoryResult<Week> {
    if !(-MAX_WEEKS_BACK..=0).contains(&offset_weeks) {
        return Err(RepositoryError::validation_with_context(
            format!("week_offset must be between -{} and 0", MAX_WEEKS_BACK),
            ErrorContext::new("newsletter").with_details(format!("week_offset={}", offset_weeks)),
        ));
    }
    Week::new(anchor, offset_weeks).ok_or_else(|| {
        RepositoryError::validation_with_context(
            format!("No full week around {} is representable", anchor),
            ErrorContext::new("newsletter").with_details(format!("week_offset={}", offset_weeks)),
        )
    })
}

fn nothing_recorded(operation: &str, week: &Week) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("No daily entries recorded for the week of {}", week.start),
        ErrorContext::new(operation).with_entity("daily_entry"),
    )
}

pub async fn student_newsletter<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    student_id: StudentId,
    anchor: NaiveDate,
    offset_weeks: i64,
) -> RepositoryResult<Newsletter> {
    let week = requested_week(anchor, offset_weeks)?;
    let student = repo.get_student(user, student_id).await?;
    let entries = repo.list_daily_entries(user).await?;
    individual_newsletter(&student, &entries, &week)
        .ok_or_else(|| nothing_recorded("student_newsletter", &week))
}

pub async fn whole_class_newsletter<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    anchor: NaiveDate,
    offset_weeks: i64,
) -> RepositoryResult<Newsletter> {
    let week = requested_week(anchor, offset_weeks)?;
    let entries = repo.list_daily_entries(user).await?;
    class_newsletter(&entries, &week).ok_or_else(|| nothing_recorded("class_newsletter", &week))
}
