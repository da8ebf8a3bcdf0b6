//! Headline numbers for the landing page.

use chrono::NaiveDate;
use serde::Serialize;

use crate::api::{Observation, ScheduleEntry, UserId, Weekday};
use crate::db::repository::{FullRepository, RepositoryResult};

const RECENT_OBSERVATIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub student_count: usize,
    pub observation_count: usize,
    pub daily_entry_count: usize,
    /// Sum of `times_used` over all materials.
    pub material_uses: i64,
    pub today: Weekday,
    pub todays_schedule: Vec<ScheduleEntry>,
    pub recent_observations: Vec<Observation>,
}

pub async fn summary<R: FullRepository + ?Sized>(
    repo: &R,
    user: UserId,
    today: NaiveDate,
) -> RepositoryResult<DashboardSummary> {
    let students = repo.list_students(user).await?;
    let mut observations = repo.list_observations(user).await?;
    let daily_entries = repo.list_daily_entries(user).await?;
    let materials = repo.list_materials(user).await?;
    let weekday = Weekday::of(today);

    let mut todays_schedule: Vec<ScheduleEntry> = repo
        .list_schedule(user)
        .await?
        .into_iter()
        .filter(|e| e.day == weekday)
        .collect();
    todays_schedule.sort_by_key(|e| e.id);

    let observation_count = observations.len();
    observations.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    observations.truncate(RECENT_OBSERVATIONS);

    Ok(DashboardSummary {
        student_count: students.len(),
        observation_count,
        daily_entry_count: daily_entries.len(),
        material_uses: materials.iter().map(|m| m.times_used as i64).sum(),
        today: weekday,
        todays_schedule,
        recent_observations: observations,
    })
}
