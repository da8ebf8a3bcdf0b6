//! Students and the records kept about them.
//!
//! Observations and daily entries belong to a student; deleting the student
//! deletes them too.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::*;

/// Repository trait for the student roster.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All of the user's students, ordered by id.
    async fn list_students(&self, user: UserId) -> RepositoryResult<Vec<Student>>;

    /// # Returns
    /// * `Ok(Student)` - The student
    /// * `Err(RepositoryError::NotFound)` - If it doesn't exist for this user
    async fn get_student(&self, user: UserId, id: StudentId) -> RepositoryResult<Student>;

    /// Exact-name lookup. Names are not unique; the lowest id wins.
    async fn find_student_by_name(
        &self,
        user: UserId,
        name: &str,
    ) -> RepositoryResult<Option<Student>>;

    async fn create_student(&self, user: UserId, input: &StudentInput)
        -> RepositoryResult<Student>;

    /// Replace every field, including the interest and allergy lists.
    async fn update_student(
        &self,
        user: UserId,
        id: StudentId,
        input: &StudentInput,
    ) -> RepositoryResult<Student>;

    /// Delete a student together with its observations and daily entries.
    async fn delete_student(&self, user: UserId, id: StudentId) -> RepositoryResult<()>;
}

/// Repository trait for observations.
#[async_trait]
pub trait ObservationRepository: Send + Sync {
    /// Observations of all the user's students, newest date first.
    async fn list_observations(&self, user: UserId) -> RepositoryResult<Vec<Observation>>;

    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the id is unknown or another user's
    async fn get_observation(&self, user: UserId, id: ObservationId)
        -> RepositoryResult<Observation>;

    /// Store an observation for a student the user owns.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the student isn't the user's
    async fn create_observation(
        &self,
        user: UserId,
        observation: &NewObservation,
    ) -> RepositoryResult<Observation>;

    /// Replace an observation, including its skill list.
    async fn update_observation(
        &self,
        user: UserId,
        id: ObservationId,
        observation: &NewObservation,
    ) -> RepositoryResult<Observation>;

    async fn delete_observation(&self, user: UserId, id: ObservationId) -> RepositoryResult<()>;
}

/// Repository trait for daily tracking entries.
#[async_trait]
pub trait DailyEntryRepository: Send + Sync {
    /// The user's entries, newest date first.
    async fn list_daily_entries(&self, user: UserId) -> RepositoryResult<Vec<DailyEntry>>;

    async fn get_daily_entry(&self, user: UserId, id: DailyEntryId)
        -> RepositoryResult<DailyEntry>;

    async fn create_daily_entry(
        &self,
        user: UserId,
        entry: &NewDailyEntry,
    ) -> RepositoryResult<DailyEntry>;

    async fn update_daily_entry(
        &self,
        user: UserId,
        id: DailyEntryId,
        entry: &NewDailyEntry,
    ) -> RepositoryResult<DailyEntry>;

    async fn delete_daily_entry(&self, user: UserId, id: DailyEntryId) -> RepositoryResult<()>;
}
