//! Weekly schedule and materials library.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::*;

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// The user's weekly slots, ordered by weekday then id.
    async fn list_schedule(&self, user: UserId) -> RepositoryResult<Vec<ScheduleEntry>>;

    async fn create_schedule_entry(
        &self,
        user: UserId,
        entry: &ScheduleEntryInput,
    ) -> RepositoryResult<ScheduleEntry>;

    async fn update_schedule_entry(
        &self,
        user: UserId,
        id: ScheduleEntryId,
        entry: &ScheduleEntryInput,
    ) -> RepositoryResult<ScheduleEntry>;

    async fn delete_schedule_entry(&self, user: UserId, id: ScheduleEntryId)
        -> RepositoryResult<()>;
}

#[async_trait]
pub trait MaterialRepository: Send + Sync {
    /// The user's materials, ordered by id.
    async fn list_materials(&self, user: UserId) -> RepositoryResult<Vec<Material>>;

    /// Store a material with `times_used = 0`.
    async fn create_material(
        &self,
        user: UserId,
        material: &MaterialInput,
    ) -> RepositoryResult<Material>;

    async fn update_material(
        &self,
        user: UserId,
        id: MaterialId,
        material: &MaterialUpdate,
    ) -> RepositoryResult<Material>;

    /// Record one use of a material and return it with the new count.
    async fn increment_material_usage(
        &self,
        user: UserId,
        id: MaterialId,
    ) -> RepositoryResult<Material>;

    async fn delete_material(&self, user: UserId, id: MaterialId) -> RepositoryResult<()>;
}
