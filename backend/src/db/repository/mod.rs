//! Repository trait definitions for database operations.
//!
//! Operations are split into focused traits so each backend can be read
//! one entity family at a time:
//!
//! - [`error`]: Error types for repository operations
//! - [`users`]: accounts, per-user settings and health checks
//! - [`classroom`]: students and everything recorded about them
//!   (observations, daily entries)
//! - [`planning`]: the weekly schedule and the materials library
//!
//! Every per-user operation takes the owning [`UserId`](crate::api::UserId).
//! A row owned by another user is reported as `NotFound`, exactly like a
//! row that does not exist.
//!
//! # Convenience Trait Bound
//!
//! ```ignore
//! async fn my_service<R: FullRepository + ?Sized>(repo: &R, user: UserId) -> RepositoryResult<()> {
//!     let students = repo.list_students(user).await?;
//!     let materials = repo.list_materials(user).await?;
//!     Ok(())
//! }
//! ```

pub mod classroom;
pub mod error;
pub mod planning;
pub mod users;

pub use classroom::{DailyEntryRepository, ObservationRepository, StudentRepository};
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use planning::{MaterialRepository, ScheduleRepository};
pub use users::{SettingsRepository, UserRepository};

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements every
/// repository trait.
pub trait FullRepository:
    UserRepository
    + SettingsRepository
    + StudentRepository
    + ObservationRepository
    + DailyEntryRepository
    + ScheduleRepository
    + MaterialRepository
{
}

impl<T> FullRepository for T where
    T: UserRepository
        + SettingsRepository
        + StudentRepository
        + ObservationRepository
        + DailyEntryRepository
        + ScheduleRepository
        + MaterialRepository
{
}
