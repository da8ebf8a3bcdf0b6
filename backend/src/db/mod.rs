//! Persistence layer for classroom data.
//!
//! Storage sits behind the repository traits in [`repository`], so the HTTP
//! layer never knows which backend it talks to.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers (crate::http) / reports & newsletters    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service layer (services.rs)                            │
//! │  - input validation and normalization                   │
//! │  - student name resolution                              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository traits (repository/)                        │
//! └─────────┬───────────────────────────────────┬───────────┘
//!           │                                   │
//!   ┌───────▼────────┐                 ┌────────▼─────────┐
//!   │ LocalRepository │                 │ PostgresRepository│
//!   │  (in-memory)    │                 │  (Diesel, r2d2)   │
//!   └────────────────┘                 └──────────────────┘
//! ```
//!
//! Backends are picked at startup by [`RepositoryFactory`], from
//! `REPOSITORY_TYPE` / `DATABASE_URL` or a `repository.toml` file.
//!
//! ```ignore
//! use monty::db::{init_repository, get_repository, services};
//!
//! init_repository().await?;
//! let repo = get_repository()?;
//! let students = services::list_students(repo.as_ref(), user_id).await?;
//! ```

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod seed;
pub mod services;

// Postgres config is colocated with the repository implementation.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::{PoolStats, PostgresConfig};
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    _private: (),
}

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
pub use seed::seed_demo_data;
pub use services::health_check;

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Initialize the global repository from the environment. Calling it again
/// after a successful initialization is a no-op.
pub async fn init_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if let Some(repo) = REPOSITORY.get() {
        return Ok(repo);
    }

    let repo = RepositoryFactory::from_env()
        .await
        .context("Failed to initialize repository")?;
    log::info!("Repository initialized ({:?})", RepositoryType::from_env());
    Ok(REPOSITORY.get_or_init(|| repo))
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
