//! Application services built on top of the repository layer.
//!
//! Reports and newsletters are plain-text formatting over data already
//! loaded from the repository. The chat assistant is a fixed keyword router.
//! List filters and material statistics are computed in memory over the
//! user's rows.

pub mod chat;
pub mod dashboard;
pub mod materials;
pub mod newsletter;
pub mod observations;
pub mod reports;

pub use chat::{reply, ChatError, Topic};
pub use dashboard::{summary, DashboardSummary};
pub use materials::{material_stats, CategoryUsage, MaterialFilter, MaterialStats};
pub use newsletter::{class_newsletter, individual_newsletter, week_dates, Newsletter, Week};
pub use observations::ObservationFilter;
pub use reports::{progress_report, ProgressReport};
