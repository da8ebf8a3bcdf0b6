//! Domain models for the classroom.
//!
//! Each entity has a read model (what the API returns) and an input payload
//! (what clients send on create/update). Observations and daily entries also
//! have a `New*` form in which the student is already resolved to an id.

pub mod daily_entry;
pub mod macros;
pub mod material;
pub mod observation;
pub mod schedule;
pub mod settings;
pub mod student;
pub mod user;

pub use daily_entry::*;
pub use material::*;
pub use observation::*;
pub use schedule::*;
pub use settings::default_settings;
pub use student::*;
pub use user::*;
