//! Public API surface for the Monty backend.
//!
//! Identifier newtypes live here together with re-exports of the entity
//! types, so HTTP handlers, services and repositories share one vocabulary.
//! All types derive Serialize/Deserialize for JSON serialization.

use crate::define_id_type;

define_id_type!(i64, UserId);
define_id_type!(i64, StudentId);
define_id_type!(i64, ObservationId);
define_id_type!(i64, ScheduleEntryId);
define_id_type!(i64, MaterialId);
define_id_type!(i64, DailyEntryId);

pub use crate::models::daily_entry::{DailyEntry, DailyEntryInput, NewDailyEntry};
pub use crate::models::material::{Material, MaterialInput, MaterialUpdate};
pub use crate::models::observation::{NewObservation, Observation, ObservationInput};
pub use crate::models::schedule::{ScheduleEntry, ScheduleEntryInput, Weekday};
pub use crate::models::student::{Student, StudentInput};
pub use crate::models::user::{NewUser, User};
