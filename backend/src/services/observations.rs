//! Filtering for the observation feed.

use serde::Deserialize;

use super::materials::active;
use crate::api::Observation;

/// Optional narrowing of the observation feed. Filters combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ObservationFilter {
    /// Exact student name.
    #[serde(default)]
    pub student: Option<String>,
    /// Exact curriculum area.
    #[serde(default)]
    pub area: Option<String>,
    /// Case-insensitive substring of the student name or the notes.
    #[serde(default)]
    pub q: Option<String>,
}

impl ObservationFilter {
    pub fn matches(&self, observation: &Observation) -> bool {
        if let Some(student) = active(&self.student) {
            if observation.student != student {
                return false;
            }
        }
        if let Some(area) = active(&self.area) {
            if observation.area != area {
                return false;
            }
        }
        match active(&self.q) {
            Some(q) => {
                let q = q.to_lowercase();
                observation.student.to_lowercase().contains(&q)
                    || observation.notes.to_lowercase().contains(&q)
            }
            None => true,
        }
    }

    /// Keep matching observations in their original order.
    pub fn apply(&self, observations: Vec<Observation>) -> Vec<Observation> {
        observations
            .into_iter()
            .filter(|o| self.matches(o))
            .collect()
    }
}
