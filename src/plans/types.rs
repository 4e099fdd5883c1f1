//! Training plan types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::progression::types::PlanExerciseConfig;

/// An exercise slot in a plan day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanExercise {
    pub exercise_id: String,
    pub exercise_name: String,
    #[serde(default)]
    pub config: PlanExerciseConfig,
}

impl PlanExercise {
    pub fn new(
        exercise_id: impl Into<String>,
        exercise_name: impl Into<String>,
        config: PlanExerciseConfig,
    ) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            exercise_name: exercise_name.into(),
            config,
        }
    }
}

/// One training day of a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDay {
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<PlanExercise>,
}

impl PlanDay {
    pub fn new(name: impl Into<String>, exercises: Vec<PlanExercise>) -> Self {
        Self {
            name: name.into(),
            exercises,
        }
    }
}

/// A rotating training plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Free-text schedule, e.g. "3 days/week"
    #[serde(default)]
    pub schedule: Option<String>,
    /// Training days in rotation order
    pub days: Vec<PlanDay>,
    /// Day the next session will use
    pub current_day_index: usize,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Plan {
    /// Create a plan starting at its first day.
    pub fn new(name: impl Into<String>, days: Vec<PlanDay>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            schedule: None,
            days,
            current_day_index: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Index of the day the next session will use, wrapped into range.
    pub fn current_index(&self) -> Option<usize> {
        if self.days.is_empty() {
            None
        } else {
            Some(self.current_day_index % self.days.len())
        }
    }

    /// The day the next session will use.
    pub fn current_day(&self) -> Option<&PlanDay> {
        self.current_index().map(|index| &self.days[index])
    }

    /// Move to the next day, wrapping after the last. Returns the new index.
    pub fn advance_day(&mut self) -> usize {
        let next = match self.current_index() {
            Some(index) => (index + 1) % self.days.len(),
            None => 0,
        };
        self.current_day_index = next;
        self.updated_at = Utc::now();
        next
    }
}
