//! Set records and the history query interface.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A single logged set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    /// Unique identifier
    pub id: String,
    /// Workout session this set belongs to
    pub workout_id: String,
    /// Exercise performed
    pub exercise_id: String,
    /// 1-based position within the workout
    pub set_number: u32,
    /// Load, in the caller's active unit
    pub weight: f64,
    /// Repetitions achieved
    pub reps: u32,
    /// True only if the set met its target
    pub completed: bool,
    /// ISO-8601 creation timestamp (lexically sortable)
    pub created_at: String,
    /// Rate of perceived exertion
    #[serde(default)]
    pub rpe: Option<f32>,
    /// Free-text note
    #[serde(default)]
    pub notes: Option<String>,
}

impl SetRecord {
    /// Create a new set record with a fresh id.
    pub fn new(
        workout_id: impl Into<String>,
        exercise_id: impl Into<String>,
        set_number: u32,
        weight: f64,
        reps: u32,
        completed: bool,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            workout_id: workout_id.into(),
            exercise_id: exercise_id.into(),
            set_number,
            weight,
            reps,
            completed,
            created_at: created_at.into(),
            rpe: None,
            notes: None,
        }
    }

    /// Load moved in this set (weight × reps).
    pub fn volume(&self) -> f64 {
        self.weight * self.reps as f64
    }

    /// Whether this set counts toward a session's success.
    pub fn meets_target(&self, target_reps: u32) -> bool {
        self.completed && self.reps >= target_reps
    }

    /// The note, if present and not blank.
    pub fn note(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// Read-only access to logged sets.
///
/// Implementations return every non-deleted set for the exercise in any order.
pub trait HistorySource {
    /// Fetch all sets logged for an exercise.
    fn fetch_sets_for_exercise(&self, exercise_id: &str) -> Result<Vec<SetRecord>, HistoryError>;
}

impl<T: HistorySource + ?Sized> HistorySource for &T {
    fn fetch_sets_for_exercise(&self, exercise_id: &str) -> Result<Vec<SetRecord>, HistoryError> {
        (**self).fetch_sets_for_exercise(exercise_id)
    }
}

/// History held in memory, mostly for tests and imports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    sets: Vec<SetRecord>,
}

impl InMemoryHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history from existing records.
    pub fn from_sets(sets: Vec<SetRecord>) -> Self {
        Self { sets }
    }

    /// Append a set.
    pub fn push(&mut self, set: SetRecord) {
        self.sets.push(set);
    }

    /// Append many sets.
    pub fn extend(&mut self, sets: impl IntoIterator<Item = SetRecord>) {
        self.sets.extend(sets);
    }

    /// Number of stored sets across all exercises.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether no sets are stored.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// All stored sets.
    pub fn sets(&self) -> &[SetRecord] {
        &self.sets
    }
}

impl HistorySource for InMemoryHistory {
    fn fetch_sets_for_exercise(&self, exercise_id: &str) -> Result<Vec<SetRecord>, HistoryError> {
        Ok(self
            .sets
            .iter()
            .filter(|s| s.exercise_id == exercise_id)
            .cloned()
            .collect())
    }
}

/// History access errors.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History unavailable: {0}")]
    Unavailable(String),
}
