//! Workout types: exercises, live sessions, and finished workout records.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::history::types::SetRecord;
use crate::progression::types::{PlanExerciseConfig, Suggestion};

/// An exercise in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Primary muscle group (e.g. "Chest")
    pub muscle_group: Option<String>,
    /// Compound, isolation, ...
    pub category: Option<String>,
    /// Barbell, dumbbell, ...
    pub equipment: Option<String>,
    /// Form cues
    pub instructions: Option<String>,
    /// Demo video link
    pub media_url: Option<String>,
    /// Whether the user created this exercise
    pub is_custom: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Exercise {
    /// Create a custom exercise with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            muscle_group: None,
            category: None,
            equipment: None,
            instructions: None,
            media_url: None,
            is_custom: true,
            created_at: Utc::now(),
        }
    }

    /// Set the muscle group.
    pub fn with_muscle_group(mut self, muscle_group: impl Into<String>) -> Self {
        self.muscle_group = Some(muscle_group.into());
        self
    }
}

/// A finished workout as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Unique identifier, shared by the workout's sets
    pub id: String,
    /// Calendar date (YYYY-MM-DD, UTC)
    pub date: String,
    /// Plan the workout came from
    pub plan_id: Option<Uuid>,
    pub plan_name: Option<String>,
    pub day_name: Option<String>,
    /// Session notes
    pub notes: Option<String>,
    /// Wall-clock duration
    pub duration_secs: u64,
    /// Exercises performed
    pub exercise_count: u32,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// State of a set during a live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl SetStatus {
    /// Next state when the set's checkbox is tapped: pending, completed, failed, pending.
    pub fn toggled(self) -> Self {
        match self {
            SetStatus::Pending => SetStatus::Completed,
            SetStatus::Completed => SetStatus::Failed,
            SetStatus::Failed => SetStatus::Pending,
        }
    }
}

/// A set being performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSet {
    pub id: String,
    pub set_number: u32,
    pub target_reps: u32,
    pub weight: f64,
    pub reps: u32,
    pub rpe: Option<f32>,
    pub status: SetStatus,
}

impl SessionSet {
    /// Create a pending set.
    pub fn new(set_number: u32, weight: f64, target_reps: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            set_number,
            target_reps,
            weight,
            reps: target_reps,
            rpe: None,
            status: SetStatus::Pending,
        }
    }

    /// Whether the set was marked done.
    pub fn is_completed(&self) -> bool {
        self.status == SetStatus::Completed
    }
}

/// Edits to a live set. Unset fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SetUpdate {
    pub weight: Option<f64>,
    pub reps: Option<u32>,
    pub rpe: Option<f32>,
}

/// An exercise within a live session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionExercise {
    pub exercise_id: String,
    pub exercise_name: String,
    pub config: PlanExerciseConfig,
    pub sets: Vec<SessionSet>,
    /// Suggestion the prefilled weights came from
    pub suggestion: Suggestion,
    /// Sets from the most recent previous workout, if any
    pub previous: Option<Vec<SetRecord>>,
    pub notes: String,
}

impl SessionExercise {
    /// Heaviest weight and its reps from the previous workout.
    pub fn previous_best(&self) -> Option<(f64, u32)> {
        self.previous.as_ref()?.iter().fold(None, |best, set| match best {
            Some((weight, _)) if weight >= set.weight => best,
            _ => Some((set.weight, set.reps)),
        })
    }
}

/// An in-progress workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: String,
    pub plan_id: Option<Uuid>,
    pub plan_name: Option<String>,
    pub day_name: String,
    pub day_index: usize,
    pub started_at: DateTime<Utc>,
    pub exercises: Vec<SessionExercise>,
    pub notes: String,
}

impl WorkoutSession {
    /// Create an empty session.
    pub fn new(day_name: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            plan_id: None,
            plan_name: None,
            day_name: day_name.into(),
            day_index: 0,
            started_at,
            exercises: Vec::new(),
            notes: String::new(),
        }
    }

    /// Seconds since the session started. Never negative.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u64 {
        (now - self.started_at).num_seconds().max(0) as u64
    }

    /// Number of sets across all exercises.
    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}

/// Totals shown when a workout is finished.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTotals {
    /// Volume of completed sets
    pub volume: f64,
    pub completed_sets: usize,
    pub total_sets: usize,
    pub duration_secs: u64,
}

/// A finished workout ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedWorkout {
    pub workout: WorkoutRecord,
    pub sets: Vec<SetRecord>,
}

impl FinishedWorkout {
    /// Volume, completion counts and duration.
    pub fn totals(&self) -> WorkoutTotals {
        let completed: Vec<&SetRecord> = self.sets.iter().filter(|s| s.completed).collect();
        WorkoutTotals {
            volume: completed.iter().map(|s| s.volume()).sum(),
            completed_sets: completed.len(),
            total_sets: self.sets.len(),
            duration_secs: self.workout.duration_secs,
        }
    }
}

/// Format a timestamp the way stored records expect: fixed-width UTC RFC 3339.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Workout session errors.
#[derive(Debug, Error)]
pub enum WorkoutError {
    #[error("No active workout session")]
    NoActiveSession,

    #[error("A workout session is already active")]
    SessionAlreadyActive,

    #[error("Unknown exercise index: {0}")]
    UnknownExercise(usize),

    #[error("Unknown set {set} for exercise {exercise}")]
    UnknownSet { exercise: usize, set: usize },

    #[error("Workout has no sets")]
    EmptySession,

    #[error("Plan has no days")]
    EmptyPlan,

    #[error("History unavailable: {0}")]
    History(#[from] crate::history::types::HistoryError),
}
