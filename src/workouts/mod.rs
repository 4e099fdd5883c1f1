//! Workout sessions: exercises, live set logging and finished workout records.

pub mod engine;
pub mod types;

pub use engine::{freestyle_config, SessionEngine, DEFAULT_SESSION_SETS, FREESTYLE_DAY};
pub use types::{
    format_timestamp, Exercise, FinishedWorkout, SessionExercise, SessionSet, SetStatus,
    SetUpdate, WorkoutError, WorkoutRecord, WorkoutSession, WorkoutTotals,
};
