//! RustLift - Strength Training Progression Engine
//!
//! Suggests the next working weight from logged history, works out barbell
//! plate loading from a finite inventory, summarizes per-workout history, and
//! runs live workout sessions backed by a SQLite store.

pub mod export;
pub mod history;
pub mod metrics;
pub mod plans;
pub mod plates;
pub mod progression;
pub mod storage;
pub mod workouts;

// Re-export commonly used types
pub use history::{get_exercise_history, HistoryError, HistorySource, SetRecord, WorkoutSummary};
pub use plates::{calculate_plates, PlateInventory, PlateResult};
pub use progression::{suggest_next_weight, PlanExerciseConfig, Suggestion, SuggestionReason};
pub use storage::config::{SettingsSource, TrainingSettings, WeightUnit};
pub use storage::database::Database;
pub use workouts::engine::SessionEngine;
