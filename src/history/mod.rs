//! Performance history: logged sets, workout grouping, and per-workout summaries.
//!
//! The engine reads history through [`HistorySource`]. Every source must keep
//! `created_at` as an ISO-8601 string that is never backdated, because
//! workouts are ordered by comparing those strings lexically.

pub mod aggregator;
pub mod grouping;
pub mod types;

pub use aggregator::{get_exercise_history, summarize_workouts, WorkoutSummary};
pub use grouping::{group_by_workout, most_recent_first, oldest_first, WorkoutGroup};
pub use types::{HistoryError, HistorySource, InMemoryHistory, SetRecord};
