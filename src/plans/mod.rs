//! Training plans: rotating days of exercises with per-exercise progression settings.

pub mod manager;
pub mod types;

pub use manager::{PlanError, PlanManager};
pub use types::{Plan, PlanDay, PlanExercise};
