//! Progressive overload: next-weight suggestions from training history.

pub mod advisor;
pub mod types;

pub use advisor::{round_to_nearest, suggest_next_weight, ProgressionAdvisor};
pub use types::{
    PlanExerciseConfig, ProgressionDefaults, Suggestion, SuggestionReason, DEFAULT_DELOAD_AFTER,
    DEFAULT_DELOAD_PERCENT, DEFAULT_INCREMENT, DEFAULT_TARGET_REPS,
};
